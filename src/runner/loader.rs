use std::sync::Arc;

use dashmap::DashMap;
use rayon::prelude::*;

use crate::{
    source::ModuleSource,
    symbols::{AssemblySymbolRc, MetadataInformation, SymbolProvider},
    Error, Result,
};

/// Loads symbol trees for inputs and caches them for the lifetime of the loader.
///
/// The cache is keyed by the input and the reference resolution switch, so an input that
/// is used by several work items is only loaded once per switch value.
pub struct AssemblyLoader {
    source: Arc<dyn ModuleSource>,
    provider: Arc<dyn SymbolProvider>,
    cache: DashMap<(MetadataInformation, bool), AssemblySymbolRc>,
}

impl AssemblyLoader {
    /// Create a loader.
    ///
    /// # Arguments
    ///
    /// * `source` - Locates the bytes of each input
    /// * `provider` - Turns bytes into symbol trees
    #[must_use]
    pub fn new(source: Arc<dyn ModuleSource>, provider: Arc<dyn SymbolProvider>) -> Self {
        Self {
            source,
            provider,
            cache: DashMap::new(),
        }
    }

    /// Load the symbols of one input, using the cache when possible.
    ///
    /// # Errors
    /// Returns an error if the input cannot be found, is empty, or the provider rejects it.
    pub fn load(
        &self,
        metadata: &MetadataInformation,
        resolve_references: bool,
    ) -> Result<AssemblySymbolRc> {
        let key = (metadata.clone(), resolve_references);
        if let Some(cached) = self.cache.get(&key) {
            return Ok(cached.value().clone());
        }

        let backend = self.source.open(metadata)?;
        if backend.is_empty() {
            return Err(Error::Empty);
        }

        let symbols = self
            .provider
            .load(metadata, backend.data(), resolve_references)?;
        self.cache.insert(key, symbols.clone());
        Ok(symbols)
    }

    /// Load several distinct inputs in parallel.
    ///
    /// # Returns
    ///
    /// One result per input, in input order.
    pub fn load_all(
        &self,
        inputs: &[&MetadataInformation],
        resolve_references: bool,
    ) -> Vec<Result<AssemblySymbolRc>> {
        inputs
            .par_iter()
            .map(|input| self.load(input, resolve_references))
            .collect()
    }

    /// Number of cached symbol trees.
    #[must_use]
    pub fn cached_count(&self) -> usize {
        self.cache.len()
    }

    /// Drop every cached symbol tree.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

impl std::fmt::Debug for AssemblyLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssemblyLoader")
            .field("cached", &self.cache.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{assembly, metadata, Harness};

    #[test]
    fn test_load_is_cached_per_switch() {
        let harness = Harness::new();
        let info = harness.register("v1", assembly("Lib", "1.0"));
        let loader = harness.loader();

        let first = loader.load(&info, false).unwrap();
        let second = loader.load(&info, false).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(harness.provider.calls_for("v1"), 1);

        loader.load(&info, true).unwrap();
        assert_eq!(harness.provider.calls_for("v1"), 2);
        assert_eq!(loader.cached_count(), 2);
    }

    #[test]
    fn test_clear_cache_forces_reload() {
        let harness = Harness::new();
        let info = harness.register("v1", assembly("Lib", "1.0"));
        let loader = harness.loader();

        let first = loader.load(&info, false).unwrap();
        loader.clear_cache();
        assert_eq!(loader.cached_count(), 0);

        let second = loader.load(&info, false).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(harness.provider.calls_for("v1"), 2);
        assert_eq!(loader.cached_count(), 1);
    }

    #[test]
    fn test_missing_and_empty_inputs() {
        let harness = Harness::new();
        harness.source.insert("empty", Vec::<u8>::new());
        let loader = harness.loader();

        assert!(matches!(
            loader.load(&metadata("missing"), false),
            Err(Error::AssemblyNotFound(_))
        ));
        assert!(matches!(
            loader.load(&metadata("empty"), false),
            Err(Error::Empty)
        ));
        assert_eq!(loader.cached_count(), 0);
    }

    #[test]
    fn test_load_all_keeps_order() {
        let harness = Harness::new();
        let a = harness.register("a", assembly("A", "1.0"));
        let b = harness.register("b", assembly("B", "1.0"));
        let missing = metadata("missing");
        let loader = harness.loader();

        let results = loader.load_all(&[&a, &missing, &b], false);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().name(), "A");
        assert!(results[1].is_err());
        assert_eq!(results[2].as_ref().unwrap().name(), "B");
    }
}
