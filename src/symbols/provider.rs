use dashmap::DashMap;

use crate::{
    symbols::{AssemblySymbolRc, MetadataInformation},
    Error, Result,
};

/// Turns module bytes into a navigable symbol tree.
///
/// Implementations parse whatever binary format the caller deals with; this crate never
/// inspects module bytes itself. Providers are shared between loader threads.
pub trait SymbolProvider: Send + Sync {
    /// Load the symbol tree for one input.
    ///
    /// # Arguments
    ///
    /// * `metadata` - Description of the input
    /// * `data` - The module bytes
    /// * `resolve_references` - Resolve references from `metadata.references`
    ///
    /// # Errors
    /// Returns an error if the bytes cannot be turned into a symbol tree, or if reference
    /// resolution was requested and a reference cannot be found.
    fn load(
        &self,
        metadata: &MetadataInformation,
        data: &[u8],
        resolve_references: bool,
    ) -> Result<AssemblySymbolRc>;
}

/// Serves symbol trees that were produced ahead of time, keyed by assembly id.
///
/// Useful when symbols come from an external pipeline or when comparing hand-built trees.
#[derive(Debug, Default)]
pub struct PreloadedSymbolProvider {
    symbols: DashMap<String, AssemblySymbolRc>,
}

impl PreloadedSymbolProvider {
    /// Create an empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the symbols for `assembly_id`, replacing an earlier registration.
    pub fn insert(&self, assembly_id: impl Into<String>, symbols: AssemblySymbolRc) {
        self.symbols.insert(assembly_id.into(), symbols);
    }

    /// Number of registered assemblies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl SymbolProvider for PreloadedSymbolProvider {
    fn load(
        &self,
        metadata: &MetadataInformation,
        _data: &[u8],
        _resolve_references: bool,
    ) -> Result<AssemblySymbolRc> {
        self.symbols
            .get(&metadata.assembly_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| Error::SymbolLoad {
                assembly: metadata.assembly_id.clone(),
                message: "no symbols registered".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::{AssemblyIdentity, AssemblySymbol, AssemblyVersion};
    use std::sync::Arc;

    #[test]
    fn test_preloaded_lookup() {
        let provider = PreloadedSymbolProvider::new();
        assert!(provider.is_empty());

        let symbols = Arc::new(AssemblySymbol::new(AssemblyIdentity::new(
            "Lib",
            AssemblyVersion::new(1, 0, 0, 0),
        )));
        provider.insert("lib/Lib.dll", symbols.clone());

        let known = MetadataInformation::new("Lib", "/x/Lib.dll").with_assembly_id("lib/Lib.dll");
        let loaded = provider.load(&known, &[], false).unwrap();
        assert!(Arc::ptr_eq(&loaded, &symbols));

        let unknown = MetadataInformation::new("Other", "/x/Other.dll");
        assert!(matches!(
            provider.load(&unknown, &[], false),
            Err(Error::SymbolLoad { .. })
        ));
        assert_eq!(provider.len(), 1);
    }
}
