use std::sync::Arc;

use crate::{
    runner::AssemblyLoader,
    source::InMemorySource,
    symbols::{
        AssemblySymbol, AssemblySymbolRc, AssemblyVersion, AssemblyIdentity, MetadataInformation,
        PreloadedSymbolProvider, SymbolProvider, TypeKind, TypeSymbol,
    },
    Result,
};

// Helper function to create an AssemblySymbol from a name and a dotted version
pub fn assembly(name: &str, version: &str) -> AssemblySymbol {
    AssemblySymbol::new(AssemblyIdentity::new(
        name,
        AssemblyVersion::parse(version).unwrap(),
    ))
}

// Helper function to create a public class outside of any namespace
pub fn class(name: &str) -> TypeSymbol {
    TypeSymbol::new("", name, TypeKind::Class)
}

// Helper function to create a public interface outside of any namespace
pub fn interface(name: &str) -> TypeSymbol {
    TypeSymbol::new("", name, TypeKind::Interface)
}

// Helper function to create MetadataInformation whose assembly id is `id`
pub fn metadata(id: &str) -> MetadataInformation {
    MetadataInformation::new("Lib", format!("/pkg/{id}/Lib.dll")).with_assembly_id(id)
}

/// Provider that records every load request before delegating.
#[derive(Debug, Default)]
pub struct RecordingProvider {
    pub inner: PreloadedSymbolProvider,
    pub calls: boxcar::Vec<(String, bool)>,
}

impl RecordingProvider {
    pub fn calls_for(&self, assembly_id: &str) -> usize {
        self.calls
            .iter()
            .filter(|(_, (id, _))| id == assembly_id)
            .count()
    }
}

impl SymbolProvider for RecordingProvider {
    fn load(
        &self,
        metadata: &MetadataInformation,
        data: &[u8],
        resolve_references: bool,
    ) -> Result<AssemblySymbolRc> {
        self.calls
            .push((metadata.assembly_id.clone(), resolve_references));
        self.inner.load(metadata, data, resolve_references)
    }
}

/// In-memory inputs plus a recording provider, wired into an [`AssemblyLoader`].
#[derive(Debug, Default)]
pub struct Harness {
    pub source: Arc<InMemorySource>,
    pub provider: Arc<RecordingProvider>,
}

impl Harness {
    pub fn new() -> Self {
        Self::default()
    }

    // Registers `symbols` under `id` and returns the input describing it
    pub fn register(&self, id: &str, symbols: AssemblySymbol) -> MetadataInformation {
        self.source.insert(id, id.as_bytes().to_vec());
        self.provider.inner.insert(id, Arc::new(symbols));
        metadata(id)
    }

    pub fn loader(&self) -> AssemblyLoader {
        AssemblyLoader::new(self.source.clone(), self.provider.clone())
    }
}
