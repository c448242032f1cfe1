//! Module byte sources.
//!
//! Before symbols can be loaded, the bytes of every input have to be located. A
//! [`ModuleSource`] maps a [`MetadataInformation`] to a [`Backend`] holding those bytes:
//!
//! - [`FileSystemSource`] memory-maps `full_path` through the [`Physical`] backend
//! - [`InMemorySource`] serves buffers registered by assembly id through the [`Memory`]
//!   backend, for callers that extracted binaries from packages themselves
//!
//! A source that cannot find an input reports [`crate::Error::AssemblyNotFound`], which the
//! runner surfaces as a `CP1001` load failure for the affected work item.
//!
//! # Examples
//!
//! ```rust
//! use apicompat::source::{Backend, InMemorySource, ModuleSource};
//! use apicompat::symbols::MetadataInformation;
//!
//! let source = InMemorySource::new();
//! source.insert("lib/net8.0/Lib.dll", b"MZ".to_vec());
//!
//! let info = MetadataInformation::new("Lib", "/pkg/lib/net8.0/Lib.dll")
//!     .with_assembly_id("lib/net8.0/Lib.dll");
//! let backend = source.open(&info)?;
//! assert_eq!(backend.data(), b"MZ");
//! # Ok::<(), apicompat::Error>(())
//! ```

mod memory;
mod physical;

use dashmap::DashMap;
use std::sync::Arc;

pub use memory::Memory;
pub use physical::Physical;

use crate::{symbols::MetadataInformation, Error, Result};

/// Read access to the bytes of one module.
pub trait Backend: Send + Sync {
    /// Returns the entire data buffer.
    fn data(&self) -> &[u8];

    /// Returns the total length of the data buffer.
    fn len(&self) -> usize;

    /// Returns `true` if the buffer is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Locates the bytes of an input.
pub trait ModuleSource: Send + Sync {
    /// Open the module described by `metadata`.
    ///
    /// # Errors
    /// Returns [`crate::Error::AssemblyNotFound`] if the source has no such module, or an
    /// I/O error if it exists but cannot be read.
    fn open(&self, metadata: &MetadataInformation) -> Result<Box<dyn Backend>>;
}

/// Opens inputs from disk by their `full_path`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileSystemSource;

impl FileSystemSource {
    /// Create a file system source.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ModuleSource for FileSystemSource {
    fn open(&self, metadata: &MetadataInformation) -> Result<Box<dyn Backend>> {
        if !metadata.full_path.is_file() {
            return Err(Error::AssemblyNotFound(metadata.assembly_id.clone()));
        }

        Ok(Box::new(Physical::new(&metadata.full_path)?))
    }
}

/// Serves module buffers registered by assembly id.
#[derive(Debug, Default)]
pub struct InMemorySource {
    modules: DashMap<String, Arc<[u8]>>,
}

impl InMemorySource {
    /// Create an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the bytes of `assembly_id`, replacing an earlier registration.
    pub fn insert(&self, assembly_id: impl Into<String>, data: impl Into<Arc<[u8]>>) {
        self.modules.insert(assembly_id.into(), data.into());
    }

    /// Number of registered modules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl ModuleSource for InMemorySource {
    fn open(&self, metadata: &MetadataInformation) -> Result<Box<dyn Backend>> {
        match self.modules.get(&metadata.assembly_id) {
            Some(entry) => Ok(Box::new(Memory::new(entry.value().clone()))),
            None => Err(Error::AssemblyNotFound(metadata.assembly_id.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_in_memory_source() {
        let source = InMemorySource::new();
        source.insert("a", vec![1u8, 2, 3]);

        let known = MetadataInformation::new("A", "/a.dll").with_assembly_id("a");
        assert_eq!(source.open(&known).unwrap().len(), 3);

        let unknown = MetadataInformation::new("B", "/b.dll").with_assembly_id("b");
        assert!(matches!(
            source.open(&unknown),
            Err(Error::AssemblyNotFound(id)) if id == "b"
        ));
        assert_eq!(source.len(), 1);
    }

    #[test]
    fn test_file_system_source() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"MZ").unwrap();
        file.flush().unwrap();

        let source = FileSystemSource::new();
        let info = MetadataInformation::new("Lib", file.path());
        assert_eq!(source.open(&info).unwrap().data(), b"MZ");

        let missing = MetadataInformation::new("Lib", "/nope/Lib.dll");
        assert!(matches!(
            source.open(&missing),
            Err(Error::AssemblyNotFound(_))
        ));
    }
}
