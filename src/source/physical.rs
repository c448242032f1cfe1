//! Memory-mapped module backend.
//!
//! [`Physical`] maps a binary from disk into the address space instead of reading it, so a
//! symbol provider only pages in the parts of a large assembly it actually touches.

use memmap2::Mmap;
use std::{fs, path::Path};

use super::Backend;
use crate::{Error, Result};

/// A module mapped from disk.
#[derive(Debug)]
pub struct Physical {
    data: Mmap,
}

impl Physical {
    /// Map the file at `path`.
    ///
    /// # Arguments
    ///
    /// * `path` - Location of the binary
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the file cannot be opened and
    /// [`crate::Error::Error`] if mapping fails.
    pub fn new(path: impl AsRef<Path>) -> Result<Physical> {
        let file = fs::File::open(path)?;

        // The mapping is read-only; callers must not truncate the file while it is mapped.
        let mmap = match unsafe { Mmap::map(&file) } {
            Ok(mmap) => mmap,
            Err(error) => return Err(Error::Error(error.to_string())),
        };

        Ok(Physical { data: mmap })
    }
}

impl Backend for Physical {
    fn data(&self) -> &[u8] {
        self.data.as_ref()
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_physical_maps_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"MZ\x90\x00payload").unwrap();
        file.flush().unwrap();

        let physical = Physical::new(file.path()).unwrap();
        assert_eq!(physical.len(), 11);
        assert_eq!(&physical.data()[..2], b"MZ");
        assert!(!physical.is_empty());
    }

    #[test]
    fn test_physical_missing_file() {
        let result = Physical::new("/definitely/not/here/Lib.dll");
        assert!(matches!(result, Err(Error::FileError(_))));
    }
}
