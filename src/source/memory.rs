use std::sync::Arc;

use super::Backend;

/// A module held in memory.
///
/// The buffer is shared, so handing the same registered bytes to several loads does not copy.
#[derive(Debug, Clone)]
pub struct Memory {
    data: Arc<[u8]>,
}

impl Memory {
    /// Wrap an owned or shared buffer.
    #[must_use]
    pub fn new(data: impl Into<Arc<[u8]>>) -> Memory {
        Memory { data: data.into() }
    }
}

impl Backend for Memory {
    fn data(&self) -> &[u8] {
        &self.data
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory() {
        let mut data = vec![0xCC_u8; 1048];
        data[10] = 0xBB;

        let memory = Memory::new(data);

        assert_eq!(memory.len(), 1048);
        assert_eq!(memory.data()[0], 0xCC);
        assert_eq!(memory.data()[10], 0xBB);
    }

    #[test]
    fn test_memory_empty_buffer() {
        let memory = Memory::new(Vec::new());

        assert_eq!(memory.len(), 0);
        assert!(memory.is_empty());
    }
}
