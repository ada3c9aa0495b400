//! Abstractions for filesystem access to enable testing and mocking.
//!
//! The `FileSystem` trait allows the collector to work with both the real
//! `/proc` filesystem on Linux and in-memory implementations for testing on
//! macOS or in CI.

use std::io;
use std::path::Path;

/// Source of raw report text.
///
/// Collectors only ever need the full current content of a pseudo-file, so
/// this is the whole surface.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a string.
    ///
    /// # Arguments
    /// * `path` - Path to the file to read
    ///
    /// # Returns
    /// The file contents as a string, or an I/O error if the file cannot be read.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// Real filesystem implementation that delegates to `std::fs`.
///
/// Use this in production to read from the actual `/proc` filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFs;

impl RealFs {
    /// Creates a new `RealFs` instance.
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for RealFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_real_fs_read_to_string() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("meminfo");
        fs::write(&path, "MemTotal: 16384 kB\n").unwrap();

        let content = RealFs::new().read_to_string(&path).unwrap();
        assert_eq!(content, "MemTotal: 16384 kB\n");
    }

    #[test]
    fn test_real_fs_large_file() {
        // Larger than a single page to make sure nothing is cut short.
        let dir = tempdir().unwrap();
        let path = dir.path().join("stat");
        let line = "cpu0 1 2 3 4 5 6 7 8 0 0\n";
        let content = line.repeat(1000);
        fs::write(&path, &content).unwrap();

        let read = RealFs::new().read_to_string(&path).unwrap();
        assert_eq!(read.len(), content.len());
    }

    #[test]
    fn test_real_fs_missing_file() {
        let dir = tempdir().unwrap();
        let err = RealFs::new()
            .read_to_string(&dir.path().join("nonexistent"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
