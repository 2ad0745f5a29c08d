//! Mock system implementation for testing

use super::System;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// In-memory implementation of System trait for testing
///
/// # Example
/// ```
/// use argtree::system::{mock::MockSystem, System};
/// use std::path::Path;
///
/// let system = MockSystem::new()
///     .with_file("/etc/app.yaml", b"key: value").unwrap();
///
/// assert!(system.exists(Path::new("/etc/app.yaml")));
/// assert_eq!(system.read_to_string(Path::new("/etc/app.yaml")).unwrap(), "key: value");
/// ```
#[derive(Clone)]
pub struct MockSystem {
    files: Arc<RwLock<HashMap<PathBuf, Vec<u8>>>>,
}

impl MockSystem {
    /// Create a new `MockSystem` with no files
    #[must_use]
    #[inline]
    pub fn new() -> Self {
        Self {
            files: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Add a file with contents (builder pattern)
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The in-memory filesystem lock is poisoned
    #[inline]
    pub fn with_file<P: AsRef<Path>>(self, path: P, contents: &[u8]) -> io::Result<Self> {
        let mut files = self
            .files
            .write()
            .map_err(|e| io::Error::other(e.to_string()))?;
        files.insert(path.as_ref().to_path_buf(), contents.to_vec());
        drop(files);
        Ok(self)
    }
}

impl Default for MockSystem {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl System for MockSystem {
    #[inline]
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let files = self
            .files
            .read()
            .map_err(|e| io::Error::other(e.to_string()))?;
        let bytes = files.get(path).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("File not found: {}", path.display()),
            )
        })?;
        let result = bytes.clone();
        drop(files);
        String::from_utf8(result)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("Invalid UTF-8: {e}")))
    }

    #[inline]
    fn exists(&self, path: &Path) -> bool {
        self.files
            .read()
            .is_ok_and(|files| files.contains_key(path))
    }
}
