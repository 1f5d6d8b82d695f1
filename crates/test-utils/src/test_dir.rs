//! Temporary directory management for tests.
//!
//! [`TestDir`] wraps [`tempfile::TempDir`] and knows how to write seed files.

// Test utilities are expected to panic on failure
#![allow(clippy::expect_used)]

use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A managed temporary directory for tests.
///
/// The directory is removed when this struct is dropped.
///
/// # Example
///
/// ```
/// use swimseed_test_utils::TestDir;
///
/// let dir = TestDir::new();
/// let hosts = dir.write_hosts("hosts.json", &["10.0.0.1:3000"]);
/// assert!(hosts.exists());
/// ```
pub struct TestDir {
    inner: TempDir,
}

impl TestDir {
    /// Create a new temporary directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let inner = TempDir::new().expect("failed to create temp directory");
        Self { inner }
    }

    /// Returns the path to the temporary directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.inner.path()
    }

    /// Join a relative path to the temporary directory.
    #[must_use]
    pub fn join<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        self.inner.path().join(path)
    }

    /// Writes `contents` verbatim to `name` and returns its path.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be written.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.join(name);
        std::fs::write(&path, contents).expect("failed to write test file");
        path
    }

    /// Writes `hosts` as a JSON array to `name` and returns its path.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be written.
    pub fn write_hosts(&self, name: &str, hosts: &[&str]) -> PathBuf {
        let json = serde_json::to_string(hosts).expect("failed to encode hosts");
        self.write(name, &json)
    }
}

impl Default for TestDir {
    fn default() -> Self {
        Self::new()
    }
}
