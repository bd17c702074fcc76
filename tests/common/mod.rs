//! Common test utilities for Locator integration tests

use std::path::PathBuf;

use tempfile::TempDir;

/// A temp directory tree for discovery tests
#[allow(dead_code)]
pub struct TestTree {
    /// Temporary directory (cleans up on drop)
    pub temp: TempDir,
    /// Path to the tree root
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TestTree {
    /// Create a new empty tree
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Write a file, creating parent directories as needed
    pub fn write_file(&self, rel: &str, content: &str) {
        let full = self.path.join(rel);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&full, content).expect("Failed to write file");
    }

    /// Create a directory, including parents
    pub fn create_dir(&self, rel: &str) -> PathBuf {
        let full = self.path.join(rel);
        std::fs::create_dir_all(&full).expect("Failed to create directory");
        full
    }

    /// Write several empty files at once
    pub fn write_files(&self, rels: &[&str]) {
        for rel in rels {
            self.write_file(rel, "");
        }
    }
}
