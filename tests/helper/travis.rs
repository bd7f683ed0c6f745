//! Configuration file test utilities

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use travis_node_updater::document::VersionListDocument;

/// A `.travis.yml` inside its own temporary directory
pub struct TravisFile {
    _temp_dir: TempDir,
    pub path: PathBuf,
}

impl TravisFile {
    pub fn new(content: &str) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".travis.yml");
        std::fs::write(&path, content).unwrap();

        Self {
            _temp_dir: temp_dir,
            path,
        }
    }

    pub fn content(&self) -> String {
        std::fs::read_to_string(&self.path).unwrap()
    }
}

/// Parse the file at `path` and return its `node_js` list
pub fn read_versions(path: &Path) -> Vec<String> {
    let content = std::fs::read_to_string(path).unwrap();
    VersionListDocument::parse(&content)
        .unwrap()
        .versions("node_js")
        .unwrap()
}
