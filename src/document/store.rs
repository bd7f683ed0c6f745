//! Access to the configuration file on disk

use std::io;
use std::path::Path;

#[cfg(test)]
use mockall::automock;
use tracing::debug;

/// Trait for reading and writing the configuration document
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait ConfigStore: Send + Sync {
    /// Fails unless the file exists and is both readable and writable
    async fn check_access(&self, path: &Path) -> io::Result<()>;

    async fn read(&self, path: &Path) -> io::Result<String>;

    async fn write(&self, path: &Path, content: &str) -> io::Result<()>;
}

/// Config store backed by the local filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct FsConfigStore;

#[async_trait::async_trait]
impl ConfigStore for FsConfigStore {
    async fn check_access(&self, path: &Path) -> io::Result<()> {
        // opening without truncate proves read and write permission
        tokio::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .await?;
        Ok(())
    }

    async fn read(&self, path: &Path) -> io::Result<String> {
        debug!("Reading {:?}", path);
        tokio::fs::read_to_string(path).await
    }

    async fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        debug!("Writing {} bytes to {:?}", content.len(), path);
        tokio::fs::write(path, content).await
    }
}
