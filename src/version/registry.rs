//! Catalog source trait for fetching the published version index

#[cfg(test)]
use mockall::automock;

use crate::version::catalog::CatalogEntry;
use crate::version::error::RegistryError;

/// Trait for fetching the list of published runtime versions
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetches every published version
    ///
    /// # Returns
    /// * `Ok(Vec<CatalogEntry>)` - Entries ordered from newest to oldest
    /// * `Err(RegistryError)` - If the fetch fails
    async fn fetch_catalog(&self) -> Result<Vec<CatalogEntry>, RegistryError>;
}
