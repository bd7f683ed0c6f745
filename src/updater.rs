//! Update pipeline: validate, fetch and read, match, merge, persist

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::config::UpdaterConfig;
use crate::document::{ConfigStore, DocumentError, VersionListDocument};
use crate::error::UpdateError;
use crate::version::catalog::{CatalogEntry, MatchSpec};
use crate::version::matcher::match_versions;
use crate::version::merger::merge_versions;
use crate::version::registry::CatalogSource;

/// A validated update request
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateRequest {
    pub spec: MatchSpec,
    pub config_file: PathBuf,
    pub list_key: String,
    pub versions_per_major: NonZeroUsize,
    pub replace_previous_versions: bool,
}

impl UpdateRequest {
    /// Validate the configuration. Performs no I/O.
    pub fn from_config(config: &UpdaterConfig) -> Result<Self, UpdateError> {
        Ok(Self {
            spec: MatchSpec::from_value(&config.version)?,
            config_file: config.config_file_path.clone(),
            list_key: config.list_key.clone(),
            versions_per_major: config.versions_per_major,
            replace_previous_versions: config.replace_previous_versions,
        })
    }
}

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateReport {
    /// List found in the document before the update
    pub previous: Vec<String>,
    /// Versions selected from the catalog, newest first
    pub matched: Vec<String>,
    /// List written back to the document
    pub versions: Vec<String>,
}

impl UpdateReport {
    pub fn changed(&self) -> bool {
        self.previous != self.versions
    }
}

/// Runs the update pipeline against a catalog source and a config store
pub struct Updater {
    source: Arc<dyn CatalogSource>,
    store: Arc<dyn ConfigStore>,
}

impl Updater {
    pub fn new(source: Arc<dyn CatalogSource>, store: Arc<dyn ConfigStore>) -> Self {
        Self { source, store }
    }

    /// Run one update. Nothing is written unless every prior step succeeded.
    pub async fn run(&self, request: &UpdateRequest) -> Result<UpdateReport, UpdateError> {
        let path = &request.config_file;

        self.store
            .check_access(path)
            .await
            .map_err(|source| UpdateError::Access {
                path: path.clone(),
                source,
            })?;

        let (mut document, catalog) =
            futures::try_join!(self.read_document(request), self.fetch_catalog())?;

        let previous = document
            .versions(&request.list_key)
            .map_err(|e| document_error(path, e))?;
        debug!("Current {} list: {:?}", request.list_key, previous);

        let matched = match_versions(&catalog, &request.spec, request.versions_per_major)?;
        info!("Matched versions: {:?}", matched);

        let versions = merge_versions(&previous, &matched, request.replace_previous_versions);
        document.set_versions(&request.list_key, &versions);

        let content = document
            .to_yaml()
            .map_err(|source| UpdateError::Serialize {
                path: path.clone(),
                source,
            })?;

        self.store
            .write(path, &content)
            .await
            .map_err(|source| UpdateError::Write {
                path: path.clone(),
                source,
            })?;
        info!("Updated {:?} with {} versions", path, versions.len());

        Ok(UpdateReport {
            previous,
            matched,
            versions,
        })
    }

    async fn read_document(
        &self,
        request: &UpdateRequest,
    ) -> Result<VersionListDocument, UpdateError> {
        let path = &request.config_file;
        let content = self
            .store
            .read(path)
            .await
            .map_err(|source| UpdateError::Read {
                path: path.clone(),
                source,
            })?;

        VersionListDocument::parse(&content).map_err(|e| document_error(path, e))
    }

    async fn fetch_catalog(&self) -> Result<Vec<CatalogEntry>, UpdateError> {
        let catalog = self.source.fetch_catalog().await?;
        debug!("Fetched {} catalog entries", catalog.len());
        Ok(catalog)
    }
}

fn document_error(path: &Path, error: DocumentError) -> UpdateError {
    match error {
        DocumentError::Schema(message) => UpdateError::Schema {
            path: path.to_path_buf(),
            message,
        },
        source => UpdateError::Parse {
            path: path.to_path_buf(),
            source,
        },
    }
}
