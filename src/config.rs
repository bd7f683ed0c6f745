use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::version::catalog::LATEST_VERSION;
use crate::version::registries::node_dist::DEFAULT_INDEX_URL;

// =============================================================================
// Defaults
// =============================================================================

/// Default configuration document to update
pub const DEFAULT_CONFIG_FILE_PATH: &str = "./.travis.yml";

/// Default key holding the version list
pub const DEFAULT_LIST_KEY: &str = "node_js";

/// Default number of matched versions kept per major version
pub const DEFAULT_VERSIONS_PER_MAJOR: NonZeroUsize = NonZeroUsize::new(2).unwrap();

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read options file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid options file {}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Updater configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdaterConfig {
    /// Version match: a range string or `{ version, minDate?, maxDate? }`
    pub version: Value,
    #[serde(alias = "travisFilePath")]
    pub config_file_path: PathBuf,
    #[serde(alias = "nodeVersionsUrl")]
    pub catalog_url: String,
    #[serde(alias = "numberOfVersionsPerMajorNumber")]
    pub versions_per_major: NonZeroUsize,
    pub replace_previous_versions: bool,
    pub list_key: String,
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self {
            version: Value::String(LATEST_VERSION.to_string()),
            config_file_path: PathBuf::from(DEFAULT_CONFIG_FILE_PATH),
            catalog_url: DEFAULT_INDEX_URL.to_string(),
            versions_per_major: DEFAULT_VERSIONS_PER_MAJOR,
            replace_previous_versions: false,
            list_key: DEFAULT_LIST_KEY.to_string(),
        }
    }
}

impl UpdaterConfig {
    /// Load options from a JSON file, defaulting every missing field
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Layer command line overrides on top of the configured version match.
    ///
    /// Each supplied field replaces only its counterpart: a range keeps the
    /// configured date bounds and a single date bound keeps the other one. A
    /// plain range string becomes a structured match once a date is supplied.
    /// A range alone replaces anything that is not a structured match; date
    /// bounds never repair a malformed one, which is left for request
    /// validation to reject.
    pub fn override_version(
        &mut self,
        range: Option<String>,
        min_date: Option<String>,
        max_date: Option<String>,
    ) {
        if range.is_none() && min_date.is_none() && max_date.is_none() {
            return;
        }

        if !self.version.is_object()
            && min_date.is_none()
            && max_date.is_none()
            && let Some(range) = range
        {
            self.version = Value::String(range);
            return;
        }

        let mut spec = match &self.version {
            Value::String(current) => {
                let mut spec = Map::new();
                spec.insert("version".to_string(), Value::String(current.clone()));
                spec
            }
            Value::Object(spec) => spec.clone(),
            _ => return,
        };

        for (field, value) in [("version", range), ("minDate", min_date), ("maxDate", max_date)] {
            if let Some(value) = value {
                spec.insert(field.to_string(), Value::String(value));
            }
        }
        self.version = Value::Object(spec);
    }
}
