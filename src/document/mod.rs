//! YAML configuration document holding the version list
//!
//! Only the version list field is interpreted; every other key is carried
//! through untouched and keeps its position when the document is written back.

pub mod store;

use serde_yaml_ng::{Mapping, Value};
use thiserror::Error;

pub use store::{ConfigStore, FsConfigStore};

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Invalid YAML")]
    Parse(#[source] serde_yaml_ng::Error),

    #[error("Failed to serialize YAML")]
    Serialize(#[source] serde_yaml_ng::Error),

    #[error("Unexpected document structure: {0}")]
    Schema(String),
}

/// A parsed configuration document such as `.travis.yml`
#[derive(Debug, Clone, PartialEq)]
pub struct VersionListDocument {
    root: Mapping,
}

impl VersionListDocument {
    /// Parse YAML text; an empty document is an empty mapping
    pub fn parse(content: &str) -> Result<Self, DocumentError> {
        let value: Value = serde_yaml_ng::from_str(content).map_err(DocumentError::Parse)?;

        match value {
            Value::Mapping(root) => Ok(Self { root }),
            Value::Null => Ok(Self {
                root: Mapping::new(),
            }),
            _ => Err(DocumentError::Schema(
                "top level of the document is not a mapping".to_string(),
            )),
        }
    }

    /// Read the version list stored under `key`.
    ///
    /// A missing key or `null` is an empty list and a single scalar is a
    /// one-element list. Integers are read as their string form (`- 8` -> "8");
    /// fractional numbers such as `- 0.10` are rejected because YAML has
    /// already lost their original spelling.
    pub fn versions(&self, key: &str) -> Result<Vec<String>, DocumentError> {
        let Some(value) = self.root.get(key) else {
            return Ok(Vec::new());
        };

        match value {
            Value::Null => Ok(Vec::new()),
            Value::Sequence(items) => items.iter().map(|item| scalar_to_string(key, item)).collect(),
            scalar => scalar_to_string(key, scalar).map(|v| vec![v]),
        }
    }

    /// Store `versions` under `key`, keeping the key's position if it exists
    pub fn set_versions(&mut self, key: &str, versions: &[String]) {
        let list = versions.iter().cloned().map(Value::String).collect();
        self.root
            .insert(Value::String(key.to_string()), Value::Sequence(list));
    }

    pub fn to_yaml(&self) -> Result<String, DocumentError> {
        serde_yaml_ng::to_string(&self.root).map_err(DocumentError::Serialize)
    }
}

fn scalar_to_string(key: &str, value: &Value) -> Result<String, DocumentError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) if n.is_f64() => Err(DocumentError::Schema(format!(
            "\"{key}\" contains the unquoted number {n}; quote it to keep its exact spelling"
        ))),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(DocumentError::Schema(format!(
            "\"{key}\" contains an entry that is neither a string nor a number"
        ))),
    }
}
