use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::document::DocumentError;
use crate::version::error::{MatchError, RegistryError};

/// Every way an update run can fail. None of them is retried.
#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("No access to {} or it does not exist", path.display())]
    Access {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    InvalidSpec(#[from] MatchError),

    #[error("Failed to fetch the version index")]
    Fetch(#[from] RegistryError),

    #[error("Failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: DocumentError,
    },

    #[error("{}: {message}", path.display())]
    Schema { path: PathBuf, message: String },

    #[error("Failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to serialize {}", path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: DocumentError,
    },
}
