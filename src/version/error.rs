use thiserror::Error;

#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Invalid version match specification: {0}")]
    InvalidSpec(String),

    #[error("Cannot resolve \"latest\": newest catalog entry has an invalid version {0:?}")]
    LatestUnresolved(String),
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Version index not found: {0}")]
    NotFound(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}
