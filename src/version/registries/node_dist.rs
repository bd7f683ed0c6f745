//! Node.js distribution index (`https://nodejs.org/dist/index.json`)

use serde::Deserialize;
use tracing::{debug, warn};

use crate::version::catalog::CatalogEntry;
use crate::version::error::RegistryError;
use crate::version::registry::CatalogSource;

/// Default URL of the Node.js release index
pub const DEFAULT_INDEX_URL: &str = "https://nodejs.org/dist/index.json";

/// The index is either a bare list or an object wrapping one
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum IndexResponse {
    Entries(Vec<CatalogEntry>),
    Wrapped {
        #[serde(alias = "releases")]
        versions: Vec<CatalogEntry>,
    },
}

impl IndexResponse {
    fn into_entries(self) -> Vec<CatalogEntry> {
        match self {
            IndexResponse::Entries(entries) | IndexResponse::Wrapped { versions: entries } => {
                entries
            }
        }
    }
}

/// Catalog source backed by a JSON release index served over HTTP
pub struct NodeDistRegistry {
    client: reqwest::Client,
    index_url: String,
}

impl NodeDistRegistry {
    /// Creates a new NodeDistRegistry reading the index at `index_url`
    pub fn new(index_url: &str) -> Result<Self, RegistryError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("travis-node-updater/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            index_url: index_url.to_string(),
        })
    }
}

#[async_trait::async_trait]
impl CatalogSource for NodeDistRegistry {
    async fn fetch_catalog(&self) -> Result<Vec<CatalogEntry>, RegistryError> {
        debug!("Fetching version index from {}", self.index_url);

        let response = self.client.get(&self.index_url).send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(RegistryError::NotFound(self.index_url.clone()));
        }

        if !status.is_success() {
            warn!("Version index returned status {}: {}", status, self.index_url);
            return Err(RegistryError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        let index: IndexResponse = response.json().await.map_err(|e| {
            warn!("Failed to parse version index response: {}", e);
            RegistryError::InvalidResponse(e.to_string())
        })?;

        let entries = index.into_entries();
        debug!("Version index lists {} entries", entries.len());

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    #[tokio::test]
    async fn fetch_catalog_keeps_index_order() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/dist/index.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[
                    {"version": "v10.2.0", "date": "2018-05-23", "lts": false},
                    {"version": "v8.11.2", "date": "2018-05-15", "lts": "Carbon"},
                    {"version": "v10.1.0", "date": "2018-05-08", "lts": false}
                ]"#,
            )
            .create_async()
            .await;

        let registry = NodeDistRegistry::new(&format!("{}/dist/index.json", server.url())).unwrap();
        let result = registry.fetch_catalog().await.unwrap();

        mock.assert_async().await;
        assert_eq!(
            result,
            vec![
                CatalogEntry::new("v10.2.0", "2018-05-23"),
                CatalogEntry::new("v8.11.2", "2018-05-15"),
                CatalogEntry::new("v10.1.0", "2018-05-08"),
            ]
        );
    }

    #[tokio::test]
    async fn fetch_catalog_accepts_wrapped_list() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/index.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"versions": [{"version": "v10.2.0", "date": "2018-05-23"}]}"#)
            .create_async()
            .await;

        let registry = NodeDistRegistry::new(&format!("{}/index.json", server.url())).unwrap();
        let result = registry.fetch_catalog().await.unwrap();

        mock.assert_async().await;
        assert_eq!(result, vec![CatalogEntry::new("v10.2.0", "2018-05-23")]);
    }

    #[tokio::test]
    async fn fetch_catalog_returns_not_found_for_missing_index() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/index.json")
            .with_status(404)
            .with_body("Not Found")
            .create_async()
            .await;

        let registry = NodeDistRegistry::new(&format!("{}/index.json", server.url())).unwrap();
        let result = registry.fetch_catalog().await;

        mock.assert_async().await;
        assert!(matches!(result, Err(RegistryError::NotFound(_))));
    }

    #[tokio::test]
    async fn fetch_catalog_rejects_server_errors() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/index.json")
            .with_status(500)
            .create_async()
            .await;

        let registry = NodeDistRegistry::new(&format!("{}/index.json", server.url())).unwrap();
        let result = registry.fetch_catalog().await;

        mock.assert_async().await;
        assert!(matches!(result, Err(RegistryError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn fetch_catalog_rejects_unexpected_body() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/index.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": "nope"}"#)
            .create_async()
            .await;

        let registry = NodeDistRegistry::new(&format!("{}/index.json", server.url())).unwrap();
        let result = registry.fetch_catalog().await;

        mock.assert_async().await;
        assert!(matches!(result, Err(RegistryError::InvalidResponse(_))));
    }
}
