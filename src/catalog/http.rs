use super::{parse_catalog, CatalogSource};
use crate::model::{CatalogError, LoadedCatalog};
use chrono::Utc;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("gripwax/", env!("CARGO_PKG_VERSION"));

/// Client shared by every HTTP catalog source.
pub fn build_client(timeout: Duration) -> Result<Client, CatalogError> {
    Ok(Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()?)
}

/// Catalog served as JSON over HTTP(S).
pub struct HttpSource {
    client: Client,
    url: String,
}

impl HttpSource {
    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait::async_trait]
impl CatalogSource for HttpSource {
    fn label(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<LoadedCatalog, CatalogError> {
        debug!("GET {}", self.url);
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::InvalidResponse {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let catalog = parse_catalog(&body, &self.url)?;

        Ok(LoadedCatalog {
            source: self.url.clone(),
            fetched_at: Utc::now(),
            catalog,
        })
    }
}
