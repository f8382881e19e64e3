// Catalog module: sources, JSON and CSV parsing, merging.

pub mod csv_file;
pub mod file;
pub mod http;

pub use csv_file::CsvSource;
pub use file::FileSource;
pub use http::HttpSource;

use crate::config::CatalogSourceConfig;
use crate::model::{Catalog, CatalogError, LoadedCatalog, Product};
use crate::normalizer::normalize_all;
use futures::future::join_all;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{info, warn};

#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    /// Human-readable origin for logs and errors.
    fn label(&self) -> String;

    async fn fetch(&self) -> Result<LoadedCatalog, CatalogError>;
}

/// Builds one source per config entry, in config order. HTTP sources share
/// one client, created on the first URL.
pub fn build_sources(
    configs: &[CatalogSourceConfig],
    http_timeout: Duration,
) -> Result<Vec<Box<dyn CatalogSource>>, CatalogError> {
    let mut client: Option<Client> = None;
    let mut sources: Vec<Box<dyn CatalogSource>> = Vec::with_capacity(configs.len());

    for cfg in configs {
        let source: Box<dyn CatalogSource> = match cfg {
            CatalogSourceConfig::File { path } => Box::new(FileSource::new(path.clone())),
            CatalogSourceConfig::Csv { csv } => Box::new(CsvSource::new(csv.clone())),
            CatalogSourceConfig::Http { url } => {
                let shared = match client.clone() {
                    Some(existing) => existing,
                    None => client.insert(http::build_client(http_timeout)?).clone(),
                };
                Box::new(HttpSource::with_client(shared, url.clone()))
            }
        };
        sources.push(source);
    }

    Ok(sources)
}

/// Parses a catalog document: either `{"products": [...]}` or a bare array.
///
/// Records that do not deserialize are logged and skipped; the rest are
/// normalized.
pub fn parse_catalog(text: &str, origin: &str) -> Result<Catalog, CatalogError> {
    let value: Value = serde_json::from_str(text).map_err(|source| CatalogError::Parse {
        origin: origin.to_string(),
        source,
    })?;

    let (version, scope, records) = match value {
        Value::Array(records) => (None, None, records),
        Value::Object(mut map) => {
            let version = map.get("version").and_then(label_of);
            let scope = map.get("scope").and_then(label_of);
            match map.remove("products") {
                Some(Value::Array(records)) => (version, scope, records),
                _ => return Err(CatalogError::Shape(origin.to_string())),
            }
        }
        _ => return Err(CatalogError::Shape(origin.to_string())),
    };

    let mut products = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<Product>(record) {
            Ok(product) => products.push(product),
            Err(e) => warn!("Skipping malformed product #{} in {}: {}", index, origin, e),
        }
    }
    normalize_all(&mut products);

    Ok(Catalog {
        version,
        scope,
        products,
    })
}

fn label_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Fetches every source concurrently. Failing sources are logged and skipped;
/// an error is returned only if nothing could be loaded.
pub async fn load_all(
    sources: &[Box<dyn CatalogSource>],
) -> Result<Vec<LoadedCatalog>, CatalogError> {
    if sources.is_empty() {
        return Err(CatalogError::NoSources);
    }

    let results = join_all(sources.iter().map(|source| source.fetch())).await;

    let mut loaded = Vec::with_capacity(sources.len());
    for (source, result) in sources.iter().zip(results) {
        match result {
            Ok(catalog) => {
                info!(
                    "Loaded {} products from {} (version {}) at {}",
                    catalog.catalog.products.len(),
                    catalog.source,
                    catalog.catalog.version.as_deref().unwrap_or("-"),
                    catalog.fetched_at.to_rfc3339()
                );
                loaded.push(catalog);
            }
            Err(e) => warn!("Catalog {} failed: {}", source.label(), e),
        }
    }

    if loaded.is_empty() {
        return Err(CatalogError::NoCatalogLoaded(sources.len()));
    }
    Ok(loaded)
}

/// Concatenates products in source order.
pub fn merge(catalogs: Vec<LoadedCatalog>) -> Vec<Product> {
    catalogs
        .into_iter()
        .flat_map(|loaded| loaded.catalog.products)
        .collect()
}
