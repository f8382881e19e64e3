use super::{parse_catalog, CatalogSource};
use crate::model::{CatalogError, LoadedCatalog};
use chrono::Utc;
use std::path::PathBuf;

/// Catalog stored as a local JSON file.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl CatalogSource for FileSource {
    fn label(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<LoadedCatalog, CatalogError> {
        let label = self.label();
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| CatalogError::Io {
                path: label.clone(),
                source,
            })?;
        let catalog = parse_catalog(&text, &label)?;

        Ok(LoadedCatalog {
            source: label,
            fetched_at: Utc::now(),
            catalog,
        })
    }
}
