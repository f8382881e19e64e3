use super::CatalogSource;
use crate::model::{Catalog, CatalogError, LoadedCatalog, Product, TempRanges, TempWindow};
use crate::normalizer::{normalize_all, parse_bool, parse_number, parse_segment};
use chrono::Utc;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Priority given to spreadsheet rows that leave the column blank.
pub const CSV_DEFAULT_PRIORITY: f64 = 70.0;
const CSV_VERSION: &str = "2.0";
const CSV_SCOPE: &str = "Classic grip - new/old/wet";

/// Catalog kept as a spreadsheet export, one product per row.
///
/// Columns: `brand, line, code, product_name, type, temp_new_min,
/// temp_new_max, temp_old_min, temp_old_max, temp_wet_min, temp_wet_max,
/// notes, image_file, priority, active` and `Race/Training` (or
/// `race_training`). Header names are matched case-insensitively.
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl CatalogSource for CsvSource {
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
        let catalog = parse_csv_catalog(&text, &label)?;

        Ok(LoadedCatalog {
            source: label,
            fetched_at: Utc::now(),
            catalog,
        })
    }
}

/// Semicolon exports come from spreadsheets with a decimal comma.
fn sniff_delimiter(text: &str) -> u8 {
    let header = text.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
    let semicolons = header.matches(';').count();
    let commas = header.matches(',').count();
    if semicolons > commas { b';' } else { b',' }
}

/// Parses a spreadsheet export into a normalized catalog.
///
/// Rows without brand, code and product name are skipped, as are rows the
/// reader cannot decode.
pub fn parse_csv_catalog(text: &str, origin: &str) -> Result<Catalog, CatalogError> {
    let delimiter = sniff_delimiter(text);
    debug!("Reading {} with delimiter '{}'", origin, delimiter as char);

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let columns: HashMap<String, usize> = reader
        .headers()
        .map_err(|source| CatalogError::Csv {
            origin: origin.to_string(),
            source,
        })?
        .iter()
        .enumerate()
        .map(|(index, name)| (name.trim().to_lowercase(), index))
        .collect();

    let mut products = Vec::new();
    for (index, result) in reader.records().enumerate() {
        match result {
            Ok(record) => {
                let row = Row {
                    columns: &columns,
                    record: &record,
                };
                if let Some(product) = row.to_product() {
                    products.push(product);
                }
            }
            Err(e) => warn!("Skipping unreadable row #{} in {}: {}", index + 1, origin, e),
        }
    }
    normalize_all(&mut products);

    Ok(Catalog {
        version: Some(CSV_VERSION.to_string()),
        scope: Some(CSV_SCOPE.to_string()),
        products,
    })
}

struct Row<'r> {
    columns: &'r HashMap<String, usize>,
    record: &'r StringRecord,
}

impl Row<'_> {
    fn get(&self, column: &str) -> &str {
        self.columns
            .get(column)
            .and_then(|&index| self.record.get(index))
            .map(str::trim)
            .unwrap_or("")
    }

    fn window(&self, condition: &str) -> Option<TempWindow> {
        let min = parse_number(self.get(&format!("temp_{}_min", condition)));
        let max = parse_number(self.get(&format!("temp_{}_max", condition)));
        if min.is_none() && max.is_none() {
            return None;
        }
        Some(TempWindow { min, max })
    }

    fn to_product(&self) -> Option<Product> {
        let brand = self.get("brand");
        let code = self.get("code");
        let product_name = self.get("product_name");
        if brand.is_empty() && code.is_empty() && product_name.is_empty() {
            return None;
        }

        let segment = match self.get("race/training") {
            "" => self.get("race_training"),
            raw => raw,
        };
        let notes = self.get("notes");
        let image_file = self.get("image_file");

        let mut product = Product::new(self.get("type").to_lowercase());
        product.brand = brand.to_string();
        product.line = self.get("line").to_string();
        product.code = code.to_string();
        product.product = if product_name.is_empty() {
            format!("{} {}", brand, code).trim().to_string()
        } else {
            product_name.to_string()
        };
        product.segment = parse_segment(segment);
        product.temp_ranges = Some(TempRanges {
            new: self.window("new"),
            old: self.window("old"),
            wet: self.window("wet"),
        });
        if !notes.is_empty() {
            product.notes = vec![notes.to_string()];
        }
        if !image_file.is_empty() {
            product.image_file = Some(image_file.to_string());
        }
        product.priority = Some(
            parse_number(self.get("priority"))
                .map(f64::trunc)
                .unwrap_or(CSV_DEFAULT_PRIORITY),
        );
        product.active = parse_bool(self.get("active"));
        Some(product)
    }
}
