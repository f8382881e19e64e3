// Core structs: Product, SnowCondition, ScoredCandidate, Selection
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::normalizer::{lenient_number, lenient_segment};

/// Snow state the skier is facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnowCondition {
    Dry,
    /// Snow that has melted and refrozen, often coarse and icy.
    Transformed,
    Wet,
}

impl SnowCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            SnowCondition::Dry => "dry",
            SnowCondition::Transformed => "transformed",
            SnowCondition::Wet => "wet",
        }
    }

    /// Wet and transformed snow both carry free water near zero degrees.
    pub fn is_moist(&self) -> bool {
        matches!(self, SnowCondition::Wet | SnowCondition::Transformed)
    }
}

impl fmt::Display for SnowCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SnowCondition {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dry" => Ok(SnowCondition::Dry),
            "transformed" => Ok(SnowCondition::Transformed),
            "wet" => Ok(SnowCondition::Wet),
            other => Err(ParseLabelError::SnowCondition(other.to_string())),
        }
    }
}

/// Market segment a product is sold into. Products without one suit both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Segment {
    Race,
    Training,
}

impl FromStr for Segment {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::normalizer::parse_segment(s).ok_or_else(|| ParseLabelError::Segment(s.to_string()))
    }
}

/// Manufacturer temperature window in °C. Either bound may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TempWindow {
    #[serde(default, deserialize_with = "lenient_number")]
    pub min: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub max: Option<f64>,
}

impl TempWindow {
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Both bounds, if both are present and finite.
    pub fn bounds(&self) -> Option<TempBounds> {
        match (self.min, self.max) {
            (Some(min), Some(max)) if min.is_finite() && max.is_finite() => {
                Some(TempBounds { min, max })
            }
            _ => None,
        }
    }
}

/// Per-condition windows as written by the spreadsheet converter:
/// `new` is fresh (dry) snow, `old` transformed, `wet` wet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TempRanges {
    #[serde(default)]
    pub new: Option<TempWindow>,
    #[serde(default)]
    pub old: Option<TempWindow>,
    #[serde(default)]
    pub wet: Option<TempWindow>,
}

impl TempRanges {
    pub fn window_for(&self, snow: SnowCondition) -> Option<TempWindow> {
        match snow {
            SnowCondition::Dry => self.new,
            SnowCondition::Transformed => self.old,
            SnowCondition::Wet => self.wet,
        }
    }
}

/// A complete temperature window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TempBounds {
    pub min: f64,
    pub max: f64,
}

impl TempBounds {
    pub fn contains_with_margin(&self, temperature_c: f64, margin_c: f64) -> bool {
        temperature_c >= self.min - margin_c && temperature_c <= self.max + margin_c
    }
}

/// One wax product from the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub line: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub product: String,
    #[serde(rename = "type", default)]
    pub wax_type: String,
    #[serde(default)]
    pub snow: Option<Vec<String>>,
    #[serde(default)]
    pub temp_c: Option<TempWindow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp_ranges: Option<TempRanges>,
    #[serde(default)]
    pub notes: Vec<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub priority: Option<f64>,
    #[serde(default, deserialize_with = "lenient_segment")]
    pub segment: Option<Segment>,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(rename = "imageFile", default, skip_serializing_if = "Option::is_none")]
    pub image_file: Option<String>,
}

fn default_active() -> bool {
    true
}

impl Product {
    pub fn new(wax_type: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            brand: String::new(),
            line: String::new(),
            code: String::new(),
            product: String::new(),
            wax_type: wax_type.into(),
            snow: None,
            temp_c: None,
            temp_ranges: None,
            notes: Vec::new(),
            priority: None,
            segment: None,
            active: true,
            image_file: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_snow(mut self, tags: &[SnowCondition]) -> Self {
        self.snow = Some(tags.iter().map(|t| t.as_str().to_string()).collect());
        self
    }

    pub fn with_window(mut self, min: f64, max: f64) -> Self {
        self.temp_c = Some(TempWindow::new(min, max));
        self
    }

    pub fn with_notes(mut self, notes: &[&str]) -> Self {
        self.notes = notes.iter().map(|n| n.to_string()).collect();
        self
    }

    pub fn with_priority(mut self, priority: f64) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_segment(mut self, segment: Segment) -> Self {
        self.segment = Some(segment);
        self
    }

    pub fn suits(&self, snow: SnowCondition) -> bool {
        self.snow
            .as_ref()
            .is_some_and(|tags| tags.iter().any(|t| t == snow.as_str()))
    }

    pub fn temp_bounds(&self) -> Option<TempBounds> {
        self.temp_c.as_ref().and_then(TempWindow::bounds)
    }

    pub fn display_name(&self) -> String {
        if !self.product.is_empty() {
            return self.product.clone();
        }
        let joined = format!("{} {}", self.brand, self.code).trim().to_string();
        if !joined.is_empty() {
            joined
        } else if !self.id.is_empty() {
            self.id.clone()
        } else {
            format!("unnamed {}", self.wax_type)
        }
    }
}

/// Per-component score contributions. `total()` is their plain sum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub base: f64,
    pub type_priority: f64,
    pub transformed_bias: f64,
    pub temperature_fit: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.base + self.type_priority + self.transformed_bias + self.temperature_fit
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoredCandidate<'a> {
    pub product: &'a Product,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

/// Ranked candidates plus advisory warnings for one selection call.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Selection<'a> {
    pub results: Vec<ScoredCandidate<'a>>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub version: Option<String>,
    pub scope: Option<String>,
    pub products: Vec<Product>,
}

#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    pub source: String,
    pub fetched_at: DateTime<Utc>,
    pub catalog: Catalog,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseLabelError {
    #[error("unknown snow condition '{0}' (expected dry, transformed or wet)")]
    SnowCondition(String),
    #[error("unknown segment '{0}' (expected race or training)")]
    Segment(String),
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalog {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("catalog {0} has no products array")]
    Shape(String),
    #[error("failed to read CSV catalog {origin}: {source}")]
    Csv {
        origin: String,
        #[source]
        source: csv::Error,
    },
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected response status {status} from {url}")]
    InvalidResponse { url: String, status: u16 },
    #[error("no catalog sources configured")]
    NoSources,
    #[error("none of the {0} catalog sources could be loaded")]
    NoCatalogLoaded(usize),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}
