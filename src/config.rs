use crate::model::{ConfigError, Segment};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const DEFAULT_MARGIN_C: f64 = 1.0;
pub const DEFAULT_MAX_RESULTS: usize = 3;
pub const DEFAULT_PRIORITY: f64 = 50.0;
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 10;
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Per-call matching parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SelectionOptions {
    /// Widens every product window by this many degrees on both ends.
    pub margin_c: f64,
    pub max_results: usize,
    /// Restrict to one segment; products without a segment always pass.
    pub segment: Option<Segment>,
}

impl Default for SelectionOptions {
    fn default() -> Self {
        Self {
            margin_c: DEFAULT_MARGIN_C,
            max_results: DEFAULT_MAX_RESULTS,
            segment: None,
        }
    }
}

impl SelectionOptions {
    pub fn with_margin(mut self, margin_c: f64) -> Self {
        self.margin_c = margin_c;
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn with_segment(mut self, segment: Segment) -> Self {
        self.segment = Some(segment);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.margin_c.is_finite() || self.margin_c < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "marginC must be a non-negative number, got {}",
                self.margin_c
            )));
        }
        Ok(())
    }
}

/// A notes substring and the bonus it earns on transformed snow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordBonus {
    pub keyword: String,
    pub bonus: f64,
}

impl KeywordBonus {
    pub fn new(keyword: impl Into<String>, bonus: f64) -> Self {
        Self {
            keyword: keyword.into(),
            bonus,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScoringRules {
    /// Base score for products without a priority.
    pub default_priority: f64,
    /// Evaluated in order; every matching keyword adds its bonus.
    pub keyword_bonuses: Vec<KeywordBonus>,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            default_priority: DEFAULT_PRIORITY,
            keyword_bonuses: vec![
                KeywordBonus::new("hard track", 6.0),
                KeywordBonus::new("tar", 5.0),
                KeywordBonus::new("special", 3.0),
            ],
        }
    }
}

impl ScoringRules {
    /// Sum of bonuses whose keyword occurs in `notes_lower` (already lowercased).
    pub fn keyword_bonus(&self, notes_lower: &str) -> f64 {
        self.keyword_bonuses
            .iter()
            .filter(|rule| notes_lower.contains(&rule.keyword.to_lowercase()))
            .map(|rule| rule.bonus)
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CatalogSourceConfig {
    File { path: PathBuf },
    Csv { csv: PathBuf },
    Http { url: String },
}

impl CatalogSourceConfig {
    /// `http://` and `https://` values become HTTP sources, `.csv` paths
    /// spreadsheet exports, anything else a JSON file path.
    pub fn from_arg(arg: &str) -> Self {
        if arg.starts_with("http://") || arg.starts_with("https://") {
            return CatalogSourceConfig::Http {
                url: arg.to_string(),
            };
        }

        let path = PathBuf::from(arg);
        let is_csv = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv {
            CatalogSourceConfig::Csv { csv: path }
        } else {
            CatalogSourceConfig::File { path }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub catalogs: Vec<CatalogSourceConfig>,
    pub selection: SelectionOptions,
    pub scoring: ScoringRules,
    pub http_timeout_seconds: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalogs: Vec::new(),
            selection: SelectionOptions::default(),
            scoring: ScoringRules::default(),
            http_timeout_seconds: DEFAULT_HTTP_TIMEOUT_SECONDS,
        }
    }
}

/// Command-line values layered on top of the config file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    /// Extra catalog paths or URLs, appended after the configured ones.
    pub catalogs: Vec<String>,
    pub margin_c: Option<f64>,
    pub max_results: Option<usize>,
    pub segment: Option<Segment>,
}

impl AppConfig {
    pub fn apply_overrides(mut self, overrides: &Overrides) -> Result<Self, ConfigError> {
        self.catalogs.extend(
            overrides
                .catalogs
                .iter()
                .map(|arg| CatalogSourceConfig::from_arg(arg)),
        );
        if let Some(margin_c) = overrides.margin_c {
            self.selection.margin_c = margin_c;
        }
        if let Some(max_results) = overrides.max_results {
            self.selection.max_results = max_results;
        }
        if let Some(segment) = overrides.segment {
            self.selection.segment = Some(segment);
        }
        self.selection.validate()?;
        Ok(self)
    }
}

pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let config: AppConfig = serde_json::from_str(&content)?;
    config.selection.validate()?;
    Ok(config)
}

/// Loads `path`, else `config.json` when it exists, else defaults, then
/// applies `overrides`.
pub fn resolve_config(path: Option<&Path>, overrides: &Overrides) -> Result<AppConfig, ConfigError> {
    let config = match path {
        Some(path) => load_config(path)?,
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => load_config(DEFAULT_CONFIG_PATH)?,
        None => {
            info!("No {} found, using defaults", DEFAULT_CONFIG_PATH);
            AppConfig::default()
        }
    };
    config.apply_overrides(overrides)
}
