// Grip-wax selection: catalog loading, filtering, scoring and advisories.

pub mod catalog;
pub mod config;
pub mod model;
pub mod normalizer;
pub mod report;
pub mod selector;
pub mod utils;

pub use config::{AppConfig, ScoringRules, SelectionOptions};
pub use model::{Product, ScoredCandidate, Segment, Selection, SnowCondition};
pub use selector::{select, Selector, SelectorImpl};
