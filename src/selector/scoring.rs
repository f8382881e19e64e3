//! Additive score components for a single candidate.

use crate::config::ScoringRules;
use crate::model::{Product, ScoreBreakdown, ScoredCandidate, SnowCondition, TempBounds};

use super::preference::type_priority_score;

/// Bonus per degree the upper bound sits below zero, transformed snow only.
pub const SUBZERO_FACTOR: f64 = 0.2;
pub const FIT_WEIGHT: f64 = 10.0;
pub const SPECIFICITY_WEIGHT: f64 = 2.0;
/// Floor for the window span so zero-width windows stay finite.
pub const MIN_SPAN: f64 = 0.1;

pub fn base_priority(product: &Product, rules: &ScoringRules) -> f64 {
    product.priority.unwrap_or(rules.default_priority)
}

/// Keyword and cold-product bonus. Exactly zero unless the snow is transformed.
pub fn transformed_bias(
    product: &Product,
    bounds: TempBounds,
    snow: SnowCondition,
    rules: &ScoringRules,
) -> f64 {
    if snow != SnowCondition::Transformed {
        return 0.0;
    }

    let notes = product.notes.join(" ").to_lowercase();
    let keywords = rules.keyword_bonus(&notes);
    let subzero = (-bounds.max).max(0.0) * SUBZERO_FACTOR;
    keywords + subzero
}

/// Closeness to the window center, plus a bonus for narrow windows.
pub fn temperature_fit(temperature_c: f64, bounds: TempBounds) -> f64 {
    let center = (bounds.min + bounds.max) / 2.0;
    let span = (bounds.max - bounds.min).max(MIN_SPAN);
    let dist = (temperature_c - center).abs();
    FIT_WEIGHT / (1.0 + dist) + SPECIFICITY_WEIGHT / span
}

pub fn score<'a>(
    product: &'a Product,
    bounds: TempBounds,
    temperature_c: f64,
    snow: SnowCondition,
    order: &[&str],
    rules: &ScoringRules,
) -> ScoredCandidate<'a> {
    let breakdown = ScoreBreakdown {
        base: base_priority(product, rules),
        type_priority: type_priority_score(order, &product.wax_type),
        transformed_bias: transformed_bias(product, bounds, snow, rules),
        temperature_fit: temperature_fit(temperature_c, bounds),
    };

    ScoredCandidate {
        product,
        score: breakdown.total(),
        breakdown,
    }
}
