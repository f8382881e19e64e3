// Selector module: type preference, filtering, scoring and advisories.

pub mod filter;
pub mod preference;
pub mod scoring;
pub mod warnings;

use crate::config::{ScoringRules, SelectionOptions};
use crate::model::{Product, ScoredCandidate, Selection, SnowCondition};
use tracing::debug;

/// Trait defining the interface for a wax selector.
pub trait Selector {
    fn select<'a>(
        &self,
        temperature_c: f64,
        snow: SnowCondition,
        products: &'a [Product],
        options: &SelectionOptions,
    ) -> Selection<'a>;
}

/// Default selector, parameterized by its scoring rules.
#[derive(Debug, Clone, Default)]
pub struct SelectorImpl {
    rules: ScoringRules,
}

impl SelectorImpl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: ScoringRules) -> Self {
        Self { rules }
    }
}

impl Selector for SelectorImpl {
    /// Filters, scores and ranks `products`, then attaches advisories.
    ///
    /// Products that are not candidates are skipped silently. Ranking is a
    /// stable sort on descending score, so equal scores keep catalog order.
    fn select<'a>(
        &self,
        temperature_c: f64,
        snow: SnowCondition,
        products: &'a [Product],
        options: &SelectionOptions,
    ) -> Selection<'a> {
        let order = preference::type_order(snow);

        let mut ranked: Vec<ScoredCandidate<'a>> = products
            .iter()
            .filter_map(|product| {
                let bounds = filter::eligible_window(product, temperature_c, snow, options)?;
                Some(scoring::score(product, bounds, temperature_c, snow, order, &self.rules))
            })
            .collect();

        let candidates = ranked.len();
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked.truncate(options.max_results);

        let warnings = warnings::derive_warnings(temperature_c, snow);

        debug!(
            "Selected {} of {} candidates ({} products) for {:.1} °C {} snow, {} warnings",
            ranked.len(),
            candidates,
            products.len(),
            temperature_c,
            snow,
            warnings.len()
        );

        Selection {
            results: ranked,
            warnings,
        }
    }
}

/// Runs the selection with the default scoring rules.
pub fn select<'a>(
    temperature_c: f64,
    snow: SnowCondition,
    products: &'a [Product],
    options: &SelectionOptions,
) -> Selection<'a> {
    SelectorImpl::new().select(temperature_c, snow, products, options)
}
