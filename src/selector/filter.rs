use crate::config::SelectionOptions;
use crate::model::{Product, SnowCondition, TempBounds};
use tracing::trace;

/// Returns the product's own window if it is a candidate for these conditions.
///
/// A candidate is tagged for `snow`, has both temperature bounds, covers
/// `temperature_c` once widened by the margin, and matches the requested
/// segment when one is set.
pub fn eligible_window(
    product: &Product,
    temperature_c: f64,
    snow: SnowCondition,
    options: &SelectionOptions,
) -> Option<TempBounds> {
    if !product.suits(snow) {
        trace!("{}: not tagged for {} snow", product.id, snow);
        return None;
    }

    let Some(bounds) = product.temp_bounds() else {
        trace!("{}: incomplete temperature window", product.id);
        return None;
    };

    if !bounds.contains_with_margin(temperature_c, options.margin_c) {
        trace!(
            "{}: {:.1} °C outside {}..{} ± {}",
            product.id, temperature_c, bounds.min, bounds.max, options.margin_c
        );
        return None;
    }

    if let (Some(wanted), Some(segment)) = (options.segment, product.segment) {
        if wanted != segment {
            trace!("{}: segment {:?} != {:?}", product.id, segment, wanted);
            return None;
        }
    }

    Some(bounds)
}
