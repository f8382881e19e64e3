use crate::model::{Product, Segment, SnowCondition};
use crate::utils::make_id;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

pub const DEFAULT_WAX_TYPE: &str = "hardwax";

/// Parses catalog numbers written by hand: "−3", "2,5", "-1°C".
/// Returns None for empty or unparseable input.
pub fn parse_number(raw: &str) -> Option<f64> {
    let cleaned = raw
        .trim()
        .replace('\u{2212}', "-")
        .replace(['°', 'C', 'c'], "")
        .replace(',', ".");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Serde adapter: accepts a JSON number or a numeric string, anything else is absent.
pub fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_number(&s),
        _ => None,
    }))
}

/// Spreadsheet "active" flags: only an explicit no/nej/false/0 switches a row off.
pub fn parse_bool(raw: &str) -> bool {
    !matches!(raw.trim().to_lowercase().as_str(), "no" | "nej" | "false" | "0")
}

pub fn parse_segment(raw: &str) -> Option<Segment> {
    match raw.trim().to_lowercase().as_str() {
        "race" | "r" => Some(Segment::Race),
        "training" | "touring" | "t" => Some(Segment::Training),
        _ => None,
    }
}

/// Serde adapter: unknown or blank segments mean "both".
pub fn lenient_segment<'de, D>(deserializer: D) -> Result<Option<Segment>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => parse_segment(&s),
        _ => None,
    })
}

/// Drops inactive products and cleans up the rest in place.
pub fn normalize_all(products: &mut Vec<Product>) {
    let before = products.len();
    products.retain(|p| p.active);
    if products.len() < before {
        debug!("Dropped {} inactive products", before - products.len());
    }

    for (index, product) in products.iter_mut().enumerate() {
        normalize_product(product, index);
    }

    if products.iter().any(|p| p.temp_c.is_none() && p.temp_ranges.is_some()) {
        let mut expanded = Vec::with_capacity(products.len());
        for product in products.drain(..) {
            expand_temp_ranges(product, &mut expanded);
        }
        *products = expanded;
    }
}

/// Splits a product that only carries per-condition `temp_ranges` into one
/// entry per condition with a complete window, tagged with that condition.
/// Existing snow tags narrow the conditions considered. Products that already
/// have `temp_c`, or whose ranges have no complete window, pass through as is.
fn expand_temp_ranges(product: Product, out: &mut Vec<Product>) {
    let ranges = match product.temp_ranges {
        Some(ranges) if product.temp_c.is_none() => ranges,
        _ => {
            out.push(product);
            return;
        }
    };

    let variants: Vec<Product> = [SnowCondition::Dry, SnowCondition::Transformed, SnowCondition::Wet]
        .into_iter()
        .filter(|snow| product.snow.is_none() || product.suits(*snow))
        .filter_map(|snow| {
            let window = ranges.window_for(snow).filter(|w| w.bounds().is_some())?;
            let mut variant = product.clone();
            variant.snow = Some(vec![snow.as_str().to_string()]);
            variant.temp_c = Some(window);
            variant.temp_ranges = None;
            Some(variant)
        })
        .collect();

    if variants.is_empty() {
        debug!("{} has no complete temperature range", product.id);
        out.push(product);
    } else {
        out.extend(variants);
    }
}

fn normalize_product(product: &mut Product, index: usize) {
    let wax_type = product.wax_type.trim().to_lowercase();
    product.wax_type = if wax_type.is_empty() {
        DEFAULT_WAX_TYPE.to_string()
    } else {
        wax_type
    };

    if let Some(tags) = product.snow.as_mut() {
        for tag in tags.iter_mut() {
            *tag = tag.trim().to_lowercase();
        }
        tags.retain(|t| !t.is_empty());
    }

    product.notes = product
        .notes
        .iter()
        .map(|n| n.trim())
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .collect();

    if product
        .image_file
        .as_deref()
        .is_some_and(|f| f.trim().is_empty())
    {
        product.image_file = None;
    }

    if product.id.trim().is_empty() {
        product.id =
            make_id(&product.brand, &product.code).unwrap_or_else(|| format!("prod_{}", index + 1));
    }
}
