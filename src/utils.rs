// Utility functions

/// Lowercases and removes all whitespace: "KX 35" -> "kx35".
pub fn compact_lower(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Builds a stable product id like `swix_vp30` from brand and code.
pub fn make_id(brand: &str, code: &str) -> Option<String> {
    let b = compact_lower(brand);
    let c = compact_lower(code);
    match (b.is_empty(), c.is_empty()) {
        (true, true) => None,
        (false, true) => Some(b),
        (true, false) => Some(c),
        (false, false) => Some(format!("{}_{}", b, c)),
    }
}

/// Formats a temperature window for display, e.g. "-10..-2 °C".
pub fn format_window(min: f64, max: f64) -> String {
    format!("{}..{} °C", trim_float(min), trim_float(max))
}

fn trim_float(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.1}", value)
    }
}
