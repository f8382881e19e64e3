// Plain-text rendering of a selection
use crate::model::{Selection, SnowCondition};
use crate::utils::format_window;
use std::fmt::Write;

pub fn format_selection(selection: &Selection<'_>, temperature_c: f64, snow: SnowCondition) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Grip wax for {:.1} °C, {} snow:", temperature_c, snow);

    if selection.results.is_empty() {
        let _ = writeln!(out, "  no matching products");
    }

    for (rank, candidate) in selection.results.iter().enumerate() {
        let product = candidate.product;
        let window = product
            .temp_bounds()
            .map(|b| format_window(b.min, b.max))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "  {}. {} ({}, {}) score {:.1}",
            rank + 1,
            product.display_name(),
            product.wax_type,
            window,
            candidate.score
        );
    }

    for warning in &selection.warnings {
        let _ = writeln!(out, "  ! {}", warning);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SelectionOptions;
    use crate::model::Product;
    use crate::selector::select;

    #[test]
    fn renders_ranked_lines_and_warnings() {
        let mut k22 = Product::new("klister")
            .with_id("swix_k22")
            .with_snow(&[SnowCondition::Wet])
            .with_window(-1.0, 3.0);
        k22.product = "Swix K22 Universal".into();
        let products = vec![k22];

        let selection = select(0.0, SnowCondition::Wet, &products, &SelectionOptions::default());
        let text = format_selection(&selection, 0.0, SnowCondition::Wet);

        assert!(text.starts_with("Grip wax for 0.0 °C, wet snow:"));
        assert!(text.contains("1. Swix K22 Universal (klister, -1..3 °C) score"));
        assert!(text.contains("! Icing risk"));
    }

    #[test]
    fn renders_empty_selection() {
        let selection = select(-20.0, SnowCondition::Dry, &[], &SelectionOptions::default());
        let text = format_selection(&selection, -20.0, SnowCondition::Dry);
        assert!(text.contains("no matching products"));
        assert!(text.contains("! Very cold"));
    }
}
