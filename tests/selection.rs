use approx::assert_relative_eq;
use gripwax::model::TempWindow;
use gripwax::selector::warnings::{ICING_RISK, VERY_COLD};
use gripwax::{select, Product, SelectionOptions, SnowCondition};
use std::collections::HashSet;

const ALL_SNOW: [SnowCondition; 3] = [
    SnowCondition::Dry,
    SnowCondition::Transformed,
    SnowCondition::Wet,
];

fn everything() -> SelectionOptions {
    SelectionOptions::default().with_max_results(usize::MAX)
}

/// A mixed catalog including products that must never be selected.
fn mixed_catalog() -> Vec<Product> {
    let mut untagged = Product::new("hardwax").with_id("untagged").with_window(-10.0, 0.0);
    untagged.snow = None;

    let mut half_window = Product::new("hardwax")
        .with_id("half_window")
        .with_snow(&ALL_SNOW);
    half_window.temp_c = Some(TempWindow {
        min: Some(-10.0),
        max: None,
    });

    let no_window = Product::new("klister").with_id("no_window").with_snow(&ALL_SNOW);

    vec![
        Product::new("hardwax")
            .with_id("polar")
            .with_snow(&[SnowCondition::Dry])
            .with_window(-30.0, -15.0),
        Product::new("hardwax")
            .with_id("blue")
            .with_snow(&[SnowCondition::Dry, SnowCondition::Transformed])
            .with_window(-10.0, -2.0)
            .with_priority(70.0)
            .with_notes(&["Hard track", "pine tar"]),
        Product::new("hardwax")
            .with_id("violet")
            .with_snow(&[SnowCondition::Dry, SnowCondition::Transformed])
            .with_window(-3.0, 0.0)
            .with_notes(&["Special"]),
        Product::new("klister")
            .with_id("universal")
            .with_snow(&[SnowCondition::Transformed, SnowCondition::Wet])
            .with_window(-4.0, 2.0)
            .with_priority(65.0),
        Product::new("klister")
            .with_id("red")
            .with_snow(&[SnowCondition::Wet])
            .with_window(0.0, 10.0),
        Product::new("glidewax")
            .with_id("glide")
            .with_snow(&ALL_SNOW)
            .with_window(-20.0, 10.0),
        untagged,
        half_window,
        no_window,
    ]
}

fn selected_ids(temperature_c: f64, snow: SnowCondition, products: &[Product], options: &SelectionOptions) -> Vec<String> {
    select(temperature_c, snow, products, options)
        .results
        .iter()
        .map(|c| c.product.id.clone())
        .collect()
}

fn temperatures() -> impl Iterator<Item = f64> {
    (-60..=30).map(|t| t as f64 * 0.5)
}

#[test]
fn dry_hardwax_inside_widened_window_gets_top_type_bonus() {
    let products = vec![Product::new("hardwax")
        .with_id("blue")
        .with_snow(&[SnowCondition::Dry])
        .with_window(-10.0, -2.0)];

    let selection = select(-5.0, SnowCondition::Dry, &products, &SelectionOptions::default());
    assert_eq!(selection.results.len(), 1);
    assert_relative_eq!(selection.results[0].breakdown.type_priority, 20.0);
    assert_relative_eq!(selection.results[0].breakdown.base, 50.0);
}

#[test]
fn wet_snow_at_zero_ranks_klister_first_and_warns_about_icing() {
    let products = vec![
        Product::new("hardwax")
            .with_id("hardwax")
            .with_snow(&[SnowCondition::Wet])
            .with_window(-2.0, 2.0),
        Product::new("klister")
            .with_id("klister")
            .with_snow(&[SnowCondition::Wet])
            .with_window(-2.0, 2.0),
    ];

    let selection = select(0.0, SnowCondition::Wet, &products, &SelectionOptions::default());
    let ids: Vec<_> = selection.results.iter().map(|c| c.product.id.as_str()).collect();
    assert_eq!(ids, vec!["klister", "hardwax"]);
    assert_relative_eq!(selection.results[0].score - selection.results[1].score, 10.0, epsilon = 1e-9);
    assert_eq!(selection.warnings, vec![ICING_RISK]);
}

#[test]
fn very_cold_dry_day_only_warns_about_cold() {
    let catalog = mixed_catalog();
    let selection = select(-20.0, SnowCondition::Dry, &catalog, &SelectionOptions::default());
    assert_eq!(selection.warnings, vec![VERY_COLD]);
}

#[test]
fn hard_track_note_earns_transformed_bonus() {
    let products = vec![Product::new("hardwax")
        .with_id("track")
        .with_snow(&[SnowCondition::Transformed])
        .with_window(-6.0, 0.0)
        .with_notes(&["Hard Track recommended"])];

    let selection = select(-3.0, SnowCondition::Transformed, &products, &SelectionOptions::default());
    assert_relative_eq!(selection.results[0].breakdown.transformed_bias, 6.0);
}

#[test]
fn empty_catalog_still_produces_warnings() {
    let selection = select(0.5, SnowCondition::Transformed, &[], &SelectionOptions::default());
    assert!(selection.results.is_empty());
    assert_eq!(selection.warnings, vec![ICING_RISK]);
}

#[test]
fn ineligible_products_never_appear() {
    let products = mixed_catalog();
    let options = everything();

    for snow in ALL_SNOW {
        for t in temperatures() {
            let selection = select(t, snow, &products, &options);
            for candidate in &selection.results {
                let product = candidate.product;
                assert!(product.suits(snow), "{} selected for {}", product.id, snow);
                let bounds = product
                    .temp_bounds()
                    .unwrap_or_else(|| panic!("{} has no window", product.id));
                assert!(bounds.contains_with_margin(t, options.margin_c));
                assert!(!["untagged", "half_window", "no_window"].contains(&product.id.as_str()));
            }
        }
    }
}

#[test]
fn widening_margin_never_shrinks_candidates() {
    let products = mixed_catalog();

    for snow in ALL_SNOW {
        for t in temperatures() {
            let mut previous: HashSet<String> = HashSet::new();
            for margin in [0.0, 0.5, 1.0, 2.0, 5.0] {
                let options = everything().with_margin(margin);
                let current: HashSet<String> =
                    selected_ids(t, snow, &products, &options).into_iter().collect();
                assert!(previous.is_subset(&current), "margin {} at {} {}", margin, t, snow);
                previous = current;
            }
        }
    }
}

#[test]
fn results_are_capped_and_sorted() {
    let products = mixed_catalog();

    for max_results in [0, 1, 2, 3, 10] {
        let options = SelectionOptions::default().with_max_results(max_results);
        for snow in ALL_SNOW {
            for t in temperatures() {
                let selection = select(t, snow, &products, &options);
                assert!(selection.results.len() <= max_results);
                for pair in selection.results.windows(2) {
                    assert!(pair[0].score >= pair[1].score);
                }
            }
        }
    }
}

#[test]
fn transformed_bias_only_applies_on_transformed_snow() {
    let products = mixed_catalog();
    let options = everything();

    for snow in [SnowCondition::Dry, SnowCondition::Wet] {
        for t in temperatures() {
            for candidate in select(t, snow, &products, &options).results {
                let b = candidate.breakdown;
                assert_eq!(b.transformed_bias, 0.0);
                assert_relative_eq!(candidate.score, b.base + b.type_priority + b.temperature_fit, epsilon = 1e-9);
            }
        }
    }

    let transformed = select(-5.0, SnowCondition::Transformed, &products, &options);
    let blue = transformed
        .results
        .iter()
        .find(|c| c.product.id == "blue")
        .expect("blue is a transformed candidate at -5");
    // hard track 6 + tar 5 + 2 * 0.2
    assert_relative_eq!(blue.breakdown.transformed_bias, 11.4, epsilon = 1e-9);
}

#[test]
fn warnings_ignore_catalog_and_options() {
    let catalog = mixed_catalog();
    let variants = [
        SelectionOptions::default(),
        SelectionOptions::default().with_margin(5.0).with_max_results(0),
    ];

    for snow in ALL_SNOW {
        for t in temperatures() {
            let baseline = select(t, snow, &[], &SelectionOptions::default()).warnings;
            for options in &variants {
                assert_eq!(select(t, snow, &catalog, options).warnings, baseline);
            }
        }
    }
}

#[test]
fn unknown_types_compete_without_type_bonus() {
    let catalog = mixed_catalog();
    let selection = select(-5.0, SnowCondition::Dry, &catalog, &everything());
    let glide = selection
        .results
        .iter()
        .find(|c| c.product.id == "glide")
        .expect("glide wax covers -5");
    assert_eq!(glide.breakdown.type_priority, 0.0);
}

#[test]
fn same_inputs_give_same_output() {
    let products = mixed_catalog();
    let options = SelectionOptions::default();
    let first = selected_ids(-1.0, SnowCondition::Transformed, &products, &options);
    let second = selected_ids(-1.0, SnowCondition::Transformed, &products, &options);
    assert_eq!(first, second);
}
