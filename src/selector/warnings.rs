//! Advisory warnings derived from raw conditions, independent of the catalog.

use crate::model::SnowCondition;
use tracing::debug;

pub const ICING_RISK: &str = "Icing risk: snow near 0 °C with free water. \
Use klister, or a thin klister base under hardwax.";
pub const VERY_COLD: &str = "Very cold: apply thin layers, cork them in well, \
and pick a harder, colder wax.";

/// Bounds of the near-zero band where moist snow ices the kick zone.
pub const ICING_BAND_C: (f64, f64) = (-1.0, 1.0);
pub const VERY_COLD_BELOW_C: f64 = -15.0;

pub trait AdvisoryRule: Send + Sync {
    fn id(&self) -> &'static str;

    /// Returns the advisory text if the conditions call for it.
    fn evaluate(&self, temperature_c: f64, snow: SnowCondition) -> Option<&'static str>;
}

struct IcingRisk;

impl AdvisoryRule for IcingRisk {
    fn id(&self) -> &'static str {
        "icing_risk"
    }

    fn evaluate(&self, temperature_c: f64, snow: SnowCondition) -> Option<&'static str> {
        let (low, high) = ICING_BAND_C;
        (snow.is_moist() && (low..=high).contains(&temperature_c)).then_some(ICING_RISK)
    }
}

struct VeryCold;

impl AdvisoryRule for VeryCold {
    fn id(&self) -> &'static str {
        "very_cold"
    }

    fn evaluate(&self, temperature_c: f64, _snow: SnowCondition) -> Option<&'static str> {
        (temperature_c < VERY_COLD_BELOW_C).then_some(VERY_COLD)
    }
}

/// Evaluated in this order; the output keeps it.
static ADVISORY_RULES: &[&dyn AdvisoryRule] = &[&IcingRisk, &VeryCold];

pub fn derive_warnings(temperature_c: f64, snow: SnowCondition) -> Vec<String> {
    ADVISORY_RULES
        .iter()
        .filter_map(|rule| {
            let message = rule.evaluate(temperature_c, snow)?;
            debug!("Advisory {} triggered", rule.id());
            Some(message.to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icing_needs_moist_snow_near_zero() {
        assert_eq!(derive_warnings(0.0, SnowCondition::Wet), vec![ICING_RISK]);
        assert_eq!(derive_warnings(-1.0, SnowCondition::Transformed), vec![ICING_RISK]);
        assert_eq!(derive_warnings(1.0, SnowCondition::Wet), vec![ICING_RISK]);
        assert!(derive_warnings(1.5, SnowCondition::Wet).is_empty());
        assert!(derive_warnings(0.0, SnowCondition::Dry).is_empty());
    }

    #[test]
    fn very_cold_is_strictly_below_minus_fifteen() {
        assert_eq!(derive_warnings(-20.0, SnowCondition::Dry), vec![VERY_COLD]);
        assert!(derive_warnings(-15.0, SnowCondition::Dry).is_empty());
    }

    #[test]
    fn rules_are_listed_in_output_order() {
        let ids: Vec<_> = ADVISORY_RULES.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["icing_risk", "very_cold"]);
    }
}
