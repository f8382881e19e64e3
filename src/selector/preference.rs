use crate::model::SnowCondition;

pub const HARDWAX: &str = "hardwax";
pub const KLISTER: &str = "klister";

/// Points per rank step in the preference order.
pub const TYPE_STEP: f64 = 10.0;

const WET_ORDER: [&str; 2] = [KLISTER, HARDWAX];
const DEFAULT_ORDER: [&str; 2] = [HARDWAX, KLISTER];

/// Wax types in order of preference for the given snow.
pub fn type_order(snow: SnowCondition) -> &'static [&'static str] {
    match snow {
        SnowCondition::Wet => &WET_ORDER,
        SnowCondition::Dry | SnowCondition::Transformed => &DEFAULT_ORDER,
    }
}

/// `(len - position) * 10` for a listed type, 0 for anything else.
pub fn type_priority_score(order: &[&str], wax_type: &str) -> f64 {
    order
        .iter()
        .position(|t| *t == wax_type)
        .map(|i| (order.len() - i) as f64 * TYPE_STEP)
        .unwrap_or(0.0)
}
