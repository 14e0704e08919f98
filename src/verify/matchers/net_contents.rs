//! Net contents matching
//!
//! The expected amount is expanded into the phrase a label prints for its
//! unit. Thresholds differ per unit; fluid ounces accept whole-string
//! matches only.

use tracing::{debug, warn};

use super::{find_detection, fuzzy_contains, Evidence};
use crate::submission::NetContentsUnit;
use crate::verify::index::DetectionIndex;
use crate::verify::normalize::clean;
use crate::verify::similarity::ratio;

struct UnitRule {
    ratio_min: u8,
    /// Fragment threshold, `None` disables fragment matching
    partial_min: Option<u8>,
}

fn unit_rule(unit: &NetContentsUnit) -> Option<UnitRule> {
    match unit {
        NetContentsUnit::Liters => Some(UnitRule {
            ratio_min: 75,
            partial_min: Some(85),
        }),
        NetContentsUnit::FluidOunces => Some(UnitRule {
            ratio_min: 78,
            partial_min: None,
        }),
        NetContentsUnit::Milliliters => Some(UnitRule {
            ratio_min: 78,
            partial_min: Some(85),
        }),
        NetContentsUnit::Other(_) => None,
    }
}

/// Phrase a label prints for `amount` of `unit`, `None` for unknown units
pub fn expected_phrase(amount: &str, unit: &NetContentsUnit) -> Option<String> {
    match unit {
        NetContentsUnit::Liters if amount == "1" => Some(format!("{amount} LITER")),
        NetContentsUnit::Liters => Some(format!("{amount} LITERS")),
        NetContentsUnit::FluidOunces => Some(format!("{amount} FL OZ")),
        NetContentsUnit::Milliliters => Some(format!("{amount} ML")),
        NetContentsUnit::Other(_) => None,
    }
}

pub fn check_net_contents(index: &DetectionIndex, net_contents: &str, unit: &NetContentsUnit) -> Option<Evidence> {
    let amount = clean(net_contents);
    if amount.is_empty() {
        return None;
    }

    let (Some(phrase), Some(rule)) = (expected_phrase(&amount, unit), unit_rule(unit)) else {
        warn!("Unsupported net contents unit {:?}, field left unverified", unit.as_str());
        return None;
    };

    let found = find_detection(index, |text, _| match rule.partial_min {
        Some(partial_min) => fuzzy_contains(&phrase, text, rule.ratio_min, partial_min),
        None => ratio(&phrase, text) > rule.ratio_min,
    })?;

    debug!("Net contents '{}' matched detection {}", phrase, found.id);
    Some(vec![found.bbox])
}
