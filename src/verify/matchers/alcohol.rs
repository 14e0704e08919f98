//! Alcohol content matching
//!
//! Labels phrase the percentage many ways ("40% Alc/Vol", "Alcohol 40% by
//! Volume", ...). Every accepted phrasing is generated for the expected
//! value and fuzzy-matched; the number itself is then checked exactly, since
//! a one-digit misread keeps the phrase shape intact.

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use super::{find_detection, fuzzy_contains, Evidence};
use crate::verify::index::DetectionIndex;

const PHRASE_RATIO: u8 = 75;
const PHRASE_PARTIAL_RATIO: u8 = 75;

/// One or two digit percentage not preceded by another digit or decimal point
static PERCENTAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^\d.])(\d{1,2}(?:\.\d{1,2})?)%").expect("valid percentage pattern")
});

/// Every accepted phrasing of `value` percent alcohol
pub fn phrase_variants(value: &str) -> [String; 9] {
    [
        format!("{value}% ALCOHOL BY VOLUME"),
        format!("{value}% ALC BY VOLUME"),
        format!("{value}% ALCOHOL BY VOL"),
        format!("{value}% ALC BY VOL"),
        format!("{value}% ALC/VOL"),
        format!("ALCOHOL {value}% BY VOLUME"),
        format!("ALC {value}% BY VOLUME"),
        format!("ALCOHOL {value}% BY VOL"),
        format!("ALC {value}% BY VOL"),
    ]
}

/// First percentage figure in raw OCR text, without the `%` sign
pub fn extract_percentage(text: &str) -> Option<&str> {
    PERCENTAGE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

pub fn check_alcohol_content(index: &DetectionIndex, alcohol_content: &str) -> Option<Evidence> {
    let value = alcohol_content.trim().trim_end_matches('%').trim();
    if value.is_empty() {
        return None;
    }

    let variants = phrase_variants(value);

    let found = find_detection(index, |text, detection| {
        let shaped = variants
            .iter()
            .any(|variant| fuzzy_contains(variant, text, PHRASE_RATIO, PHRASE_PARTIAL_RATIO));
        if !shaped {
            return false;
        }

        // decimal points are stripped by cleaning, so read the raw text
        let number = extract_percentage(&detection.text);
        if number != Some(value) {
            debug!(
                "Alcohol phrase in detection {} has percentage {:?}, expected {}",
                detection.id, number, value
            );
            return false;
        }
        true
    })?;

    debug!("Alcohol content {}% matched detection {}", value, found.id);
    Some(vec![found.bbox])
}
