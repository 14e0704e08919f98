//! Field matchers
//!
//! One algorithm per required label field. Every matcher is a pure function
//! of the image's [`DetectionIndex`] and the expected value, returning the
//! evidence boxes when the field is present and `None` otherwise.

pub mod alcohol;
pub mod brand;
pub mod net_contents;
pub mod warning;

use tracing::debug;

use super::index::DetectionIndex;
use super::normalize::clean;
use super::similarity::{partial_ratio, ratio};
use crate::vision::{BoundingBox, Detection};

pub use alcohol::check_alcohol_content;
pub use brand::check_brand_name;
pub use net_contents::check_net_contents;
pub use warning::check_government_warning;

/// Bounding boxes that satisfied a field, in match order
pub type Evidence = Vec<BoundingBox>;

/// Whole-string score a free-text field must beat
pub const DIRECT_RATIO: u8 = 75;
/// Fragment score a free-text field must beat inside longer text
pub const DIRECT_PARTIAL_RATIO: u8 = 85;

/// Fuzzy containment test used by every matcher
///
/// `candidate` matches when it is close to `expected` as a whole, or when it
/// is longer than `expected` and contains a close fragment of it.
pub fn fuzzy_contains(expected: &str, candidate: &str, ratio_min: u8, partial_min: u8) -> bool {
    ratio(expected, candidate) > ratio_min
        || (candidate.chars().count() > expected.chars().count()
            && partial_ratio(expected, candidate) > partial_min)
}

/// First detection (in id order) whose cleaned text satisfies `accept`
pub(crate) fn find_detection<'a, F>(index: &'a DetectionIndex, mut accept: F) -> Option<&'a Detection>
where
    F: FnMut(&str, &Detection) -> bool,
{
    index.iter().find(|&d| accept(&clean(&d.text), d))
}

/// Direct single-box match of a cleaned expected value
pub(crate) fn direct_match<'a>(index: &'a DetectionIndex, expected: &str) -> Option<&'a Detection> {
    find_detection(index, |text, _| {
        fuzzy_contains(expected, text, DIRECT_RATIO, DIRECT_PARTIAL_RATIO)
    })
}

/// Product class: direct match only
pub fn check_product_class(index: &DetectionIndex, product_class: &str) -> Option<Evidence> {
    let expected = clean(product_class);
    if expected.is_empty() {
        return None;
    }

    let found = direct_match(index, &expected)?;
    debug!("Product class '{}' matched detection {} ({:?})", expected, found.id, found.text);
    Some(vec![found.bbox])
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::verify::index::DetectionIndex;
    use crate::vision::{BoundingBox, Detection};

    /// Detections laid out one per row, 40px apart
    pub fn rows(texts: &[&str]) -> DetectionIndex {
        DetectionIndex::build(
            texts
                .iter()
                .enumerate()
                .map(|(i, text)| {
                    let top = 40.0 * i as f64;
                    Detection::from_rect(i, *text, 0.9, BoundingBox::new(10.0, top, 300.0, top + 30.0))
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::rows;
    use super::*;

    #[test]
    fn test_fuzzy_contains_whole_string() {
        assert!(fuzzy_contains("VODKA", "VODKA", 75, 85));
        assert!(fuzzy_contains("TENNESSEE WHISKEY", "TENNESSEE WH1SKEY", 75, 85));
        assert!(!fuzzy_contains("VODKA", "BOURBON", 75, 85));
    }

    #[test]
    fn test_fuzzy_contains_requires_longer_candidate_for_fragments() {
        assert!(fuzzy_contains("BOURBON", "KENTUCKY STRAIGHT BOURBON WHISKEY", 75, 85));
        // the candidate is a fragment of the expected value, not the other way round
        assert!(!fuzzy_contains("KENTUCKY STRAIGHT BOURBON WHISKEY", "BOURBON", 75, 85));
    }

    #[test]
    fn test_product_class_direct() {
        let index = rows(&["Grey Goose", "Vodka", "Product of France"]);
        let evidence = check_product_class(&index, "vodka").unwrap();
        assert_eq!(evidence, vec![index.get(1).unwrap().bbox]);
    }

    #[test]
    fn test_product_class_inside_longer_text() {
        let index = rows(&["Kentucky Straight Bourbon Whiskey"]);
        assert!(check_product_class(&index, "Bourbon Whiskey").is_some());
    }

    #[test]
    fn test_product_class_missing() {
        let index = rows(&["Grey Goose", "Product of France"]);
        assert!(check_product_class(&index, "Tennessee Whiskey").is_none());
        assert!(check_product_class(&index, "").is_none());
        assert!(check_product_class(&rows(&[]), "Vodka").is_none());
    }
}
