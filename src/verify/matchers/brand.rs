//! Brand name matching
//!
//! Brand names are usually set in large decorative type, so OCR often splits
//! them into one box per word. A direct single-box match is tried first;
//! multi-word brands then fall back to chaining boxes that sit near each
//! other, one token at a time.

use std::collections::HashSet;
use tracing::debug;

use super::{direct_match, find_detection, fuzzy_contains, Evidence, DIRECT_PARTIAL_RATIO, DIRECT_RATIO};
use crate::verify::index::DetectionIndex;
use crate::verify::normalize::clean;
use crate::vision::Detection;

/// Minimum search padding as a fraction of the image size
const MIN_PADDING_FRACTION: f64 = 0.05;
/// Horizontal padding in average character widths of the last matched token
const CHAR_WIDTHS_PADDING: f64 = 3.0;

pub fn check_brand_name(index: &DetectionIndex, width: u32, height: u32, brand_name: &str) -> Option<Evidence> {
    let expected = clean(brand_name);
    if expected.is_empty() {
        return None;
    }

    if let Some(found) = direct_match(index, &expected) {
        debug!("Brand name '{}' matched detection {} directly", expected, found.id);
        return Some(vec![found.bbox]);
    }

    let tokens: Vec<&str> = expected.split(' ').collect();
    if tokens.len() < 2 {
        return None;
    }

    let evidence = chain_tokens(index, width, height, &tokens)?;
    debug!("Brand name '{}' matched across {} detections", expected, evidence.len());
    Some(evidence)
}

fn token_matches(token: &str, text: &str) -> bool {
    fuzzy_contains(token, text, DIRECT_RATIO, DIRECT_PARTIAL_RATIO)
}

/// Match `tokens` in order across neighbouring detections
///
/// The first token may be anywhere on the image. Each following token must
/// be found inside the padded box of the previous match; the first candidate
/// the index returns wins and there is no backtracking.
fn chain_tokens(index: &DetectionIndex, width: u32, height: u32, tokens: &[&str]) -> Option<Evidence> {
    let (first, rest) = tokens.split_first()?;

    let start = find_detection(index, |text, _| token_matches(first, text))?;
    let mut used: HashSet<usize> = HashSet::from([start.id]);
    let mut evidence = vec![start.bbox];
    let mut current = start.bbox;
    let mut last_token = *first;

    for &token in rest {
        let char_width = current.width() / last_token.chars().count().max(1) as f64;
        let pad_x = (MIN_PADDING_FRACTION * width as f64).max(CHAR_WIDTHS_PADDING * char_width);
        let pad_y = (MIN_PADDING_FRACTION * height as f64).max(current.height() / 2.0);
        let area = current.expand(pad_x, pad_y);

        let next: &Detection = index
            .query(&area)
            .into_iter()
            .filter(|id| !used.contains(id))
            .filter_map(|id| index.get(id))
            .find(|d| token_matches(token, &clean(&d.text)))?;

        debug!("Brand token '{}' chained to detection {}", token, next.id);
        used.insert(next.id);
        evidence.push(next.bbox);
        current = next.bbox;
        last_token = token;
    }

    Some(evidence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verify::matchers::test_support::rows;
    use crate::vision::BoundingBox;

    fn boxed(id: usize, text: &str, rect: BoundingBox) -> Detection {
        Detection::from_rect(id, text, 0.9, rect)
    }

    #[test]
    fn test_direct_match_single_box() {
        let index = rows(&["Boston Lager", "Samuel Adams", "12 FL OZ"]);
        let evidence = check_brand_name(&index, 1000, 1000, "Samuel Adams").unwrap();
        assert_eq!(evidence, vec![index.get(1).unwrap().bbox]);
    }

    #[test]
    fn test_direct_match_tolerates_ocr_noise() {
        let index = rows(&["GREY G0OSE"]);
        assert!(check_brand_name(&index, 1000, 1000, "Grey Goose").is_some());
    }

    #[test]
    fn test_chained_tokens_nearby() {
        let samuel = BoundingBox::new(100.0, 100.0, 220.0, 140.0);
        let adams = BoundingBox::new(230.0, 100.0, 330.0, 140.0);
        let index = DetectionIndex::build(vec![
            boxed(0, "ADAMS", adams),
            boxed(1, "SAMUEL", samuel),
        ]);

        let evidence = check_brand_name(&index, 1000, 1000, "Samuel Adams").unwrap();
        assert_eq!(evidence, vec![samuel, adams]);
    }

    #[test]
    fn test_chained_tokens_stacked_vertically() {
        let samuel = BoundingBox::new(100.0, 100.0, 400.0, 160.0);
        let adams = BoundingBox::new(120.0, 170.0, 380.0, 230.0);
        let index = DetectionIndex::build(vec![boxed(0, "Samuel", samuel), boxed(1, "Adams", adams)]);

        let evidence = check_brand_name(&index, 1000, 1000, "SAMUEL ADAMS").unwrap();
        assert_eq!(evidence, vec![samuel, adams]);
    }

    #[test]
    fn test_horizontal_padding_follows_character_width() {
        // 600px for six characters: pad is 3 * 100px, well above the 50px floor
        let samuel = BoundingBox::new(0.0, 100.0, 600.0, 140.0);
        let chain_with_gap = |gap: f64| {
            let adams = BoundingBox::new(600.0 + gap, 100.0, 700.0 + gap, 140.0);
            let index = DetectionIndex::build(vec![boxed(0, "SAMUEL", samuel), boxed(1, "ADAMS", adams)]);
            check_brand_name(&index, 1000, 1000, "Samuel Adams").map(|evidence| evidence.len())
        };

        assert_eq!(chain_with_gap(250.0), Some(2));
        assert_eq!(chain_with_gap(350.0), None);
    }

    #[test]
    fn test_vertical_padding_follows_box_height() {
        // 300px tall box: pad is 150px, well above the 50px floor
        let samuel = BoundingBox::new(100.0, 100.0, 220.0, 400.0);
        let chain_with_gap = |gap: f64| {
            let adams = BoundingBox::new(100.0, 400.0 + gap, 220.0, 440.0 + gap);
            let index = DetectionIndex::build(vec![boxed(0, "SAMUEL", samuel), boxed(1, "ADAMS", adams)]);
            check_brand_name(&index, 1000, 1000, "Samuel Adams").map(|evidence| evidence.len())
        };

        assert_eq!(chain_with_gap(120.0), Some(2));
        assert_eq!(chain_with_gap(180.0), None);
    }

    #[test]
    fn test_chained_tokens_too_far_apart() {
        let index = DetectionIndex::build(vec![
            boxed(0, "SAMUEL", BoundingBox::new(100.0, 100.0, 220.0, 140.0)),
            boxed(1, "ADAMS", BoundingBox::new(800.0, 800.0, 900.0, 840.0)),
        ]);

        assert!(check_brand_name(&index, 1000, 1000, "Samuel Adams").is_none());
    }

    #[test]
    fn test_chain_fails_without_first_token() {
        let index = DetectionIndex::build(vec![boxed(0, "ADAMS", BoundingBox::new(230.0, 100.0, 330.0, 140.0))]);
        assert!(check_brand_name(&index, 1000, 1000, "Samuel Adams").is_none());
    }

    #[test]
    fn test_chain_does_not_reuse_boxes() {
        // "JACK JACK" must not be satisfied by a single "JACK" box
        let index = DetectionIndex::build(vec![boxed(0, "JACK", BoundingBox::new(100.0, 100.0, 200.0, 140.0))]);
        assert!(check_brand_name(&index, 1000, 1000, "Jack Jack").is_none());
    }

    #[test]
    fn test_chain_takes_first_candidate_in_query_order() {
        let samuel = BoundingBox::new(100.0, 100.0, 220.0, 140.0);
        let adams_right = BoundingBox::new(230.0, 100.0, 330.0, 140.0);
        let adams_below = BoundingBox::new(100.0, 150.0, 200.0, 190.0);
        let index = DetectionIndex::build(vec![
            boxed(0, "SAMUEL", samuel),
            boxed(1, "ADAMZ", adams_right),
            boxed(2, "ADAMS", adams_below),
        ]);

        // id 1 is returned first and still passes the fuzzy rule
        let evidence = check_brand_name(&index, 1000, 1000, "Samuel Adams").unwrap();
        assert_eq!(evidence, vec![samuel, adams_right]);
    }

    #[test]
    fn test_single_token_has_no_chaining() {
        let index = rows(&["Budwiser Lager Beer"]);
        assert!(check_brand_name(&index, 1000, 1000, "Heineken").is_none());
    }

    #[test]
    fn test_empty_brand_is_never_verified() {
        let index = rows(&["Samuel Adams"]);
        assert!(check_brand_name(&index, 1000, 1000, "  ").is_none());
    }
}
