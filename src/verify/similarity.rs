//! String similarity scores
//!
//! Both scores are integers in 0..=100. Inputs are expected to be cleaned
//! with [`super::normalize::clean`] first, so case never matters.

use strsim::normalized_levenshtein;

/// Whole-string similarity based on Levenshtein distance
pub fn ratio(a: &str, b: &str) -> u8 {
    (normalized_levenshtein(a, b) * 100.0).round() as u8
}

/// Best similarity of the shorter string against any equal-length window
/// of the longer one
pub fn partial_ratio(a: &str, b: &str) -> u8 {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let (short, long) = if a_chars.len() <= b_chars.len() {
        (a_chars, b_chars)
    } else {
        (b_chars, a_chars)
    };

    if short.is_empty() {
        return if long.is_empty() { 100 } else { 0 };
    }

    let needle: String = short.iter().collect();
    let mut best = 0;
    for window in long.windows(short.len()) {
        let candidate: String = window.iter().collect();
        best = best.max(ratio(&needle, &candidate));
        if best == 100 {
            break;
        }
    }

    best
}
