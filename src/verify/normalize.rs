//! OCR text normalization

/// Canonical comparison form of OCR text
///
/// Keeps ASCII letters, digits, whitespace, `-`, `%` and `&`, collapses
/// whitespace runs to a single space, trims and upper-cases.
pub fn clean(text: &str) -> String {
    let kept: String = text
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace() || matches!(c, '-' | '%' | '&'))
        .collect();

    kept.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_strips_punctuation() {
        assert_eq!(clean("Samuel Adams®"), "SAMUEL ADAMS");
        assert_eq!(clean("GOVERNMENT WARNING: (1)"), "GOVERNMENT WARNING 1");
        assert_eq!(clean("40% Alc./Vol."), "40% ALCVOL");
        assert_eq!(clean("Jack & Coke - Ready"), "JACK & COKE - READY");
    }

    #[test]
    fn test_clean_collapses_whitespace() {
        assert_eq!(clean("  750 \t\n ml  "), "750 ML");
        assert_eq!(clean(""), "");
        assert_eq!(clean("  ...  "), "");
    }

    #[test]
    fn test_clean_is_idempotent() {
        for s in ["Grey  Goose!", "12.5% alc/vol", "Ünïcode – text", "  a\u{a0}b  ", "&-%"] {
            let once = clean(s);
            assert_eq!(clean(&once), once, "not idempotent for {s:?}");
        }
    }
}
