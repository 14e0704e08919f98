//! Government warning matching
//!
//! The warning is long boilerplate printed in capitals, so it survives OCR
//! largely intact inside a single box; a fragment match on its heading is
//! enough.

use tracing::debug;

use super::{find_detection, Evidence};
use crate::verify::index::DetectionIndex;
use crate::verify::similarity::partial_ratio;

pub const WARNING_HEADING: &str = "GOVERNMENT WARNING";

const MIN_TEXT_LEN: usize = 10;
const PARTIAL_RATIO_MIN: u8 = 80;

pub fn check_government_warning(index: &DetectionIndex) -> Option<Evidence> {
    let found = find_detection(index, |text, _| {
        text.chars().count() > MIN_TEXT_LEN && partial_ratio(WARNING_HEADING, text) > PARTIAL_RATIO_MIN
    })?;

    debug!("Government warning matched detection {}", found.id);
    Some(vec![found.bbox])
}
