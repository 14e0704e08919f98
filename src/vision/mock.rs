//! Mock OCR backend
//!
//! Reports image dimensions but never finds any text. Useful for exercising
//! the pipeline without an OCR service.

use tracing::debug;

use super::{image_dimensions, ImageText, TextDetector};
use crate::error::OcrError;

#[derive(Debug, Clone, Copy, Default)]
pub struct MockDetector;

impl TextDetector for MockDetector {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn detect(&self, image: &[u8]) -> Result<ImageText, OcrError> {
        let (width, height) = image_dimensions(image).unwrap_or((0, 0));
        debug!("Mock OCR: {}x{} image, no text", width, height);
        Ok(ImageText::new(width, height, vec![]))
    }
}
