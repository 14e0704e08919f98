//! Vision/OCR Layer
//!
//! Text detections and the OCR collaborators that produce them.
//! Supports multiple OCR backends:
//! - Remote OCR service over HTTP (recommended)
//! - Mock backend that reads image dimensions but finds no text

pub mod http_ocr;
pub mod mock;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Cursor;
use std::str::FromStr;
use tracing::info;

use crate::config::OcrSettings;
use crate::error::{ConfigError, OcrError};

pub use http_ocr::HttpOcrClient;
pub use mock::MockDetector;

/// OCR backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum OcrBackend {
    /// Remote OCR service
    #[default]
    Http,
    /// No-op detector, every image yields zero detections
    Mock,
}

impl OcrBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            OcrBackend::Http => "http",
            OcrBackend::Mock => "mock",
        }
    }
}

impl fmt::Display for OcrBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OcrBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.as_str() {
            "http" => Ok(OcrBackend::Http),
            "mock" => Ok(OcrBackend::Mock),
            _ => Err(ConfigError::UnsupportedBackend(lower)),
        }
    }
}

impl TryFrom<String> for OcrBackend {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<OcrBackend> for String {
    fn from(backend: OcrBackend) -> Self {
        backend.as_str().to_string()
    }
}

/// A polygon vertex in image pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in image pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Rectangle covering the whole plane
    pub fn everything() -> Self {
        Self::new(
            f64::NEG_INFINITY,
            f64::NEG_INFINITY,
            f64::INFINITY,
            f64::INFINITY,
        )
    }

    /// Smallest rectangle containing every vertex
    pub fn from_polygon(polygon: &[Point]) -> Self {
        if polygon.is_empty() {
            return Self::default();
        }

        let min_x = polygon.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
        let min_y = polygon.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        let max_x = polygon.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
        let max_y = polygon.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);

        Self::new(min_x, min_y, max_x, max_y)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Grow the rectangle by `dx` on the left and right and `dy` on the top and bottom
    pub fn expand(&self, dx: f64, dy: f64) -> Self {
        Self::new(
            self.min_x - dx,
            self.min_y - dy,
            self.max_x + dx,
            self.max_y + dy,
        )
    }
}

/// One recognized text span
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Identifier, unique within one image only
    pub id: usize,
    /// Raw recognized text
    pub text: String,
    /// Recognition confidence (0.0 - 1.0)
    pub confidence: f32,
    /// Axis-aligned bounds of the polygon
    pub bbox: BoundingBox,
    /// Four ordered vertices as reported by the OCR engine
    pub polygon: [Point; 4],
}

impl Detection {
    pub fn new(id: usize, text: impl Into<String>, confidence: f32, polygon: [Point; 4]) -> Self {
        Self {
            id,
            text: text.into(),
            confidence: confidence.clamp(0.0, 1.0),
            bbox: BoundingBox::from_polygon(&polygon),
            polygon,
        }
    }

    /// Build a detection from an axis-aligned rectangle
    pub fn from_rect(id: usize, text: impl Into<String>, confidence: f32, rect: BoundingBox) -> Self {
        let polygon = [
            Point::new(rect.min_x, rect.min_y),
            Point::new(rect.max_x, rect.min_y),
            Point::new(rect.max_x, rect.max_y),
            Point::new(rect.min_x, rect.max_y),
        ];
        Self::new(id, text, confidence, polygon)
    }
}

/// Everything the OCR collaborator reports for one image
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageText {
    pub width: u32,
    pub height: u32,
    pub detections: Vec<Detection>,
}

impl ImageText {
    pub fn new(width: u32, height: u32, detections: Vec<Detection>) -> Self {
        Self {
            width,
            height,
            detections,
        }
    }

    /// An image with no readable text
    pub fn empty() -> Self {
        Self::default()
    }
}

/// OCR collaborator - abstraction over text detection engines
///
/// Implementations are created once and shared read-only between sessions.
/// Recoverable conditions (undecodable image, no text) must produce an
/// empty [`ImageText`] rather than an error.
pub trait TextDetector: Send + Sync {
    /// Backend name for logging
    fn name(&self) -> &'static str;

    /// Detect text spans in raw (encoded) image bytes
    fn detect(&self, image: &[u8]) -> Result<ImageText, OcrError>;
}

/// Create the detector selected by the configuration
pub fn create_detector(settings: &OcrSettings) -> Result<Box<dyn TextDetector>, ConfigError> {
    info!("Initializing {} OCR backend", settings.backend);

    match settings.backend {
        OcrBackend::Http => Ok(Box::new(HttpOcrClient::new(settings)?)),
        OcrBackend::Mock => Ok(Box::new(MockDetector)),
    }
}

/// Read pixel dimensions from an encoded image header
///
/// Returns `None` when the bytes are empty or not a recognizable image.
pub fn image_dimensions(data: &[u8]) -> Option<(u32, u32)> {
    if data.is_empty() {
        return None;
    }

    image::ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .ok()?
        .into_dimensions()
        .ok()
}
