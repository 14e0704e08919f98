//! HTTP OCR backend
//!
//! Sends encoded images to an OCR service and converts the returned text
//! boxes into [`Detection`]s. Image dimensions are read locally from the
//! image header, so undecodable uploads never reach the service.

use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use super::{image_dimensions, Detection, ImageText, Point, TextDetector};
use crate::config::OcrSettings;
use crate::error::{ConfigError, OcrError};

/// HTTP OCR client for a text-detection service
pub struct HttpOcrClient {
    client: reqwest::blocking::Client,
    endpoint: String,
}

#[derive(Serialize)]
struct ImageRequest {
    image_base64: String,
}

/// Single text box with its corner points
#[derive(Deserialize, Clone, Debug)]
struct TextBox {
    #[serde(rename = "box")]
    bbox: Vec<Vec<f64>>, // 4 corner points [[x1,y1], [x2,y2], [x3,y3], [x4,y4]]
    text: String,
    score: f64,
}

#[derive(Deserialize)]
struct OcrResponse {
    boxes: Vec<TextBox>,
}

impl TextBox {
    fn polygon(&self) -> Result<[Point; 4], OcrError> {
        let points: Vec<Point> = self
            .bbox
            .iter()
            .filter_map(|p| match p.as_slice() {
                [x, y] => Some(Point::new(*x, *y)),
                _ => None,
            })
            .collect();

        points
            .try_into()
            .map_err(|_| OcrError::MalformedBox(self.text.clone()))
    }
}

impl HttpOcrClient {
    /// Create a new HTTP OCR client
    pub fn new(settings: &OcrSettings) -> Result<Self, ConfigError> {
        let endpoint = settings.endpoint.trim().trim_end_matches('/').to_string();
        if endpoint.is_empty() {
            return Err(ConfigError::MissingSetting {
                backend: "http",
                setting: "endpoint",
            });
        }

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(ConfigError::HttpClient)?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request_boxes(&self, image: &[u8]) -> Result<Vec<TextBox>, OcrError> {
        let body = ImageRequest {
            image_base64: general_purpose::STANDARD.encode(image),
        };

        let response = self
            .client
            .post(format!("{}/ocr", self.endpoint))
            .json(&body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(OcrError::Status {
                status: status.as_u16(),
            });
        }

        let parsed: OcrResponse = response.json()?;
        Ok(parsed.boxes)
    }
}

/// Convert service boxes into detections, numbering them in response order
fn into_detections(boxes: Vec<TextBox>) -> Result<Vec<Detection>, OcrError> {
    boxes
        .into_iter()
        .enumerate()
        .map(|(id, b)| {
            let polygon = b.polygon()?;
            Ok(Detection::new(id, b.text, b.score as f32, polygon))
        })
        .collect()
}

impl TextDetector for HttpOcrClient {
    fn name(&self) -> &'static str {
        "http"
    }

    fn detect(&self, image: &[u8]) -> Result<ImageText, OcrError> {
        let Some((width, height)) = image_dimensions(image) else {
            warn!("Skipping unreadable image ({} bytes)", image.len());
            return Ok(ImageText::empty());
        };

        debug!("HTTP OCR: Processing {}x{} image", width, height);
        let detections = into_detections(self.request_boxes(image)?)?;
        debug!("HTTP OCR: Found {} text regions", detections.len());

        Ok(ImageText::new(width, height, detections))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vision::BoundingBox;

    fn parse(json: &str) -> Vec<TextBox> {
        serde_json::from_str::<OcrResponse>(json).unwrap().boxes
    }

    #[test]
    fn test_response_to_detections() {
        let boxes = parse(
            r#"{"boxes": [
                {"box": [[10, 20], [110, 20], [110, 60], [10, 60]], "text": "Samuel", "score": 0.97},
                {"box": [[120, 22], [200, 21], [201, 58], [121, 59]], "text": "Adams", "score": 0.91}
            ], "raw_text": "Samuel Adams"}"#,
        );

        let detections = into_detections(boxes).unwrap();
        assert_eq!(detections.len(), 2);
        assert_eq!(detections[0].id, 0);
        assert_eq!(detections[0].text, "Samuel");
        assert_eq!(detections[0].bbox, BoundingBox::new(10.0, 20.0, 110.0, 60.0));
        assert_eq!(detections[1].id, 1);
        assert_eq!(detections[1].bbox, BoundingBox::new(120.0, 21.0, 201.0, 59.0));
    }

    #[test]
    fn test_malformed_box_is_rejected() {
        let boxes = parse(r#"{"boxes": [{"box": [[1, 2], [3, 4]], "text": "X", "score": 0.5}]}"#);
        let err = into_detections(boxes).unwrap_err();
        assert!(matches!(err, OcrError::MalformedBox(ref text) if text == "X"));
    }

    #[test]
    fn test_empty_endpoint_is_config_error() {
        let settings = OcrSettings {
            endpoint: "  ".to_string(),
            ..OcrSettings::default()
        };
        let err = HttpOcrClient::new(&settings).err().unwrap();
        assert!(matches!(err, ConfigError::MissingSetting { setting: "endpoint", .. }));
    }

    #[test]
    fn test_endpoint_trailing_slash_trimmed() {
        let settings = OcrSettings {
            endpoint: "http://127.0.0.1:39835/".to_string(),
            ..OcrSettings::default()
        };
        let client = HttpOcrClient::new(&settings).unwrap();
        assert_eq!(client.endpoint(), "http://127.0.0.1:39835");
    }

    #[test]
    fn test_unreadable_image_skips_request() {
        // Nothing listens on this port; an unreadable image must not be sent.
        let settings = OcrSettings {
            endpoint: "http://127.0.0.1:9".to_string(),
            ..OcrSettings::default()
        };
        let client = HttpOcrClient::new(&settings).unwrap();
        assert_eq!(client.detect(b"not an image").unwrap(), ImageText::empty());
    }
}
