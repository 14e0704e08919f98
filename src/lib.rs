//! label-verify - alcohol beverage label verification
//!
//! Checks OCR-scanned label images for the five required regulatory fields:
//! brand name, product class, alcohol content, net contents and the
//! government warning.

pub mod config;
pub mod error;
pub mod submission;
pub mod verify;
pub mod vision;

pub use config::AppConfig;
pub use error::{ConfigError, OcrError, SubmissionError, VerifyError};
pub use submission::{ExpectedFields, NetContentsUnit, Submission};
pub use verify::{verify_submission, Field, FieldState, ValidationReport, ValidationSession};
pub use vision::{create_detector, BoundingBox, Detection, ImageText, OcrBackend, TextDetector};
