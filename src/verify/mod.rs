//! Field Verification Engine
//!
//! Decides, per required label field, whether the expected value is present
//! among an image's OCR detections. Matching tolerates OCR noise through
//! fuzzy scoring on normalized text, and reassembles brand names split
//! across several boxes through spatial proximity.
//!
//! The engine is synchronous and performs no I/O of its own; OCR is
//! delegated to a [`crate::vision::TextDetector`].

pub mod index;
pub mod matchers;
pub mod normalize;
pub mod session;
pub mod similarity;

pub use index::DetectionIndex;
pub use matchers::Evidence;
pub use normalize::clean;
pub use session::{verify_submission, Field, FieldState, ValidationReport, ValidationSession};
pub use similarity::{partial_ratio, ratio};
