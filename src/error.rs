//! Error types
//!
//! Library-level failures. Absence of a field on a label is never an error;
//! these cover configuration, transport and submission-contract problems.

use thiserror::Error;

/// Configuration problems detected before any image is processed
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The requested OCR backend does not exist
    #[error("unsupported OCR backend '{0}'")]
    UnsupportedBackend(String),
    /// A backend needs a setting that was not provided
    #[error("OCR backend '{backend}' requires '{setting}' to be set")]
    MissingSetting {
        backend: &'static str,
        setting: &'static str,
    },
    /// The HTTP client could not be built
    #[error("failed to create HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// Failures talking to an OCR collaborator
#[derive(Debug, Error)]
pub enum OcrError {
    #[error("OCR request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("OCR service returned status {status}")]
    Status { status: u16 },
    #[error("OCR service returned a malformed box: {0}")]
    MalformedBox(String),
}

/// Submissions that break the calling contract
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("submission contains no images")]
    NoImages,
    #[error("submission contains {count} images, limit is {limit}")]
    TooManyImages { count: usize, limit: usize },
    #[error("image {index} is {size} bytes, limit is {limit} bytes")]
    ImageTooLarge {
        index: usize,
        size: usize,
        limit: usize,
    },
}

/// Failure of a whole validation run
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error(transparent)]
    Ocr(#[from] OcrError),
    #[error(transparent)]
    Submission(#[from] SubmissionError),
}

pub type Result<T, E = VerifyError> = std::result::Result<T, E>;
