//! Validation session
//!
//! Walks a submission's images in order, running the matcher of every field
//! that is still unverified, and stops as soon as all fields are verified.
//! A field's evidence always comes from the single image on which it was
//! first verified.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, info, info_span};
use uuid::Uuid;

use super::index::DetectionIndex;
use super::matchers::{
    check_alcohol_content, check_brand_name, check_government_warning, check_net_contents,
    check_product_class, Evidence,
};
use crate::config::LimitsConfig;
use crate::error::OcrError;
use crate::submission::{ExpectedFields, Submission};
use crate::vision::{BoundingBox, ImageText, TextDetector};

/// Required label field
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    BrandName,
    ProductClass,
    AlcoholContent,
    NetContents,
    #[serde(rename = "gov_warn")]
    GovWarning,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::BrandName,
        Field::ProductClass,
        Field::AlcoholContent,
        Field::NetContents,
        Field::GovWarning,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::BrandName => "brand_name",
            Field::ProductClass => "product_class",
            Field::AlcoholContent => "alcohol_content",
            Field::NetContents => "net_contents",
            Field::GovWarning => "gov_warn",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verification state of one field, written at most once per session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldState {
    pub verified: bool,
    pub evidence: Vec<BoundingBox>,
}

impl FieldState {
    fn verified(evidence: Evidence) -> Self {
        Self {
            verified: true,
            evidence,
        }
    }
}

/// Final outcome of a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub session_id: Uuid,
    /// True when every field was verified
    pub success: bool,
    /// Number of images that were run through OCR
    pub images_processed: usize,
    pub fields: BTreeMap<Field, FieldState>,
}

impl ValidationReport {
    pub fn field(&self, field: Field) -> &FieldState {
        &self.fields[&field]
    }

    pub fn is_verified(&self, field: Field) -> bool {
        self.field(field).verified
    }
}

/// Verification of one submission against one OCR collaborator
pub struct ValidationSession<'a> {
    id: Uuid,
    detector: &'a dyn TextDetector,
    expected: ExpectedFields,
    fields: BTreeMap<Field, FieldState>,
    images_processed: usize,
}

impl<'a> ValidationSession<'a> {
    pub fn new(detector: &'a dyn TextDetector, expected: ExpectedFields) -> Self {
        Self {
            id: Uuid::new_v4(),
            detector,
            expected,
            fields: Field::ALL.iter().map(|f| (*f, FieldState::default())).collect(),
            images_processed: 0,
        }
    }

    /// Verify `expected` against `images` in order
    pub fn run<B: AsRef<[u8]>>(
        detector: &'a dyn TextDetector,
        images: &[B],
        expected: ExpectedFields,
    ) -> Result<ValidationReport, OcrError> {
        let mut session = Self::new(detector, expected);
        let span = info_span!("validation", session = %session.id);
        let _enter = span.enter();

        info!("Validating {} images with {} OCR", images.len(), detector.name());
        for image in images {
            if session.is_complete() {
                break;
            }
            session.process_image(image.as_ref())?;
        }

        let report = session.into_report();
        info!(
            "Validation finished after {} of {} images, success: {}",
            report.images_processed,
            images.len(),
            report.success
        );
        Ok(report)
    }

    /// Run OCR on one image and check the fields still unverified
    ///
    /// Does nothing once every field is verified.
    pub fn process_image(&mut self, image: &[u8]) -> Result<(), OcrError> {
        if self.is_complete() {
            debug!("All fields verified, skipping image");
            return Ok(());
        }

        let text = self.detector.detect(image)?;
        self.check_image(text);
        Ok(())
    }

    /// Check the fields still unverified against already detected text
    ///
    /// Ignored once every field is verified.
    pub fn check_image(&mut self, text: ImageText) {
        if self.is_complete() {
            debug!("All fields verified, ignoring detections");
            return;
        }

        self.images_processed += 1;
        let ImageText {
            width,
            height,
            detections,
        } = text;

        let index = DetectionIndex::build(detections);
        debug!(
            "Image {}: {}x{}, {} detections",
            self.images_processed,
            width,
            height,
            index.len()
        );

        for field in Field::ALL {
            if self.fields[&field].verified {
                continue;
            }

            if let Some(evidence) = self.match_field(field, &index, width, height) {
                info!("{} verified on image {}", field, self.images_processed);
                self.fields.insert(field, FieldState::verified(evidence));
            }
        }
    }

    fn match_field(&self, field: Field, index: &DetectionIndex, width: u32, height: u32) -> Option<Evidence> {
        let expected = &self.expected;
        match field {
            Field::BrandName => check_brand_name(index, width, height, &expected.brand_name),
            Field::ProductClass => check_product_class(index, &expected.product_class),
            Field::AlcoholContent => check_alcohol_content(index, &expected.alcohol_content),
            Field::NetContents => {
                check_net_contents(index, &expected.net_contents, &expected.net_contents_unit)
            }
            Field::GovWarning => check_government_warning(index),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.fields.values().all(|state| state.verified)
    }

    pub fn images_processed(&self) -> usize {
        self.images_processed
    }

    pub fn field(&self, field: Field) -> &FieldState {
        &self.fields[&field]
    }

    pub fn into_report(self) -> ValidationReport {
        ValidationReport {
            session_id: self.id,
            success: self.is_complete(),
            images_processed: self.images_processed,
            fields: self.fields,
        }
    }
}

/// Check a submission against its limits, then verify it
pub fn verify_submission(
    detector: &dyn TextDetector,
    expected: ExpectedFields,
    images: Vec<Vec<u8>>,
    limits: &LimitsConfig,
) -> crate::error::Result<ValidationReport> {
    let submission = Submission::new(expected, images, limits)?;
    let report = ValidationSession::run(detector, &submission.images, submission.expected)?;
    Ok(report)
}
