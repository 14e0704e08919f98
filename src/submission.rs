//! Label submissions
//!
//! The expected field values a label is checked against, and the images
//! that make up one submission.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::LimitsConfig;
use crate::error::SubmissionError;

/// Unit of the declared net contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NetContentsUnit {
    Liters,
    Milliliters,
    FluidOunces,
    /// Anything else; net contents can not be verified for it
    Other(String),
}

impl NetContentsUnit {
    /// Parse a unit as submitted by the web form (`L`, `ml`, `fl oz`)
    pub fn parse(unit: &str) -> Self {
        let normalized = unit.split_whitespace().collect::<Vec<_>>().join(" ").to_ascii_lowercase();
        match normalized.as_str() {
            "l" => NetContentsUnit::Liters,
            "ml" => NetContentsUnit::Milliliters,
            "fl oz" => NetContentsUnit::FluidOunces,
            _ => NetContentsUnit::Other(unit.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            NetContentsUnit::Liters => "L",
            NetContentsUnit::Milliliters => "ml",
            NetContentsUnit::FluidOunces => "fl oz",
            NetContentsUnit::Other(unit) => unit,
        }
    }
}

impl fmt::Display for NetContentsUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for NetContentsUnit {
    fn from(unit: &str) -> Self {
        Self::parse(unit)
    }
}

impl From<String> for NetContentsUnit {
    fn from(unit: String) -> Self {
        Self::parse(&unit)
    }
}

impl From<NetContentsUnit> for String {
    fn from(unit: NetContentsUnit) -> Self {
        unit.as_str().to_string()
    }
}

/// Field values declared for a product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpectedFields {
    pub brand_name: String,
    pub product_class: String,
    /// Alcohol percentage, e.g. `"40"` or `"12.5"`
    pub alcohol_content: String,
    /// Net contents amount, e.g. `"750"`
    pub net_contents: String,
    pub net_contents_unit: NetContentsUnit,
}

/// One submission: expected values plus encoded label images in order
#[derive(Debug, Clone)]
pub struct Submission {
    pub expected: ExpectedFields,
    pub images: Vec<Vec<u8>>,
}

impl Submission {
    /// Build a submission, enforcing the configured limits
    pub fn new(
        expected: ExpectedFields,
        images: Vec<Vec<u8>>,
        limits: &LimitsConfig,
    ) -> Result<Self, SubmissionError> {
        if images.is_empty() {
            return Err(SubmissionError::NoImages);
        }

        if images.len() > limits.max_images {
            return Err(SubmissionError::TooManyImages {
                count: images.len(),
                limit: limits.max_images,
            });
        }

        if let Some((index, image)) = images
            .iter()
            .enumerate()
            .find(|(_, image)| image.len() > limits.max_image_bytes)
        {
            return Err(SubmissionError::ImageTooLarge {
                index,
                size: image.len(),
                limit: limits.max_image_bytes,
            });
        }

        Ok(Self { expected, images })
    }
}
