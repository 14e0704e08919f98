//! Application Configuration
//!
//! OCR backend selection, submission limits and logging, stored in TOML format.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::vision::OcrBackend;

/// Application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// OCR collaborator settings
    pub ocr: OcrSettings,
    /// Submission limits
    pub limits: LimitsConfig,
    /// Logging settings
    pub logging: LoggingConfig,
}

/// OCR-related settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrSettings {
    /// OCR backend to use
    pub backend: OcrBackend,
    /// Base URL of the OCR service (http backend)
    pub endpoint: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for OcrSettings {
    fn default() -> Self {
        Self {
            backend: OcrBackend::Http,
            endpoint: "http://127.0.0.1:39835".to_string(),
            timeout_secs: 60,
        }
    }
}

/// Limits applied to incoming submissions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum size of a single encoded image in bytes
    pub max_image_bytes: usize,
    /// Maximum number of images per submission
    pub max_images: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_image_bytes: 5 * 1024 * 1024,
            max_images: 10,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when RUST_LOG is not set
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Load configuration from file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {:?}", path))?;
    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Invalid config file {:?}", path))?;
    Ok(config)
}

/// Save configuration to file
pub fn save_config(config: &AppConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Default configuration file location
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "labelverify", "LabelVerify")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Load the given file, or the default location if it exists, or defaults
///
/// An explicitly requested file must exist and parse.
pub fn load_or_default(path: Option<&Path>) -> Result<AppConfig> {
    if let Some(path) = path {
        return load_config(path);
    }

    match default_config_path() {
        Some(path) if path.exists() => load_config(&path),
        _ => Ok(AppConfig::default()),
    }
}
