//! Deformer presets and point files.
//!
//! Both are plain serde documents. The format follows the file extension:
//! ```text
//! *.yaml | *.yml  - YAML
//! *.json          - JSON (pretty-printed on save)
//! ```

mod points;
mod preset;

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;

use noisedeform_common::ParamError;

pub use points::PointSet;
pub use preset::{DeformerPreset, LocatorPose};

/// Errors from reading, writing or validating preset and point files.
#[derive(Debug, thiserror::Error)]
pub enum PresetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported file format: {0:?}")]
    UnsupportedFormat(String),
    #[error("invalid noise parameters: {0}")]
    InvalidParams(#[from] ParamError),
    #[error("num_tasks must be at least 1, got {0}")]
    InvalidTaskCount(usize),
}

/// On-disk document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
}

impl Format {
    /// Pick the format from a path's extension.
    pub fn from_path(path: &Path) -> Result<Self, PresetError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "yaml" | "yml" => Ok(Format::Yaml),
            "json" => Ok(Format::Json),
            _ => Err(PresetError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

pub(crate) fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T, PresetError> {
    let format = Format::from_path(path)?;
    let text = std::fs::read_to_string(path)?;
    let value = match format {
        Format::Yaml => serde_yaml::from_str(&text)?,
        Format::Json => serde_json::from_str(&text)?,
    };
    tracing::debug!(path = %path.display(), ?format, "document loaded");
    Ok(value)
}

pub(crate) fn write_document<T: Serialize>(path: &Path, value: &T) -> Result<(), PresetError> {
    let format = Format::from_path(path)?;
    let text = match format {
        Format::Yaml => serde_yaml::to_string(value)?,
        Format::Json => serde_json::to_string_pretty(value)?,
    };
    std::fs::write(path, text)?;
    tracing::debug!(path = %path.display(), ?format, "document written");
    Ok(())
}

pub fn crate_info() -> &'static str {
    "noisedeform-preset v0.1.0"
}
