//! Error types for the core crate.

use crate::shapes::ShapeId;
use thiserror::Error;

/// Scene store errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    #[error("Shape id {0} is already in the scene")]
    DuplicateId(ShapeId),
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// Viewport math errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViewportError {
    #[error("Degenerate viewport: {width}x{height} pixels")]
    Degenerate { width: f64, height: f64 },
}

/// Result type for viewport operations.
pub type ViewportResult<T> = Result<T, ViewportError>;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;
