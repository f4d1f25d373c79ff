//! Error types for the fittrack_core library.

use std::io;

use crate::analysis::AnalysisError;
use crate::settings::ValidationError;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for fittrack_core operations
///
/// The store and the calorie formulas never fail; everything here comes from
/// the edges (config files, the settings form, the analysis pipeline).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Settings form rejected a field
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Meal analysis could not produce an estimate
    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
