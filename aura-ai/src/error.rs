//! Error types for aura-ai
//!
//! Only input-level problems surface as `AnalysisError`. Model and detector
//! failures are absorbed at their boundaries and reported inside results.

use thiserror::Error;

/// Face mesh detector error
#[derive(Debug, Error)]
pub enum DetectorError {
    /// No backend configured or the model could not be loaded
    #[error("Face mesh unavailable: {0}")]
    Unavailable(String),

    /// Backend call failed
    #[error("Face mesh request failed: {0}")]
    Request(String),

    /// Backend answered with an unexpected body
    #[error("Face mesh response invalid: {0}")]
    InvalidResponse(String),
}

/// Analysis error
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Malformed request input (bad base64, out-of-range age)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Image bytes could not be decoded
    #[error("Image decode error: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// Detector error surfaced by the landmark extractor
    #[error(transparent)]
    Detector(#[from] DetectorError),

    /// HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// aura-common error (configuration, IO)
    #[error("Common error: {0}")]
    Common(#[from] aura_common::Error),
}

/// Result type for analysis operations
pub type AnalysisResult<T> = Result<T, AnalysisError>;
