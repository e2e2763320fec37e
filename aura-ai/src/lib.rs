//! aura-ai - hybrid skin analysis aggregator
//!
//! Face presence gate, face mesh landmark extraction, a five-model hosted
//! inference fan-out, and fusion of the model outputs into an 8-metric skin
//! score vector for the report generator.

pub mod config;
pub mod error;
pub mod extractors; // Model adapters + parallel fan-out
pub mod face; // Detector handle, landmarks, presence gate
pub mod fusion; // Signal policy + fuser
pub mod services;
pub mod types;
pub mod utils;
pub mod workflow; // Per-request orchestration

pub use crate::error::{AnalysisError, AnalysisResult};
pub use crate::types::{
    FaceDetectionResult, FaceValidationResult, ModelError, MultiModelResult, SignalVector,
};
pub use crate::workflow::{AnalysisOutcome, SkinAnalysis, SkinAnalysisPipeline};
