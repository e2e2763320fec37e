//! Request workflow: face gate, inference fan-out, fusion

pub mod pipeline;

pub use pipeline::{AnalysisOutcome, SkinAnalysis, SkinAnalysisPipeline, DECLARED_AGE_RANGE};
