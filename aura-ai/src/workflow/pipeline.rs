//! Skin analysis pipeline
//!
//! Orchestrates one consultation request end to end:
//! - **Phase 0**: Parse the image payload and check the declared age
//! - **Phase 1**: Face presence gate (a rejection stops before any paid call)
//! - **Phase 2**: Five-model inference fan-out
//! - **Phase 3**: Signal fusion and report context
//!
//! # Error Handling
//! Only input problems are errors. Model failures degrade the result and
//! are listed in `models.errors`.
//!
//! # Example
//! ```rust,ignore
//! let pipeline = SkinAnalysisPipeline::from_config(&config, token)?;
//! match pipeline.analyze(&data_url, 34).await? {
//!     AnalysisOutcome::Completed(analysis) => println!("{:?}", analysis.signals),
//!     AnalysisOutcome::Rejected(validation) => println!("{}", validation.message),
//! }
//! ```

use crate::error::{AnalysisError, AnalysisResult};
use crate::extractors::ParallelInference;
use crate::face::{FaceDetector, FaceValidator, HttpFaceMeshLoader};
use crate::fusion::{build_report_context, fuse_signals};
use crate::services::HuggingFaceClient;
use crate::types::{FaceValidationResult, MultiModelResult, SignalVector};
use crate::utils::ImagePayload;
use aura_common::config::TomlConfig;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, info_span, Instrument};
use uuid::Uuid;

/// Accepted declared ages in years
pub const DECLARED_AGE_RANGE: RangeInclusive<u32> = 1..=120;

/// Completed analysis for one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkinAnalysis {
    pub request_id: Uuid,
    pub declared_age: u32,
    pub validation: FaceValidationResult,
    pub models: MultiModelResult,
    pub signals: SignalVector,
    pub report_context: String,
}

/// Pipeline outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum AnalysisOutcome {
    /// Face gate said no; nothing else ran
    Rejected(FaceValidationResult),
    Completed(Box<SkinAnalysis>),
}

pub struct SkinAnalysisPipeline {
    validator: FaceValidator,
    inference: ParallelInference,
    detector: Arc<FaceDetector>,
}

impl SkinAnalysisPipeline {
    /// Create a pipeline over an existing detector handle and inference fan-out
    pub fn new(detector: Arc<FaceDetector>, inference: ParallelInference) -> Self {
        Self {
            validator: FaceValidator::new(Arc::clone(&detector)),
            inference,
            detector,
        }
    }

    /// Build the production pipeline from configuration
    pub fn from_config(config: &TomlConfig, api_token: Option<String>) -> AnalysisResult<Self> {
        let detector = Arc::new(FaceDetector::new(Arc::new(HttpFaceMeshLoader::new(
            config.face_mesh.clone(),
        ))));
        let client = HuggingFaceClient::from_config(&config.inference, api_token)?;
        let inference = ParallelInference::new(Arc::new(client))
            .with_timeout(Duration::from_millis(config.inference.timeout_ms));
        Ok(Self::new(detector, inference))
    }

    /// Shared detector handle (also used by the landmark extractor)
    pub fn detector(&self) -> &Arc<FaceDetector> {
        &self.detector
    }

    /// Analyze one image for a customer of `declared_age` years
    pub async fn analyze(&self, image: &str, declared_age: u32) -> AnalysisResult<AnalysisOutcome> {
        let request_id = Uuid::new_v4();
        let span = info_span!("skin_analysis", request_id = %request_id);
        self.analyze_inner(request_id, image, declared_age)
            .instrument(span)
            .await
    }

    async fn analyze_inner(
        &self,
        request_id: Uuid,
        image: &str,
        declared_age: u32,
    ) -> AnalysisResult<AnalysisOutcome> {
        // Phase 0: input checks
        if !DECLARED_AGE_RANGE.contains(&declared_age) {
            return Err(AnalysisError::InvalidInput(format!(
                "Declared age {declared_age} outside {}-{}",
                DECLARED_AGE_RANGE.start(),
                DECLARED_AGE_RANGE.end()
            )));
        }
        let payload = ImagePayload::from_base64(image)?;
        debug!(
            bytes = payload.bytes().len(),
            mime_type = payload.mime_type().unwrap_or("unspecified"),
            "Image payload decoded"
        );

        // Phase 1: face gate
        let validation = self.validator.validate(&payload).await?;
        if !validation.has_face {
            info!(confidence = validation.confidence, "Analysis rejected by face gate");
            return Ok(AnalysisOutcome::Rejected(validation));
        }

        // Phase 2: inference fan-out
        let models = self.inference.run(&payload).await;

        // Phase 3: fusion
        let signals = fuse_signals(&models, declared_age);
        let report_context = build_report_context(&models);

        info!(
            models_used = models.models_used.len(),
            processing_ms = models.processing_time,
            "Analysis complete"
        );

        Ok(AnalysisOutcome::Completed(Box::new(SkinAnalysis {
            request_id,
            declared_age,
            validation,
            models,
            signals,
            report_context,
        })))
    }
}
