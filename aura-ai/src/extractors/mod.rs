//! Model adapters and the parallel inference fan-out
//!
//! # Adapters
//! 1. **skin_type** - oily / dry / normal / combination
//! 2. **age_estimator** - apparent age bucket
//! 3. **condition_classifier** - condition labels above threshold
//! 4. **acne_severity** - 0-4 acne grade
//! 5. **face_parsing** - semantic face zones
//!
//! # Parallel Execution
//! All five calls are issued together and joined. A failed or timed-out
//! model leaves its slot empty and adds one entry to `errors`; the combined
//! result is always produced.

pub mod acne_severity;
pub mod age_estimator;
pub mod classification;
pub mod condition_classifier;
pub mod face_parsing;
pub mod skin_type;

pub use acne_severity::AcneSeverityGrader;
pub use age_estimator::AgeEstimator;
pub use condition_classifier::ConditionClassifier;
pub use face_parsing::FaceParser;
pub use skin_type::SkinTypeClassifier;

use crate::services::InferenceTransport;
use crate::types::{ModelError, MultiModelResult};
use crate::utils::ImagePayload;
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Default per-model deadline
pub const DEFAULT_MODEL_TIMEOUT: Duration = Duration::from_secs(30);

/// Number of models in the fan-out
pub const MODEL_COUNT: usize = 5;

/// Shapes one hosted model's JSON body into a typed result
pub trait ModelAdapter: Send + Sync {
    type Output: Send;

    /// Identifier reported in `modelsUsed` and `errors`
    fn id(&self) -> &'static str;

    /// Path below the inference API base URL
    fn model_path(&self) -> &'static str;

    fn shape(&self, body: Value) -> Result<Self::Output, ModelError>;
}

/// Five-model inference fan-out
pub struct ParallelInference {
    transport: Arc<dyn InferenceTransport>,
    timeout: Duration,
}

impl ParallelInference {
    pub fn new(transport: Arc<dyn InferenceTransport>) -> Self {
        Self {
            transport,
            timeout: DEFAULT_MODEL_TIMEOUT,
        }
    }

    /// Override the per-model deadline
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run all five models over `image`
    pub async fn run(&self, image: &ImagePayload) -> MultiModelResult {
        let started = Instant::now();
        let bytes = image.bytes();

        let (skin_type, age, conditions, acne, parsing) = tokio::join!(
            self.call(&SkinTypeClassifier, bytes),
            self.call(&AgeEstimator, bytes),
            self.call(&ConditionClassifier, bytes),
            self.call(&AcneSeverityGrader, bytes),
            self.call(&FaceParser, bytes),
        );

        let mut tally = Tally::default();
        let skin_type = tally.record(SkinTypeClassifier.id(), skin_type);
        let age_estimation = tally.record(AgeEstimator.id(), age);
        let skin_conditions = tally.record(ConditionClassifier.id(), conditions);
        let acne_severity = tally.record(AcneSeverityGrader.id(), acne);
        let face_parsing = tally.record(FaceParser.id(), parsing);

        let result = MultiModelResult {
            skin_type,
            age_estimation,
            skin_conditions: skin_conditions.unwrap_or_default(),
            acne_severity,
            face_parsing,
            processing_time: started.elapsed().as_millis() as u64,
            models_used: tally.models_used,
            errors: tally.errors,
        };

        info!(
            models_used = result.models_used.len(),
            failed = result.errors.len(),
            processing_ms = result.processing_time,
            "Multi-model inference complete"
        );

        result
    }

    /// One model call under the per-model deadline
    async fn call<A: ModelAdapter>(
        &self,
        adapter: &A,
        bytes: &[u8],
    ) -> Result<A::Output, ModelError> {
        let request = self.transport.infer(adapter.model_path(), bytes);
        let body = tokio::time::timeout(self.timeout, request)
            .await
            .map_err(|_| ModelError::Timeout(self.timeout))??;
        adapter.shape(body)
    }
}

/// Per-model outcome bookkeeping for `modelsUsed` / `errors`
#[derive(Default)]
struct Tally {
    models_used: Vec<String>,
    errors: Vec<String>,
}

impl Tally {
    fn record<T>(&mut self, id: &str, outcome: Result<T, ModelError>) -> Option<T> {
        match outcome {
            Ok(value) => {
                debug!(model = id, "Model inference successful");
                self.models_used.push(id.to_string());
                Some(value)
            }
            Err(e) => {
                warn!(model = id, error = %e, "Model inference failed");
                self.errors.push(format!("{id} failed: {e}"));
                None
            }
        }
    }
}

// ============================================================================
// Mock Transport for Testing
// ============================================================================
