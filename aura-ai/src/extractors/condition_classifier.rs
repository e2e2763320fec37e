//! Skin condition classifier
//!
//! Model: Tanishq77/skin-condition-classifier. Every label above the
//! threshold is kept; an empty list is a valid result.

use super::classification::parse_classifications;
use super::ModelAdapter;
use crate::types::{ModelError, SkinCondition};
use serde_json::Value;

/// Labels at or below this score are dropped
pub const MIN_CONDITION_SCORE: f64 = 0.1;

pub struct ConditionClassifier;

impl ModelAdapter for ConditionClassifier {
    type Output = Vec<SkinCondition>;

    fn id(&self) -> &'static str {
        "skin_condition_classifier"
    }

    fn model_path(&self) -> &'static str {
        "Tanishq77/skin-condition-classifier"
    }

    fn shape(&self, body: Value) -> Result<Vec<SkinCondition>, ModelError> {
        Ok(parse_classifications(body)?
            .into_iter()
            .filter(|c| c.score > MIN_CONDITION_SCORE)
            .map(|c| SkinCondition {
                condition: c.label.to_lowercase(),
                confidence: c.score,
                severity: None,
            })
            .collect())
    }
}
