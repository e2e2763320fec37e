//! Acne severity grader (0 clear to 4 very severe)
//!
//! Model: imfarzanansari/skintelligent-acne

use super::classification::top_classification;
use super::ModelAdapter;
use crate::types::{AcneSeverity, ModelError};
use serde_json::Value;

/// Level for labels outside the severity table
pub const UNKNOWN_LABEL_LEVEL: u8 = 1;

/// Map a model label to (level, canonical label)
pub fn severity_for_label(label: &str) -> Option<(u8, &'static str)> {
    match label.to_lowercase().as_str() {
        "clear" => Some((0, "clear")),
        "mild" => Some((1, "mild")),
        "moderate" => Some((2, "moderate")),
        "severe" => Some((3, "severe")),
        "very severe" | "very_severe" => Some((4, "very_severe")),
        _ => None,
    }
}

pub struct AcneSeverityGrader;

impl ModelAdapter for AcneSeverityGrader {
    type Output = AcneSeverity;

    fn id(&self) -> &'static str {
        "skintelligent_acne"
    }

    fn model_path(&self) -> &'static str {
        "imfarzanansari/skintelligent-acne"
    }

    fn shape(&self, body: Value) -> Result<AcneSeverity, ModelError> {
        let top = top_classification(body)?;
        let (level, label) = match severity_for_label(&top.label) {
            Some((level, label)) => (level, label.to_string()),
            None => (UNKNOWN_LABEL_LEVEL, top.label),
        };
        Ok(AcneSeverity {
            level,
            label,
            confidence: top.score,
        })
    }
}
