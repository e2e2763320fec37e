//! Skin type classifier (oily / dry / normal / combination)
//!
//! Model: dima806/skin_types_image_detection

use super::classification::top_classification;
use super::ModelAdapter;
use crate::types::{ModelError, SkinTypeResult};
use serde_json::Value;

pub struct SkinTypeClassifier;

impl ModelAdapter for SkinTypeClassifier {
    type Output = SkinTypeResult;

    fn id(&self) -> &'static str {
        "skin_type_detection"
    }

    fn model_path(&self) -> &'static str {
        "dima806/skin_types_image_detection"
    }

    fn shape(&self, body: Value) -> Result<SkinTypeResult, ModelError> {
        let top = top_classification(body)?;
        Ok(SkinTypeResult {
            label: top.label.to_lowercase(),
            score: top.score,
        })
    }
}
