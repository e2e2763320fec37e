//! Apparent-age classifier
//!
//! Model: nateraw/vit-age-classifier. Labels are decade-ish buckets such as
//! "30-39"; the estimate is the rounded bucket midpoint.

use super::classification::top_classification;
use super::ModelAdapter;
use crate::types::{AgeEstimation, ModelError};
use serde_json::Value;

/// Estimate used when the label carries no "low-high" range (e.g. "more than 70")
pub const DEFAULT_ESTIMATED_AGE: i32 = 35;

pub struct AgeEstimator;

impl ModelAdapter for AgeEstimator {
    type Output = AgeEstimation;

    fn id(&self) -> &'static str {
        "vit_age_classifier"
    }

    fn model_path(&self) -> &'static str {
        "nateraw/vit-age-classifier"
    }

    fn shape(&self, body: Value) -> Result<AgeEstimation, ModelError> {
        let top = top_classification(body)?;
        let estimated_age = range_midpoint(&top.label).unwrap_or(DEFAULT_ESTIMATED_AGE);
        Ok(AgeEstimation {
            estimated_age,
            age_range: top.label,
            confidence: top.score,
        })
    }
}

/// Rounded midpoint of the first "<low>-<high>" digit run in `label`
pub fn range_midpoint(label: &str) -> Option<i32> {
    let bytes = label.as_bytes();
    let mut start = 0;
    while start < bytes.len() {
        if !bytes[start].is_ascii_digit() {
            start += 1;
            continue;
        }
        let low_end = digit_run_end(bytes, start);
        if bytes.get(low_end) == Some(&b'-') {
            let high_start = low_end + 1;
            let high_end = digit_run_end(bytes, high_start);
            if high_end > high_start {
                let low: i32 = label[start..low_end].parse().ok()?;
                let high: i32 = label[high_start..high_end].parse().ok()?;
                return Some(((low + high) as f64 / 2.0).round() as i32);
            }
        }
        start = low_end;
    }
    None
}

fn digit_run_end(bytes: &[u8], from: usize) -> usize {
    let mut end = from;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    end
}
