//! Image-classification response parsing shared by the label adapters

use crate::types::ModelError;
use serde::Deserialize;
use serde_json::Value;

/// One `{label, score}` entry
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Classification {
    pub label: String,
    pub score: f64,
}

/// Parse a classifier body into entries sorted by descending score
///
/// Accepts the flat `[{label, score}, ...]` form and the batched
/// `[[{label, score}, ...]]` form (first batch used). An API error object
/// (`{"error": "..."}`) becomes a parse error carrying its message.
pub fn parse_classifications(body: Value) -> Result<Vec<Classification>, ModelError> {
    if let Some(message) = body.get("error").and_then(Value::as_str) {
        return Err(ModelError::Parse(format!("API error: {message}")));
    }

    let body = match body {
        Value::Array(mut items) if items.first().is_some_and(Value::is_array) => {
            items.swap_remove(0)
        }
        other => other,
    };

    let mut entries: Vec<Classification> = serde_json::from_value(body)
        .map_err(|e| ModelError::Parse(format!("Unexpected classifier body: {e}")))?;

    entries.sort_by(|a, b| b.score.total_cmp(&a.score));
    Ok(entries)
}

/// Highest-scoring entry; empty label lists are `ModelError::Empty`
pub fn top_classification(body: Value) -> Result<Classification, ModelError> {
    parse_classifications(body)?
        .into_iter()
        .next()
        .ok_or(ModelError::Empty)
}
