// Report Context - plain-text summary of model results for the report generator

use crate::extractors::MODEL_COUNT;
use crate::types::MultiModelResult;

/// Conditions listed in the context block
const MAX_LISTED_CONDITIONS: usize = 3;

/// Build the context block handed to the downstream report generator
///
/// One `Key: value` line per available model result, then the models-used
/// ratio and processing time. Missing models contribute no line.
pub fn build_report_context(result: &MultiModelResult) -> String {
    let mut lines = Vec::new();

    if let Some(skin) = &result.skin_type {
        lines.push(format!(
            "Skin Type: {} ({}% confidence)",
            skin.label,
            percent(skin.score)
        ));
    }

    if let Some(age) = &result.age_estimation {
        lines.push(format!(
            "Estimated Skin Age: {} years (range: {})",
            age.estimated_age, age.age_range
        ));
    }

    if !result.skin_conditions.is_empty() {
        let conditions = result
            .skin_conditions
            .iter()
            .take(MAX_LISTED_CONDITIONS)
            .map(|c| format!("{} ({}%)", c.condition, percent(c.confidence)))
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!("Detected Conditions: {conditions}"));
    }

    if let Some(acne) = &result.acne_severity {
        lines.push(format!("Acne Severity: Level {}/4 ({})", acne.level, acne.label));
    }

    if let Some(parsing) = &result.face_parsing {
        lines.push(format!("Face Zones Detected: {} regions", parsing.zones.len()));
    }

    lines.push(format!(
        "Models Used: {}/{}",
        result.models_used.len(),
        MODEL_COUNT
    ));
    lines.push(format!("Processing Time: {}ms", result.processing_time));

    lines.join("\n")
}

fn percent(score: f64) -> i64 {
    (score * 100.0).round() as i64
}
