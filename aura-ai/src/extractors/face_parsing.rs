//! Semantic face parser
//!
//! Model: jonathandinu/face-parsing. Returns one segment per region with a
//! base64 PNG mask; the zone area is the mask's set-pixel count.

use super::ModelAdapter;
use crate::types::{FaceParsingResult, ModelError, ParsedZone};
use crate::utils::image_payload::decode_lenient;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// Area assigned to a segment whose mask is missing or undecodable
pub const FALLBACK_ZONE_AREA: u64 = 1;

pub const SKIN_LABEL: &str = "skin";

#[derive(Debug, Deserialize)]
struct Segment {
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    score: Option<f64>,
    #[serde(default)]
    mask: Option<String>,
}

pub struct FaceParser;

impl ModelAdapter for FaceParser {
    type Output = FaceParsingResult;

    fn id(&self) -> &'static str {
        "face_parsing"
    }

    fn model_path(&self) -> &'static str {
        "jonathandinu/face-parsing"
    }

    fn shape(&self, body: Value) -> Result<FaceParsingResult, ModelError> {
        if let Some(message) = body.get("error").and_then(Value::as_str) {
            return Err(ModelError::Parse(format!("API error: {message}")));
        }

        let segments: Vec<Segment> = serde_json::from_value(body)
            .map_err(|e| ModelError::Parse(format!("Unexpected segmentation body: {e}")))?;

        let zones: Vec<ParsedZone> = segments
            .into_iter()
            .map(|segment| {
                let label = segment
                    .label
                    .filter(|l| !l.is_empty())
                    .unwrap_or_else(|| "unknown".to_string());
                let area = segment
                    .mask
                    .as_deref()
                    .and_then(mask_pixel_count)
                    .unwrap_or(FALLBACK_ZONE_AREA);
                ParsedZone {
                    label,
                    area,
                    percentage: segment.score.unwrap_or(0.0) * 100.0,
                }
            })
            .collect();

        let skin_area = zones
            .iter()
            .find(|z| z.label == SKIN_LABEL)
            .map_or(0, |z| z.area);
        let total_area = zones.iter().map(|z| z.area).sum();

        Ok(FaceParsingResult {
            zones,
            skin_area,
            total_area,
        })
    }
}

/// Count non-zero pixels in a base64 (optionally data-URL) mask image
pub fn mask_pixel_count(mask: &str) -> Option<u64> {
    let data = mask.split_once(',').map_or(mask, |(_, data)| data);
    let bytes = decode_lenient(data).ok()?;
    match image::load_from_memory(&bytes) {
        Ok(img) => Some(img.to_luma8().pixels().filter(|p| p.0[0] > 0).count() as u64),
        Err(e) => {
            debug!(error = %e, "Segmentation mask not decodable");
            None
        }
    }
}
