//! Core Types for Aura AI
//!
//! Public surface of the skin-analysis aggregator:
//! - `FaceValidationResult` - face presence gate
//! - `FaceDetectionResult` - landmarks, bounding box, measurements, zones
//! - `MultiModelResult` - combined output of the five hosted classifiers
//! - `SignalVector` - fused 8-metric score vector
//!
//! All types serialize camelCase for the downstream report generator.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

// ============================================================================
// Face Types
// ============================================================================

/// Normalized face mesh point (x, y in 0.0-1.0 image space, z relative depth)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl Landmark {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Planar (x, y) distance; depth is ignored
    pub fn distance_2d(&self, other: &Landmark) -> f64 {
        ((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
    }
}

/// Axis-aligned rectangle in normalized coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FaceRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl FaceRect {
    pub const EMPTY: FaceRect = FaceRect {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// Area as a fraction of the normalized image (0.0-1.0)
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// Derived facial measurements for one landmark set
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceMeasurements {
    pub face_width: f64,
    pub face_height: f64,
    pub eye_distance: f64,
    pub nose_width: f64,
    pub mouth_width: f64,
    /// Face height / face width, rounded to 3 decimals
    pub golden_ratio: f64,
    /// 0-100, rounded to 1 decimal
    pub symmetry_score: f64,
}

/// The eight named analysis zones
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceZones {
    pub forehead: FaceRect,
    pub left_eye: FaceRect,
    pub right_eye: FaceRect,
    pub nose: FaceRect,
    pub left_cheek: FaceRect,
    pub right_cheek: FaceRect,
    pub mouth: FaceRect,
    pub chin: FaceRect,
}

/// Landmark extraction result
///
/// Callers must check `detected` before trusting any other field: when no
/// face is found every numeric field is zero and every zone is empty.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceDetectionResult {
    pub detected: bool,
    pub landmarks: Vec<Landmark>,
    pub bounding_box: FaceRect,
    pub measurements: FaceMeasurements,
    pub zones: FaceZones,
}

impl FaceDetectionResult {
    /// All-zero result for frames without a face
    pub fn not_detected() -> Self {
        Self::default()
    }
}

/// Face presence gate result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceValidationResult {
    pub has_face: bool,
    /// Always within 0.0-1.0
    pub confidence: f64,
    /// Face bounding box area as a percentage of the image (0-100)
    pub face_area: f64,
    /// Localized message for direct display
    pub message: String,
}

// ============================================================================
// Model Result Types
// ============================================================================

/// Skin type classification ('oily' | 'dry' | 'normal' | 'combination')
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkinTypeResult {
    pub label: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeEstimation {
    pub estimated_age: i32,
    /// Raw classifier label, e.g. "30-39"
    pub age_range: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkinCondition {
    /// 'acne' | 'eczema' | 'rosacea' | 'keratosis' | 'milia' | 'carcinoma'
    pub condition: String,
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcneSeverity {
    /// 0 (clear) to 4 (very severe)
    pub level: u8,
    pub label: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedZone {
    pub label: String,
    /// Mask pixel count
    pub area: u64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceParsingResult {
    pub zones: Vec<ParsedZone>,
    pub skin_area: u64,
    pub total_area: u64,
}

/// Combined result of the five-model fan-out
///
/// Always produced, regardless of how many models failed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiModelResult {
    pub skin_type: Option<SkinTypeResult>,
    pub age_estimation: Option<AgeEstimation>,
    pub skin_conditions: Vec<SkinCondition>,
    pub acne_severity: Option<AcneSeverity>,
    pub face_parsing: Option<FaceParsingResult>,
    /// Wall-clock milliseconds for the whole fan-out
    pub processing_time: u64,
    /// Identifiers of models that returned a result
    pub models_used: Vec<String>,
    /// One entry per failed model, "<id> failed: <reason>"
    pub errors: Vec<String>,
}

/// Adapter-boundary error for a single model call
///
/// Recorded in `MultiModelResult::errors`, never propagated.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Non-2xx response from the inference endpoint
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// Transport failure (connect, TLS, reset)
    #[error("Network error: {0}")]
    Network(String),

    /// Response body was not the expected shape
    #[error("Parse error: {0}")]
    Parse(String),

    /// Classifier returned no labels
    #[error("Empty response")]
    Empty,

    /// Call exceeded the per-model deadline
    #[error("Timed out after {0:?}")]
    Timeout(Duration),
}

// ============================================================================
// Signal Vector
// ============================================================================

/// Fused 8-metric skin score vector, each an integer in 0-100
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalVector {
    pub spots: u8,
    pub wrinkles: u8,
    pub texture: u8,
    pub pores: u8,
    pub uv_spots: u8,
    pub brown_spots: u8,
    pub red_areas: u8,
    pub porphyrins: u8,
}
