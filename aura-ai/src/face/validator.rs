//! Face presence gate
//!
//! Runs before any paid inference. Decode failures are input errors; a
//! detector that cannot run fails open so a broken model never blocks a
//! consultation.

use crate::error::AnalysisResult;
use crate::face::detector::FaceDetector;
use crate::face::landmarks::bounding_box;
use crate::types::FaceValidationResult;
use crate::utils::ImagePayload;
use image::DynamicImage;
use std::sync::Arc;
use tracing::{debug, warn};

/// Faces covering less than this share of the image (percent) are too small
pub const MIN_FACE_AREA_PERCENT: f64 = 5.0;

/// Area (percent) at which confidence saturates at 1.0
pub const FULL_CONFIDENCE_AREA_PERCENT: f64 = 30.0;

pub const SMALL_FACE_CONFIDENCE: f64 = 0.3;
pub const FAIL_OPEN_CONFIDENCE: f64 = 0.5;

pub const MSG_NO_FACE: &str = "ไม่พบใบหน้าในภาพ กรุณาถ่ายภาพใหม่ให้เห็นใบหน้าชัดเจน";
pub const MSG_FACE_TOO_SMALL: &str = "ใบหน้ามีขนาดเล็กเกินไป กรุณาขยับเข้าใกล้กล้องมากขึ้น";
pub const MSG_FACE_OK: &str = "ตรวจพบใบหน้าเรียบร้อย";
pub const MSG_UNVERIFIED: &str = "ไม่สามารถตรวจสอบใบหน้าได้ ดำเนินการต่อ";

pub struct FaceValidator {
    detector: Arc<FaceDetector>,
}

impl FaceValidator {
    pub fn new(detector: Arc<FaceDetector>) -> Self {
        Self { detector }
    }

    /// Validate a data URL or bare base64 image
    pub async fn validate_base64(&self, input: &str) -> AnalysisResult<FaceValidationResult> {
        let payload = ImagePayload::from_base64(input)?;
        self.validate(&payload).await
    }

    /// Validate an already-parsed payload
    pub async fn validate(&self, payload: &ImagePayload) -> AnalysisResult<FaceValidationResult> {
        let image = payload.decode()?;
        Ok(self.validate_image(&image).await)
    }

    /// Validate a decoded image
    pub async fn validate_image(&self, image: &DynamicImage) -> FaceValidationResult {
        let faces = match self.detector.detect(image).await {
            Ok(faces) => faces,
            Err(e) => {
                warn!(error = %e, "Face validation unavailable, proceeding without it");
                return FaceValidationResult {
                    has_face: true,
                    confidence: FAIL_OPEN_CONFIDENCE,
                    face_area: 0.0,
                    message: MSG_UNVERIFIED.to_string(),
                };
            }
        };

        let Some(landmarks) = faces.first().filter(|l| !l.is_empty()) else {
            debug!("No face in image");
            return FaceValidationResult {
                has_face: false,
                confidence: 0.0,
                face_area: 0.0,
                message: MSG_NO_FACE.to_string(),
            };
        };

        let face_area = (bounding_box(landmarks).area() * 100.0).clamp(0.0, 100.0);
        debug!(face_area, "Face found");

        if face_area < MIN_FACE_AREA_PERCENT {
            return FaceValidationResult {
                has_face: true,
                confidence: SMALL_FACE_CONFIDENCE,
                face_area,
                message: MSG_FACE_TOO_SMALL.to_string(),
            };
        }

        FaceValidationResult {
            has_face: true,
            confidence: (face_area / FULL_CONFIDENCE_AREA_PERCENT).min(1.0),
            face_area,
            message: MSG_FACE_OK.to_string(),
        }
    }
}
