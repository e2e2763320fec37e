//! Face mesh landmark tables and geometry
//!
//! Index tables follow the 468-point face mesh topology. Zones are
//! min/max rectangles over a fixed index list per region, not a segmentation.

use crate::types::{FaceDetectionResult, FaceMeasurements, FaceRect, FaceZones, Landmark};
use serde::Serialize;

/// Nose tip; horizontal center for symmetry
const NOSE_CENTER: usize = 1;

/// Chin outline (not part of the region table)
const CHIN: &[usize] = &[152, 377, 400, 378, 379, 365, 397, 288, 361, 323];

/// Named landmark regions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FacialRegion {
    FaceOval,
    LeftEye,
    RightEye,
    LeftEyebrow,
    RightEyebrow,
    NoseBridge,
    NoseTip,
    Nostrils,
    UpperLip,
    LowerLip,
    LipOutline,
    Forehead,
    LeftCheek,
    RightCheek,
    Jawline,
    ForeheadWrinkles,
    GlabellarLines,
    CrowsFeet,
    NasolabialFolds,
}

impl FacialRegion {
    pub const ALL: [FacialRegion; 19] = [
        FacialRegion::FaceOval,
        FacialRegion::LeftEye,
        FacialRegion::RightEye,
        FacialRegion::LeftEyebrow,
        FacialRegion::RightEyebrow,
        FacialRegion::NoseBridge,
        FacialRegion::NoseTip,
        FacialRegion::Nostrils,
        FacialRegion::UpperLip,
        FacialRegion::LowerLip,
        FacialRegion::LipOutline,
        FacialRegion::Forehead,
        FacialRegion::LeftCheek,
        FacialRegion::RightCheek,
        FacialRegion::Jawline,
        FacialRegion::ForeheadWrinkles,
        FacialRegion::GlabellarLines,
        FacialRegion::CrowsFeet,
        FacialRegion::NasolabialFolds,
    ];

    /// Wrinkle-mapping regions
    pub const WRINKLE_ZONES: [FacialRegion; 4] = [
        FacialRegion::ForeheadWrinkles,
        FacialRegion::GlabellarLines,
        FacialRegion::CrowsFeet,
        FacialRegion::NasolabialFolds,
    ];

    pub fn indices(self) -> &'static [usize] {
        match self {
            FacialRegion::FaceOval => &[
                10, 338, 297, 332, 284, 251, 389, 356, 454, 323, 361, 288, 397, 365, 379, 378,
                400, 377, 152, 148, 176, 149, 150, 136, 172, 58, 132, 93, 234, 127, 162, 21, 54,
                103, 67, 109,
            ],
            FacialRegion::LeftEye => &[
                33, 7, 163, 144, 145, 153, 154, 155, 133, 173, 157, 158, 159, 160, 161, 246,
            ],
            FacialRegion::RightEye => &[
                362, 382, 381, 380, 374, 373, 390, 249, 263, 466, 388, 387, 386, 385, 384, 398,
            ],
            FacialRegion::LeftEyebrow => &[70, 63, 105, 66, 107, 55, 65, 52, 53, 46],
            FacialRegion::RightEyebrow => &[300, 293, 334, 296, 336, 285, 295, 282, 283, 276],
            FacialRegion::NoseBridge => &[6, 197, 195, 5, 4, 1, 19, 94, 2],
            FacialRegion::NoseTip => &[1, 2, 98, 327],
            FacialRegion::Nostrils => &[129, 209, 49, 279, 429, 358],
            FacialRegion::UpperLip => &[61, 185, 40, 39, 37, 0, 267, 269, 270, 409, 291],
            FacialRegion::LowerLip => &[146, 91, 181, 84, 17, 314, 405, 321, 375, 291],
            FacialRegion::LipOutline => &[
                61, 146, 91, 181, 84, 17, 314, 405, 321, 375, 291, 409, 270, 269, 267, 0, 37, 39,
                40, 185,
            ],
            FacialRegion::Forehead => &[10, 338, 297, 332, 284, 251, 21, 54, 103, 67, 109],
            FacialRegion::LeftCheek => &[116, 117, 118, 119, 120, 121, 128, 245, 193, 55],
            FacialRegion::RightCheek => &[345, 346, 347, 348, 349, 350, 357, 465, 417, 285],
            FacialRegion::Jawline => &[
                152, 148, 176, 149, 150, 136, 172, 58, 132, 93, 234, 127, 162, 21, 54, 103, 67,
                109, 10,
            ],
            FacialRegion::ForeheadWrinkles => &[10, 151, 9, 8, 168, 6, 197, 195, 5],
            FacialRegion::GlabellarLines => &[9, 8, 168, 6, 197, 195, 5, 4],
            FacialRegion::CrowsFeet => &[
                33, 246, 161, 160, 159, 158, 157, 173, 133, 362, 398, 384, 385, 386, 387, 388,
                466, 263,
            ],
            FacialRegion::NasolabialFolds => &[205, 50, 101, 36, 206, 425, 280, 330, 266, 426],
        }
    }
}

/// Landmark index pairs for facial proportions
pub mod proportion_points {
    pub const FACE_WIDTH: (usize, usize) = (234, 454);
    pub const FACE_HEIGHT: (usize, usize) = (10, 152);
    pub const EYE_DISTANCE: (usize, usize) = (33, 263);
    pub const NOSE_WIDTH: (usize, usize) = (129, 358);
    pub const MOUTH_WIDTH: (usize, usize) = (61, 291);
    pub const FOREHEAD_TO_EYES: (usize, usize) = (10, 168);
    pub const EYES_TO_NOSE: (usize, usize) = (168, 1);
    pub const NOSE_TO_LIPS: (usize, usize) = (1, 17);
    pub const LIPS_TO_CHIN: (usize, usize) = (17, 152);
}

/// Left/right counterparts compared for symmetry (first index of each side's region)
const SYMMETRY_PAIRS: [(FacialRegion, FacialRegion); 3] = [
    (FacialRegion::LeftEye, FacialRegion::RightEye),
    (FacialRegion::LeftEyebrow, FacialRegion::RightEyebrow),
    (FacialRegion::LeftCheek, FacialRegion::RightCheek),
];

/// Vertical thirds of the face
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerticalProportions {
    pub forehead_to_eyes: f64,
    pub eyes_to_nose: f64,
    pub nose_to_lips: f64,
    pub lips_to_chin: f64,
}

/// Build a full detection result from one landmark set
pub fn analyze_landmarks(landmarks: Vec<Landmark>) -> FaceDetectionResult {
    if landmarks.is_empty() {
        return FaceDetectionResult::not_detected();
    }

    let bounding_box = bounding_box(&landmarks);
    let measurements = measure(&landmarks);
    let zones = extract_zones(&landmarks);

    FaceDetectionResult {
        detected: true,
        landmarks,
        bounding_box,
        measurements,
        zones,
    }
}

/// Bounding rectangle over every landmark
pub fn bounding_box(landmarks: &[Landmark]) -> FaceRect {
    bounds(landmarks.iter())
}

/// Bounding rectangle over the given indices; indices past the end are skipped
pub fn zone_bounds(landmarks: &[Landmark], indices: &[usize]) -> FaceRect {
    bounds(indices.iter().filter_map(|&i| landmarks.get(i)))
}

fn bounds<'a>(points: impl Iterator<Item = &'a Landmark>) -> FaceRect {
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    let mut any = false;

    for p in points {
        any = true;
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }

    if !any {
        return FaceRect::EMPTY;
    }

    FaceRect {
        x: min_x,
        y: min_y,
        width: max_x - min_x,
        height: max_y - min_y,
    }
}

/// The eight analysis zones
pub fn extract_zones(landmarks: &[Landmark]) -> FaceZones {
    let region = |r: FacialRegion| zone_bounds(landmarks, r.indices());
    FaceZones {
        forehead: region(FacialRegion::Forehead),
        left_eye: region(FacialRegion::LeftEye),
        right_eye: region(FacialRegion::RightEye),
        nose: region(FacialRegion::NoseBridge),
        left_cheek: region(FacialRegion::LeftCheek),
        right_cheek: region(FacialRegion::RightCheek),
        mouth: region(FacialRegion::LipOutline),
        chin: zone_bounds(landmarks, CHIN),
    }
}

/// Distance between two indexed landmarks; 0 if either is missing
fn pair_distance(landmarks: &[Landmark], (a, b): (usize, usize)) -> f64 {
    match (landmarks.get(a), landmarks.get(b)) {
        (Some(p1), Some(p2)) => p1.distance_2d(p2),
        _ => 0.0,
    }
}

pub fn measure(landmarks: &[Landmark]) -> FaceMeasurements {
    use proportion_points::*;

    let face_width = pair_distance(landmarks, FACE_WIDTH);
    let face_height = pair_distance(landmarks, FACE_HEIGHT);
    let golden_ratio = if face_width > 0.0 {
        face_height / face_width
    } else {
        0.0
    };

    FaceMeasurements {
        face_width,
        face_height,
        eye_distance: pair_distance(landmarks, EYE_DISTANCE),
        nose_width: pair_distance(landmarks, NOSE_WIDTH),
        mouth_width: pair_distance(landmarks, MOUTH_WIDTH),
        golden_ratio: round_to(golden_ratio, 3),
        symmetry_score: round_to(symmetry_score(landmarks), 1),
    }
}

/// `max(0, 100 - avgDiff * 1000)` over left/right horizontal offsets from the nose tip
pub fn symmetry_score(landmarks: &[Landmark]) -> f64 {
    let Some(center) = landmarks.get(NOSE_CENTER) else {
        return 0.0;
    };

    let diffs: Vec<f64> = SYMMETRY_PAIRS
        .iter()
        .filter_map(|(left, right)| {
            let l = landmarks.get(left.indices()[0])?;
            let r = landmarks.get(right.indices()[0])?;
            Some(((l.x - center.x).abs() - (r.x - center.x).abs()).abs())
        })
        .collect();

    if diffs.is_empty() {
        return 0.0;
    }

    let avg_diff = diffs.iter().sum::<f64>() / diffs.len() as f64;
    (100.0 - avg_diff * 1000.0).max(0.0)
}

pub fn vertical_proportions(landmarks: &[Landmark]) -> VerticalProportions {
    use proportion_points::*;
    VerticalProportions {
        forehead_to_eyes: pair_distance(landmarks, FOREHEAD_TO_EYES),
        eyes_to_nose: pair_distance(landmarks, EYES_TO_NOSE),
        nose_to_lips: pair_distance(landmarks, NOSE_TO_LIPS),
        lips_to_chin: pair_distance(landmarks, LIPS_TO_CHIN),
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
