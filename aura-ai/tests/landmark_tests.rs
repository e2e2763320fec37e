//! Integration tests for landmark extraction and the face presence gate

mod helpers;

use aura_ai::face::landmarks::{vertical_proportions, FacialRegion};
use aura_ai::face::{FaceDetector, FaceValidator, LandmarkExtractor};
use aura_ai::types::FaceRect;
use helpers::mock_services::MockMeshLoader;
use helpers::{png_payload, synthetic_face_mesh};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

#[tokio::test]
async fn test_extractor_measurements_on_synthetic_face() {
    let mesh = synthetic_face_mesh(0.2, 0.1, 0.6, 0.8);
    let detector = Arc::new(FaceDetector::new(MockMeshLoader::with_faces(vec![mesh])));
    let extractor = LandmarkExtractor::new(detector);

    let frame = png_payload().decode().unwrap();
    let result = extractor.process_image(&frame).await.unwrap();

    assert!(result.detected);
    assert_eq!(result.landmarks.len(), 468);
    assert!((result.measurements.face_width - 0.6).abs() < 1e-9);
    assert!((result.measurements.face_height - 0.8).abs() < 1e-9);
    assert_eq!(result.measurements.golden_ratio, 1.333);
    // Mirrored pairs about the nose center
    assert_eq!(result.measurements.symmetry_score, 100.0);

    let bbox = result.bounding_box;
    assert!((bbox.x - 0.2).abs() < 1e-9 && (bbox.y - 0.1).abs() < 1e-9);
    assert!((bbox.width - 0.6).abs() < 1e-9 && (bbox.height - 0.8).abs() < 1e-9);
    assert_ne!(result.zones.forehead, FaceRect::EMPTY);
}

#[tokio::test]
async fn test_zero_faces_all_zero() {
    let detector = Arc::new(FaceDetector::new(MockMeshLoader::no_face()));
    let result = LandmarkExtractor::new(detector)
        .process_image(&png_payload().decode().unwrap())
        .await
        .unwrap();

    assert!(!result.detected);
    assert!(result.landmarks.is_empty());
    assert_eq!(result.bounding_box, FaceRect::EMPTY);
    assert_eq!(result.zones.left_cheek, FaceRect::EMPTY);
    assert_eq!(result.measurements.golden_ratio, 0.0);
}

#[tokio::test]
async fn test_stream_then_destroy_reinitializes() {
    let loader = MockMeshLoader::with_faces(vec![synthetic_face_mesh(0.2, 0.2, 0.5, 0.5)]);
    let detector = Arc::new(FaceDetector::new(loader.clone()));
    let extractor = LandmarkExtractor::new(Arc::clone(&detector));

    let frame = png_payload().decode().unwrap();
    let frames = futures::stream::iter(vec![frame.clone(), frame.clone()]);
    let (tx, mut rx) = mpsc::unbounded_channel();
    extractor.start_stream(frames, move |result| {
        let _ = tx.send(result);
    });

    for _ in 0..2 {
        let result = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert!(result.detected);
    }

    extractor.destroy();
    assert!(!detector.is_initialized());

    extractor.process_image(&frame).await.unwrap();
    assert_eq!(loader.load_count(), 2);
}

#[tokio::test]
async fn test_validator_and_extractor_share_detector() {
    let loader = MockMeshLoader::with_faces(vec![synthetic_face_mesh(0.3, 0.3, 0.4, 0.4)]);
    let detector = Arc::new(FaceDetector::new(loader.clone()));
    let validator = FaceValidator::new(Arc::clone(&detector));
    let extractor = LandmarkExtractor::new(Arc::clone(&detector));

    let payload = png_payload();
    let validation = validator.validate(&payload).await.unwrap();
    extractor
        .process_image(&payload.decode().unwrap())
        .await
        .unwrap();

    // 0.4 x 0.4 = 16% -> 16 / 30
    assert!((validation.face_area - 16.0).abs() < 1e-9);
    assert!((validation.confidence - 16.0 / 30.0).abs() < 1e-9);
    assert_eq!(loader.load_count(), 1);
}

#[test]
fn test_wrinkle_zone_tables_present() {
    for region in FacialRegion::WRINKLE_ZONES {
        assert!(!region.indices().is_empty(), "{region:?}");
        assert!(region.indices().iter().all(|&i| i < 468));
    }
}

#[test]
fn test_vertical_proportions_on_synthetic_face() {
    let mesh = synthetic_face_mesh(0.2, 0.1, 0.6, 0.8);
    let thirds = vertical_proportions(&mesh);
    assert!(thirds.forehead_to_eyes > 0.0);
}
