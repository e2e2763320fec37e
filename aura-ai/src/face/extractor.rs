//! Landmark extractor
//!
//! Three modes over one detector handle:
//! - `process_image` - one-shot still image
//! - `start_stream` - continuous frames, one callback per processed frame
//! - `destroy` - stop any stream and tear the detector down

use crate::error::DetectorError;
use crate::face::detector::FaceDetector;
use crate::face::landmarks::analyze_landmarks;
use crate::types::FaceDetectionResult;
use futures::{Stream, StreamExt};
use image::DynamicImage;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

struct ActiveStream {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

pub struct LandmarkExtractor {
    detector: Arc<FaceDetector>,
    stream: Mutex<Option<ActiveStream>>,
}

impl LandmarkExtractor {
    pub fn new(detector: Arc<FaceDetector>) -> Self {
        Self {
            detector,
            stream: Mutex::new(None),
        }
    }

    pub fn detector(&self) -> &Arc<FaceDetector> {
        &self.detector
    }

    /// Process one still image
    pub async fn process_image(
        &self,
        image: &DynamicImage,
    ) -> Result<FaceDetectionResult, DetectorError> {
        process_frame(&self.detector, image).await
    }

    /// Start continuous processing of `frames`
    ///
    /// Runs on a spawned task until the stream ends, `stop_stream` or
    /// `destroy` is called. Frames whose detection fails are skipped with a
    /// warning. Starting a new stream stops the previous one.
    pub fn start_stream<S, F>(&self, frames: S, mut on_result: F)
    where
        S: Stream<Item = DynamicImage> + Send + 'static,
        F: FnMut(FaceDetectionResult) + Send + 'static,
    {
        self.stop_stream();

        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let detector = Arc::clone(&self.detector);

        let task = tokio::spawn(async move {
            let mut frames = Box::pin(frames);
            let mut processed: u64 = 0;
            loop {
                let frame = tokio::select! {
                    _ = token.cancelled() => break,
                    frame = frames.next() => frame,
                };
                let Some(frame) = frame else {
                    break;
                };

                let outcome = tokio::select! {
                    _ = token.cancelled() => break,
                    outcome = process_frame(&detector, &frame) => outcome,
                };

                match outcome {
                    Ok(result) => {
                        processed += 1;
                        on_result(result);
                    }
                    Err(e) => warn!(error = %e, "Frame skipped"),
                }
            }
            debug!(frames = processed, "Landmark stream finished");
        });

        info!("Landmark stream started");
        *self.lock_stream() = Some(ActiveStream { cancel, task });
    }

    /// Stop the active stream, if any
    pub fn stop_stream(&self) {
        if let Some(active) = self.lock_stream().take() {
            active.cancel.cancel();
            info!("Landmark stream stopped");
        }
    }

    pub fn is_streaming(&self) -> bool {
        self.lock_stream()
            .as_ref()
            .is_some_and(|s| !s.task.is_finished())
    }

    /// Stop streaming and release the detector model
    pub fn destroy(&self) {
        self.stop_stream();
        self.detector.destroy();
    }

    fn lock_stream(&self) -> std::sync::MutexGuard<'_, Option<ActiveStream>> {
        self.stream.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for LandmarkExtractor {
    fn drop(&mut self) {
        self.stop_stream();
    }
}

/// Detect and analyze the first face in a frame
async fn process_frame(
    detector: &FaceDetector,
    image: &DynamicImage,
) -> Result<FaceDetectionResult, DetectorError> {
    let faces = detector.detect(image).await?;
    match faces.into_iter().next() {
        Some(landmarks) if !landmarks.is_empty() => Ok(analyze_landmarks(landmarks)),
        _ => Ok(FaceDetectionResult::not_detected()),
    }
}
