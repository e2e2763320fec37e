//! Caller-owned face mesh detector handle
//!
//! The backend model is loaded lazily on first use. Concurrent first callers
//! share one initialization future; only one model instance exists per
//! handle until `destroy()` is called.

use crate::error::DetectorError;
use crate::types::Landmark;
use async_trait::async_trait;
use image::DynamicImage;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::OnceCell;
use tracing::{debug, info};

/// Loaded face mesh model
#[async_trait]
pub trait FaceMesh: Send + Sync {
    /// Detect faces; one landmark set per face (empty when no face)
    async fn detect(&self, image: &DynamicImage) -> Result<Vec<Vec<Landmark>>, DetectorError>;
}

/// Face mesh backend factory
#[async_trait]
pub trait FaceMeshLoader: Send + Sync {
    /// Backend name for logging
    fn name(&self) -> &'static str;

    /// Load the model (may download weights, open sessions, probe a service)
    async fn load(&self) -> Result<Arc<dyn FaceMesh>, DetectorError>;
}

type MeshCell = Arc<OnceCell<Arc<dyn FaceMesh>>>;

/// Face detector handle shared by the validator and the landmark extractor
pub struct FaceDetector {
    loader: Arc<dyn FaceMeshLoader>,
    mesh: Mutex<MeshCell>,
}

impl FaceDetector {
    pub fn new(loader: Arc<dyn FaceMeshLoader>) -> Self {
        Self {
            loader,
            mesh: Mutex::new(Arc::new(OnceCell::new())),
        }
    }

    fn current_cell(&self) -> MeshCell {
        Arc::clone(&self.mesh.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Get the loaded model, initializing it on first use
    ///
    /// A failed load leaves the handle uninitialized so a later call retries.
    pub async fn mesh(&self) -> Result<Arc<dyn FaceMesh>, DetectorError> {
        let cell = self.current_cell();
        let mesh = cell
            .get_or_try_init(|| async {
                info!(backend = self.loader.name(), "Initializing face mesh");
                self.loader.load().await
            })
            .await?;
        Ok(Arc::clone(mesh))
    }

    /// Run detection, initializing the model if needed
    pub async fn detect(&self, image: &DynamicImage) -> Result<Vec<Vec<Landmark>>, DetectorError> {
        let mesh = self.mesh().await?;
        let faces = mesh.detect(image).await?;
        debug!(faces = faces.len(), "Face mesh detection complete");
        Ok(faces)
    }

    pub fn is_initialized(&self) -> bool {
        self.current_cell().initialized()
    }

    /// Drop the loaded model; the next call re-initializes
    pub fn destroy(&self) {
        let mut guard = self.mesh.lock().unwrap_or_else(PoisonError::into_inner);
        if guard.initialized() {
            info!(backend = self.loader.name(), "Face mesh destroyed");
        }
        *guard = Arc::new(OnceCell::new());
    }
}

impl std::fmt::Debug for FaceDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FaceDetector")
            .field("backend", &self.loader.name())
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

// ============================================================================
// Mock Backend for Testing
// ============================================================================
