//! Mock inference transport and face mesh backend

use async_trait::async_trait;
use aura_ai::error::DetectorError;
use aura_ai::face::{FaceMesh, FaceMeshLoader};
use aura_ai::services::InferenceTransport;
use aura_ai::types::{Landmark, ModelError};
use image::DynamicImage;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const SKIN_TYPE_MODEL: &str = "dima806/skin_types_image_detection";
pub const AGE_MODEL: &str = "nateraw/vit-age-classifier";
pub const CONDITION_MODEL: &str = "Tanishq77/skin-condition-classifier";
pub const ACNE_MODEL: &str = "imfarzanansari/skintelligent-acne";
pub const FACE_PARSING_MODEL: &str = "jonathandinu/face-parsing";

#[derive(Clone)]
enum Reply {
    Body(Value),
    Status(u16),
    Hang,
}

/// Canned per-model replies; unlisted models answer HTTP 503
#[derive(Default)]
pub struct MockTransport {
    replies: Mutex<HashMap<String, Reply>>,
    calls: AtomicUsize,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Typical healthy replies for all five models
    pub fn healthy() -> Self {
        Self::new()
            .reply(
                SKIN_TYPE_MODEL,
                json!([{"label": "Oily", "score": 0.82}, {"label": "Dry", "score": 0.1}]),
            )
            .reply(
                AGE_MODEL,
                json!([{"label": "30-39", "score": 0.64}, {"label": "20-29", "score": 0.2}]),
            )
            .reply(
                CONDITION_MODEL,
                json!([{"label": "Acne", "score": 0.45}, {"label": "Milia", "score": 0.05}]),
            )
            .reply(ACNE_MODEL, json!([{"label": "mild", "score": 0.7}]))
            .reply(FACE_PARSING_MODEL, json!([
                {"label": "skin", "score": 0.97},
                {"label": "nose", "score": 0.91},
                {"label": "hair", "score": 0.88}
            ]))
    }

    pub fn reply(self, model_path: &str, body: Value) -> Self {
        self.set(model_path, Reply::Body(body));
        self
    }

    pub fn status(self, model_path: &str, status: u16) -> Self {
        self.set(model_path, Reply::Status(status));
        self
    }

    /// Never answers (exercises the per-model deadline)
    pub fn hang(self, model_path: &str) -> Self {
        self.set(model_path, Reply::Hang);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn set(&self, model_path: &str, reply: Reply) {
        self.replies
            .lock()
            .unwrap()
            .insert(model_path.to_string(), reply);
    }
}

#[async_trait]
impl InferenceTransport for MockTransport {
    async fn infer(&self, model_path: &str, _image: &[u8]) -> Result<Value, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let reply = self.replies.lock().unwrap().get(model_path).cloned();
        match reply {
            Some(Reply::Body(body)) => Ok(body),
            Some(Reply::Status(status)) => Err(ModelError::Http {
                status,
                body: "mock error".to_string(),
            }),
            Some(Reply::Hang) => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(ModelError::Network("unreachable".to_string()))
            }
            None => Err(ModelError::Http {
                status: 503,
                body: "no mock reply".to_string(),
            }),
        }
    }
}

/// Face mesh backend returning fixed faces (or failing to load)
pub struct MockMeshLoader {
    faces: Vec<Vec<Landmark>>,
    fail: bool,
    loads: AtomicUsize,
}

impl MockMeshLoader {
    pub fn with_faces(faces: Vec<Vec<Landmark>>) -> Arc<Self> {
        Arc::new(Self {
            faces,
            fail: false,
            loads: AtomicUsize::new(0),
        })
    }

    pub fn no_face() -> Arc<Self> {
        Self::with_faces(Vec::new())
    }

    pub fn broken() -> Arc<Self> {
        Arc::new(Self {
            faces: Vec::new(),
            fail: true,
            loads: AtomicUsize::new(0),
        })
    }

    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

struct FixedMesh(Vec<Vec<Landmark>>);

#[async_trait]
impl FaceMesh for FixedMesh {
    async fn detect(&self, _image: &DynamicImage) -> Result<Vec<Vec<Landmark>>, DetectorError> {
        Ok(self.0.clone())
    }
}

#[async_trait]
impl FaceMeshLoader for MockMeshLoader {
    fn name(&self) -> &'static str {
        "mock-mesh"
    }

    async fn load(&self) -> Result<Arc<dyn FaceMesh>, DetectorError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(10)).await;
        if self.fail {
            return Err(DetectorError::Unavailable("mock backend offline".to_string()));
        }
        Ok(Arc::new(FixedMesh(self.faces.clone())))
    }
}
