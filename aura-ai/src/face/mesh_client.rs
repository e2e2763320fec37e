//! HTTP face mesh backend
//!
//! Posts the frame as PNG bytes to a landmark service and expects
//! `{"faces": [[{"x":..,"y":..,"z":..}, ...], ...]}` with normalized
//! coordinates, one inner array per detected face.

use crate::error::DetectorError;
use crate::face::detector::{FaceMesh, FaceMeshLoader};
use crate::types::Landmark;
use async_trait::async_trait;
use aura_common::config::FaceMeshConfig;
use image::{DynamicImage, ImageFormat};
use reqwest::Client;
use serde::Deserialize;
use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Loader for the HTTP landmark service
#[derive(Debug, Clone)]
pub struct HttpFaceMeshLoader {
    config: FaceMeshConfig,
}

impl HttpFaceMeshLoader {
    pub fn new(config: FaceMeshConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl FaceMeshLoader for HttpFaceMeshLoader {
    fn name(&self) -> &'static str {
        "http-face-mesh"
    }

    async fn load(&self) -> Result<Arc<dyn FaceMesh>, DetectorError> {
        let Some(endpoint) = self.config.endpoint.clone().filter(|e| !e.trim().is_empty()) else {
            return Err(DetectorError::Unavailable(
                "face_mesh.endpoint is not configured".to_string(),
            ));
        };

        let http_client = Client::builder()
            .timeout(Duration::from_millis(self.config.timeout_ms))
            .build()
            .map_err(|e| DetectorError::Unavailable(format!("HTTP client: {e}")))?;

        debug!(endpoint = %endpoint, "Face mesh service client ready");

        Ok(Arc::new(HttpFaceMesh {
            http_client,
            endpoint,
            config: self.config.clone(),
        }))
    }
}

/// Loaded HTTP face mesh
pub struct HttpFaceMesh {
    http_client: Client,
    endpoint: String,
    config: FaceMeshConfig,
}

#[derive(Debug, Deserialize)]
struct FaceMeshResponse {
    #[serde(default)]
    faces: Vec<Vec<Landmark>>,
}

#[async_trait]
impl FaceMesh for HttpFaceMesh {
    async fn detect(&self, image: &DynamicImage) -> Result<Vec<Vec<Landmark>>, DetectorError> {
        let mut body = Cursor::new(Vec::new());
        image
            .write_to(&mut body, ImageFormat::Png)
            .map_err(|e| DetectorError::Request(format!("PNG encode failed: {e}")))?;

        let mut request = self
            .http_client
            .post(&self.endpoint)
            .header("Content-Type", "image/png")
            .query(&[
                ("max_num_faces", self.config.max_num_faces.to_string()),
                ("refine_landmarks", self.config.refine_landmarks.to_string()),
                (
                    "min_detection_confidence",
                    self.config.min_detection_confidence.to_string(),
                ),
                (
                    "min_tracking_confidence",
                    self.config.min_tracking_confidence.to_string(),
                ),
            ])
            .body(body.into_inner());

        if let Some(token) = &self.config.api_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| DetectorError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "Face mesh service returned error");
            return Err(DetectorError::Request(format!("HTTP {status}: {body}")));
        }

        let parsed: FaceMeshResponse = response
            .json()
            .await
            .map_err(|e| DetectorError::InvalidResponse(e.to_string()))?;

        let mut faces = parsed.faces;
        faces.truncate(self.config.max_num_faces.max(1) as usize);
        Ok(faces)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_server::serve_once;
    use image::RgbImage;

    const TWO_FACES: &str =
        r#"{"faces": [[{"x": 0.1, "y": 0.2, "z": 0.0}], [{"x": 0.6, "y": 0.7, "z": 0.0}]]}"#;

    async fn mesh_for(url: &str, endpoint_path: &str, max_num_faces: u32) -> Arc<dyn FaceMesh> {
        let config = FaceMeshConfig {
            endpoint: Some(format!("{url}{endpoint_path}")),
            max_num_faces,
            api_token: Some("mesh_token".to_string()),
            ..FaceMeshConfig::default()
        };
        HttpFaceMeshLoader::new(config).load().await.unwrap()
    }

    fn frame() -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::new(8, 8))
    }

    #[tokio::test]
    async fn test_load_without_endpoint_is_unavailable() {
        let loader = HttpFaceMeshLoader::new(FaceMeshConfig::default());
        let result = loader.load().await;
        assert!(matches!(result, Err(DetectorError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_load_with_endpoint() {
        let config = FaceMeshConfig {
            endpoint: Some("http://127.0.0.1:9/face-mesh".to_string()),
            ..FaceMeshConfig::default()
        };
        assert!(HttpFaceMeshLoader::new(config).load().await.is_ok());
    }

    #[test]
    fn test_response_parsing() {
        let body = r#"{"faces": [[{"x": 0.1, "y": 0.2, "z": -0.01}, {"x": 0.3, "y": 0.4}]]}"#;
        let parsed: FaceMeshResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.faces.len(), 1);
        assert_eq!(parsed.faces[0][1], Landmark::new(0.3, 0.4, 0.0));

        let empty: FaceMeshResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.faces.is_empty());
    }

    #[tokio::test]
    async fn test_detect_truncates_to_max_faces() {
        let (url, request) = serve_once(200, TWO_FACES).await;
        let faces = mesh_for(&url, "/face-mesh", 1).await.detect(&frame()).await.unwrap();
        assert_eq!(faces.len(), 1);
        assert_eq!(faces[0][0], Landmark::new(0.1, 0.2, 0.0));

        let request = request.await.unwrap();
        assert!(request.starts_with("POST /face-mesh?max_num_faces=1&"));
        assert!(request.to_ascii_lowercase().contains("authorization: bearer mesh_token"));
    }

    #[tokio::test]
    async fn test_detect_returns_all_faces_within_limit() {
        let (url, _request) = serve_once(200, TWO_FACES).await;
        let faces = mesh_for(&url, "/", 2).await.detect(&frame()).await.unwrap();
        assert_eq!(faces.len(), 2);
        assert_eq!(faces[1][0], Landmark::new(0.6, 0.7, 0.0));
    }

    #[tokio::test]
    async fn test_detect_server_error_is_request_error() {
        let (url, _request) = serve_once(500, "mesh overloaded").await;
        let result = mesh_for(&url, "/", 1).await.detect(&frame()).await;
        match result {
            Err(DetectorError::Request(msg)) => {
                assert!(msg.contains("500"));
                assert!(msg.contains("mesh overloaded"));
            }
            other => panic!("expected request error, got {:?}", other.map(|f| f.len())),
        }
    }

    #[tokio::test]
    async fn test_detect_malformed_body_is_invalid_response() {
        let (url, _request) = serve_once(200, r#"{"faces": "nope"}"#).await;
        let result = mesh_for(&url, "/", 1).await.detect(&frame()).await;
        assert!(matches!(result, Err(DetectorError::InvalidResponse(_))));
    }
}
