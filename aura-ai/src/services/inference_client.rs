//! Hosted inference client
//!
//! POSTs raw image bytes to `{api_url}/{model_path}` and returns the JSON
//! body. Shaping into typed results happens in the model adapters.
//!
//! # API Reference
//! - Endpoint: https://api-inference.huggingface.co/models/{model}
//! - Auth: `Authorization: Bearer <token>`

use crate::error::AnalysisResult;
use crate::types::ModelError;
use async_trait::async_trait;
use aura_common::config::InferenceConfig;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Longest response body excerpt kept in an HTTP error
const MAX_ERROR_BODY: usize = 512;

/// Transport seam for model calls
#[async_trait]
pub trait InferenceTransport: Send + Sync {
    /// Run `model_path` over `image` and return the decoded JSON body
    async fn infer(
        &self,
        model_path: &str,
        image: &[u8],
    ) -> Result<serde_json::Value, ModelError>;
}

/// Hugging Face Inference API client
pub struct HuggingFaceClient {
    http_client: Client,
    api_url: String,
    api_token: Option<String>,
}

impl HuggingFaceClient {
    /// Create a client; `timeout` bounds each HTTP request
    ///
    /// A blank token counts as absent and requests go out unauthenticated.
    pub fn new(
        api_url: impl Into<String>,
        api_token: Option<String>,
        timeout: Duration,
    ) -> AnalysisResult<Self> {
        let http_client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            api_token: api_token.filter(|t| !t.trim().is_empty()),
        })
    }

    /// Create from the `[inference]` section with an already-resolved token
    pub fn from_config(
        config: &InferenceConfig,
        api_token: Option<String>,
    ) -> AnalysisResult<Self> {
        Self::new(
            config.api_url.clone(),
            api_token,
            Duration::from_millis(config.timeout_ms),
        )
    }

    pub fn model_url(&self, model_path: &str) -> String {
        format!("{}/{}", self.api_url, model_path.trim_start_matches('/'))
    }
}

#[async_trait]
impl InferenceTransport for HuggingFaceClient {
    async fn infer(&self, model_path: &str, image: &[u8]) -> Result<serde_json::Value, ModelError> {
        let url = self.model_url(model_path);
        debug!(model = model_path, bytes = image.len(), "Calling inference endpoint");

        let mut request = self
            .http_client
            .post(&url)
            .header("Content-Type", "application/octet-stream")
            .body(image.to_vec());

        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ModelError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ModelError::Network(format!("Failed to read response body: {e}")))?;

        if !status.is_success() {
            return Err(ModelError::Http {
                status: status.as_u16(),
                body: truncate(&body, MAX_ERROR_BODY),
            });
        }

        serde_json::from_str(&body).map_err(|e| ModelError::Parse(format!("Invalid JSON: {e}")))
    }
}

fn truncate(body: &str, max: usize) -> String {
    match body.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
