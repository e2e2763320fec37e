//! Remote service clients

pub mod inference_client;

pub use inference_client::{HuggingFaceClient, InferenceTransport};
