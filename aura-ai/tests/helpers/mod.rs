//! Test Helper Utilities
//!
//! Shared utilities for testing aura-ai

#![allow(dead_code, unused_imports)]

pub mod image_fixture;
pub mod mock_services;

// Re-export commonly used items
pub use image_fixture::{png_data_url, png_payload, synthetic_face_mesh};
pub use mock_services::{MockMeshLoader, MockTransport};
