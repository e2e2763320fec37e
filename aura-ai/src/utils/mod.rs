//! Utility modules

pub mod image_payload;

pub use image_payload::ImagePayload;

#[cfg(test)]
pub mod test_server;
