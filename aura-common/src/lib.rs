//! # Aura Common Library
//!
//! Shared code for the Aura analysis services:
//! - Error type shared across crates
//! - TOML configuration loading, resolution and atomic write-back
//! - Logging initialization

pub mod config;
pub mod error;
pub mod logging;

pub use error::{Error, Result};
