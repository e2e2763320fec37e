//! Configuration loading, config file resolution and atomic TOML write-back
//!
//! Config file resolution order:
//! 1. Command-line argument (highest priority)
//! 2. `AURA_CONFIG` environment variable
//! 3. Platform config directory (`<config_dir>/aura/<module>.toml`)
//! 4. Compiled defaults (no file)
//!
//! A missing file is never fatal: a warning is logged and compiled defaults
//! are used. A file that exists but does not parse is a configuration error.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "AURA_CONFIG";

/// Default hosted inference base URL
pub const DEFAULT_INFERENCE_URL: &str = "https://api-inference.huggingface.co/models";

/// Top-level TOML configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Remote inference endpoints
    #[serde(default)]
    pub inference: InferenceConfig,

    /// Face mesh landmark service
    #[serde(default)]
    pub face_mesh: FaceMeshConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path (optional, logs to stderr if not specified)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

/// Hosted inference configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// Base URL; model paths are appended (`{api_url}/{owner}/{model}`)
    #[serde(default = "default_inference_url")]
    pub api_url: String,

    /// Bearer token (environment variables take precedence)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,

    /// Per-model request deadline in milliseconds
    #[serde(default = "default_inference_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            api_url: default_inference_url(),
            api_token: None,
            timeout_ms: default_inference_timeout_ms(),
        }
    }
}

/// Face mesh landmark service configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceMeshConfig {
    /// Landmark service endpoint; detection is unavailable when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Bearer token for the landmark service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,

    #[serde(default = "default_max_num_faces")]
    pub max_num_faces: u32,

    #[serde(default = "default_true")]
    pub refine_landmarks: bool,

    #[serde(default = "default_confidence")]
    pub min_detection_confidence: f32,

    #[serde(default = "default_confidence")]
    pub min_tracking_confidence: f32,

    /// Request deadline in milliseconds
    #[serde(default = "default_face_mesh_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for FaceMeshConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_token: None,
            max_num_faces: default_max_num_faces(),
            refine_landmarks: true,
            min_detection_confidence: default_confidence(),
            min_tracking_confidence: default_confidence(),
            timeout_ms: default_face_mesh_timeout_ms(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_inference_url() -> String {
    DEFAULT_INFERENCE_URL.to_string()
}

fn default_inference_timeout_ms() -> u64 {
    30_000
}

fn default_max_num_faces() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

fn default_confidence() -> f32 {
    0.5
}

fn default_face_mesh_timeout_ms() -> u64 {
    10_000
}

/// Compiled defaults for the current platform
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    /// Default config file location (may not exist)
    pub config_file: Option<PathBuf>,
}

impl CompiledDefaults {
    /// Defaults for a module, e.g. `aura-ai` → `~/.config/aura/aura-ai.toml` on Linux
    pub fn for_module(module_name: &str) -> Self {
        Self {
            config_file: dirs::config_dir()
                .map(|d| d.join("aura").join(format!("{module_name}.toml"))),
        }
    }
}

/// Resolves which config file (if any) a module should load
#[derive(Debug, Clone)]
pub struct ConfigFileResolver {
    module_name: String,
    cli_path: Option<PathBuf>,
}

impl ConfigFileResolver {
    pub fn new(module_name: impl Into<String>) -> Self {
        Self {
            module_name: module_name.into(),
            cli_path: None,
        }
    }

    /// Explicit path from the command line
    pub fn with_cli_path(mut self, path: Option<PathBuf>) -> Self {
        self.cli_path = path;
        self
    }

    /// Resolve the config path following the documented priority order
    ///
    /// Returns `None` when no source names a file and the platform default
    /// does not exist.
    pub fn resolve(&self) -> Option<PathBuf> {
        if let Some(path) = &self.cli_path {
            debug!(path = %path.display(), "Config file from command line");
            return Some(path.clone());
        }

        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            if !path.trim().is_empty() {
                debug!(path = %path, "Config file from {}", CONFIG_ENV_VAR);
                return Some(PathBuf::from(path));
            }
        }

        CompiledDefaults::for_module(&self.module_name)
            .config_file
            .filter(|p| p.exists())
    }

    /// Resolve and load, falling back to compiled defaults
    pub fn load(&self) -> Result<TomlConfig> {
        match self.resolve() {
            Some(path) => load_toml_config(&path),
            None => {
                info!(
                    module = %self.module_name,
                    "No config file found, using compiled defaults"
                );
                Ok(TomlConfig::default())
            }
        }
    }
}

/// Load a TOML config file
///
/// A missing file logs a warning and returns defaults.
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    if !path.exists() {
        warn!(
            path = %path.display(),
            "Config file not found, using compiled defaults"
        );
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(path)?;
    let config: TomlConfig = toml::from_str(&content)?;
    validate_config(&config)?;

    info!(path = %path.display(), "Loaded configuration");
    Ok(config)
}

/// Reject values that would make the services misbehave
pub fn validate_config(config: &TomlConfig) -> Result<()> {
    if config.inference.api_url.trim().is_empty() {
        return Err(Error::Config("inference.api_url must not be empty".to_string()));
    }
    if config.inference.timeout_ms == 0 {
        return Err(Error::Config("inference.timeout_ms must be > 0".to_string()));
    }
    if config.face_mesh.timeout_ms == 0 {
        return Err(Error::Config("face_mesh.timeout_ms must be > 0".to_string()));
    }
    for (name, value) in [
        ("min_detection_confidence", config.face_mesh.min_detection_confidence),
        ("min_tracking_confidence", config.face_mesh.min_tracking_confidence),
    ] {
        if !(0.0..=1.0).contains(&value) {
            return Err(Error::Config(format!(
                "face_mesh.{name} must be within 0.0-1.0 (got {value})"
            )));
        }
    }
    Ok(())
}

/// Write a TOML config atomically (temp file + rename)
///
/// On Unix the file is restricted to 0600 since it may hold API tokens.
pub fn write_toml_config(config: &TomlConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let temp_path = temp_path_for(path);
    std::fs::write(&temp_path, content)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&temp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    if let Err(e) = std::fs::rename(&temp_path, path) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(Error::Io(e));
    }

    debug!(path = %path.display(), "Config written");
    Ok(())
}

/// True if group or other can read the file
#[cfg(unix)]
pub fn check_toml_permissions_loose(path: &Path) -> Result<bool> {
    use std::os::unix::fs::PermissionsExt;
    let mode = std::fs::metadata(path)?.permissions().mode();
    Ok(mode & 0o077 != 0)
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "config.toml".into());
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TomlConfig::default();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.inference.api_url, DEFAULT_INFERENCE_URL);
        assert_eq!(config.inference.timeout_ms, 30_000);
        assert_eq!(config.face_mesh.max_num_faces, 1);
        assert!(config.face_mesh.endpoint.is_none());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: TomlConfig = toml::from_str(
            r#"
            [inference]
            api_token = "hf_test"
            "#,
        )
        .unwrap();

        assert_eq!(config.inference.api_token.as_deref(), Some("hf_test"));
        assert_eq!(config.inference.api_url, DEFAULT_INFERENCE_URL);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = TomlConfig::default();
        config.inference.timeout_ms = 0;
        assert!(matches!(validate_config(&config), Err(Error::Config(_))));
    }

    #[test]
    fn test_validate_rejects_confidence_out_of_range() {
        let mut config = TomlConfig::default();
        config.face_mesh.min_detection_confidence = 1.5;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_temp_path() {
        let p = temp_path_for(Path::new("/tmp/aura/aura-ai.toml"));
        assert_eq!(p, PathBuf::from("/tmp/aura/aura-ai.toml.tmp"));
    }

    #[test]
    fn test_compiled_defaults_module_file_name() {
        let defaults = CompiledDefaults::for_module("aura-ai");
        if let Some(path) = defaults.config_file {
            assert!(path.ends_with("aura/aura-ai.toml"));
        }
    }
}
