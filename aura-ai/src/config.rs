//! Configuration resolution for aura-ai
//!
//! Resolves the inference API token from three tiers with priority
//! `AURA_HF_API_TOKEN` → `HF_API_TOKEN` → TOML `inference.api_token`.

use aura_common::config::{load_toml_config, write_toml_config, TomlConfig};
use aura_common::Result;
use std::path::Path;
use tracing::{info, warn};

/// Service-specific token variable (highest priority)
pub const TOKEN_ENV_VAR: &str = "AURA_HF_API_TOKEN";

/// Conventional Hugging Face token variable
pub const HF_TOKEN_ENV_VAR: &str = "HF_API_TOKEN";

/// Where a resolved token came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    ServiceEnv,
    HuggingFaceEnv,
    Toml,
}

impl TokenSource {
    pub fn describe(self) -> &'static str {
        match self {
            TokenSource::ServiceEnv => TOKEN_ENV_VAR,
            TokenSource::HuggingFaceEnv => HF_TOKEN_ENV_VAR,
            TokenSource::Toml => "TOML config",
        }
    }
}

/// Resolve the inference API token from the process environment and `config`
///
/// An absent token is not an error: requests go out unauthenticated and
/// fail per model.
pub fn resolve_api_token(config: &TomlConfig) -> Option<String> {
    resolve_api_token_with(config, |name| std::env::var(name).ok())
        .map(|(token, _)| token)
}

/// Resolve with an injectable environment lookup
pub fn resolve_api_token_with<F>(config: &TomlConfig, env: F) -> Option<(String, TokenSource)>
where
    F: Fn(&str) -> Option<String>,
{
    let candidates = [
        (env(TOKEN_ENV_VAR), TokenSource::ServiceEnv),
        (env(HF_TOKEN_ENV_VAR), TokenSource::HuggingFaceEnv),
        (config.inference.api_token.clone(), TokenSource::Toml),
    ];

    let mut valid: Vec<(String, TokenSource)> = candidates
        .into_iter()
        .filter_map(|(token, source)| token.filter(|t| is_valid_token(t)).map(|t| (t, source)))
        .collect();

    if valid.len() > 1 {
        let sources: Vec<_> = valid.iter().map(|(_, s)| s.describe()).collect();
        warn!(
            "Inference API token found in multiple sources: {}. Using {} (highest priority).",
            sources.join(", "),
            valid[0].1.describe()
        );
    }

    if valid.is_empty() {
        warn!("Inference API token not configured; set {} or inference.api_token", TOKEN_ENV_VAR);
        return None;
    }

    let (token, source) = valid.swap_remove(0);
    info!(source = source.describe(), "Inference API token loaded");
    Some((token, source))
}

/// Validate token (non-empty, non-whitespace)
pub fn is_valid_token(token: &str) -> bool {
    !token.trim().is_empty()
}

/// Store a token in the TOML file, keeping every other setting
pub fn store_api_token(token: &str, toml_path: &Path) -> Result<()> {
    let mut config = load_toml_config(toml_path)?;
    config.inference.api_token = Some(token.trim().to_string());
    write_toml_config(&config, toml_path)?;
    info!(path = %toml_path.display(), "Inference API token written to TOML");
    Ok(())
}
