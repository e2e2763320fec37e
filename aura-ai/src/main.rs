//! aura-ai - skin analysis command-line entry point
//!
//! Runs the analysis pipeline over local image files and prints JSON to
//! stdout. Logs go to stderr (or the configured log file).

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use aura_ai::face::{FaceValidator, LandmarkExtractor};
use aura_ai::utils::ImagePayload;
use aura_ai::SkinAnalysisPipeline;
use aura_common::config::{
    write_toml_config, CompiledDefaults, ConfigFileResolver, TomlConfig,
};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

const MODULE_NAME: &str = "aura-ai";

/// Command-line arguments for aura-ai
#[derive(Parser, Debug)]
#[command(name = "aura-ai")]
#[command(about = "Hybrid skin analysis aggregator")]
#[command(version)]
struct Args {
    /// Config file (overrides AURA_CONFIG and the platform default)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that an image shows a usable face
    Validate {
        #[arg(short, long)]
        image: PathBuf,
    },
    /// Run the full analysis and print the signal vector
    Analyze {
        #[arg(short, long)]
        image: PathBuf,
        /// Customer's declared age in years
        #[arg(short, long)]
        age: u32,
    },
    /// Extract face mesh landmarks, measurements and zones
    Landmarks {
        #[arg(short, long)]
        image: PathBuf,
    },
    /// Write a default config file
    InitConfig {
        /// Target path (defaults to the platform config location)
        #[arg(short, long)]
        path: Option<PathBuf>,
        /// Store this inference API token in the new file
        #[arg(long)]
        api_token: Option<String>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    match args.command {
        Command::InitConfig {
            path,
            api_token,
            force,
        } => init_config(path.or(args.config), api_token.as_deref(), force),
        command => run(args.config, command).await,
    }
}

async fn run(config_path: Option<PathBuf>, command: Command) -> Result<()> {
    let config = ConfigFileResolver::new(MODULE_NAME)
        .with_cli_path(config_path)
        .load()
        .context("Failed to load configuration")?;

    aura_common::logging::init(&config.logging).context("Failed to initialize logging")?;
    info!("Starting aura-ai {}", env!("CARGO_PKG_VERSION"));

    let api_token = aura_ai::config::resolve_api_token(&config);
    let pipeline = SkinAnalysisPipeline::from_config(&config, api_token)
        .context("Failed to build analysis pipeline")?;

    match command {
        Command::Validate { image } => {
            let payload = read_image(&image)?;
            let validator = FaceValidator::new(Arc::clone(pipeline.detector()));
            print_json(&validator.validate(&payload).await?)
        }
        Command::Analyze { image, age } => {
            let payload = read_image(&image)?;
            let outcome = pipeline.analyze(&payload.to_data_url(), age).await?;
            print_json(&outcome)
        }
        Command::Landmarks { image } => {
            let frame = read_image(&image)?.decode()?;
            let extractor = LandmarkExtractor::new(Arc::clone(pipeline.detector()));
            let result = extractor.process_image(&frame).await?;
            extractor.destroy();
            print_json(&result)
        }
        Command::InitConfig { .. } => bail!("init-config does not load a configuration"),
    }
}

fn read_image(path: &Path) -> Result<ImagePayload> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(ImagePayload::from_bytes(bytes)?)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn init_config(path: Option<PathBuf>, api_token: Option<&str>, force: bool) -> Result<()> {
    let Some(path) = path.or_else(|| CompiledDefaults::for_module(MODULE_NAME).config_file) else {
        bail!("No platform config directory; pass --path");
    };

    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }

    write_toml_config(&TomlConfig::default(), &path)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    if let Some(token) = api_token.filter(|t| aura_ai::config::is_valid_token(t)) {
        aura_ai::config::store_api_token(token, &path).context("Failed to store API token")?;
    }
    println!("Wrote {}", path.display());
    Ok(())
}
