//! Servo CLI
//!
//! Command-line interface for encoding and decoding servomotor part numbers.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::Parser;
use servo_nomenclature::CatalogueSet;
use tracing_subscriber::EnvFilter;

use servo_cli::cli::{Cli, Command};
use servo_cli::commands::{build_session, cmd_decode, cmd_encode, render_options, render_series};
use servo_cli::config::{OutputFormat, ServoConfig};
use servo_cli::config_handlers::handle_config_command;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        // Config commands must work even when the config file is broken.
        Command::Config { action } => {
            init_tracing("warn", cli.verbose);
            handle_config_command(config_path, action).context("Config command failed")?;
        }
        Command::Decode { codes, json } => {
            let (config, catalogues) = setup(config_path, cli.data_dir, cli.verbose).await?;
            let failures = cmd_decode(&catalogues, &codes, output(json, &config))?;
            if failures > 0 {
                bail!("{failures} of {} part number(s) could not be decoded", codes.len());
            }
        }
        Command::Encode {
            series,
            platform,
            template,
            selections,
            json,
        } => {
            let (config, catalogues) = setup(config_path, cli.data_dir, cli.verbose).await?;
            let session = build_session(
                catalogues,
                &series,
                platform,
                config.default_platform,
                &template,
                &selections,
            )?;
            cmd_encode(&session, output(json, &config))?;
        }
        Command::Series { platform } => {
            let (_, catalogues) = setup(config_path, cli.data_dir, cli.verbose).await?;
            print!("{}", render_series(&catalogues, platform));
        }
        Command::Options { series, template } => {
            let (_, catalogues) = setup(config_path, cli.data_dir, cli.verbose).await?;
            print!("{}", render_options(catalogues, &series, &template)?);
        }
    }

    Ok(())
}

/// Load the config, install logging and load the catalogues it points at.
async fn setup(
    config_path: Option<&Path>,
    data_dir: Option<PathBuf>,
    verbose: bool,
) -> Result<(ServoConfig, Arc<CatalogueSet>)> {
    let mut config = ServoConfig::load(config_path).context("Failed to load configuration")?;
    config.apply_env_overrides(data_dir);
    init_tracing(&config.log_level, verbose);

    let source = config.catalogue_source();
    tracing::debug!(source = %source.describe(), "Loading catalogues");
    let catalogues = CatalogueSet::load(source.as_ref())
        .await
        .with_context(|| format!("Failed to load catalogues from {}", source.describe()))?;
    Ok((config, Arc::new(catalogues)))
}

/// `RUST_LOG` wins, then the configured level; `-v` forces debug.
fn init_tracing(level: &str, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn output(json: bool, config: &ServoConfig) -> OutputFormat {
    if json { OutputFormat::Json } else { config.output }
}
