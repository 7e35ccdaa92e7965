//! Handler functions for config CLI commands.

use std::path::Path;

use crate::cli::ConfigAction;
use crate::config::{PROJECT_NAME, ServoConfig};
use crate::error::{Error, Result};

/// Handle a config subcommand.
pub fn handle_config_command(config_path: Option<&Path>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Path => cmd_config_path(config_path),
        ConfigAction::Show => cmd_config_show(config_path),
        ConfigAction::Init { force } => cmd_config_init(config_path, force),
    }
}

/// Show the resolved config file path.
pub fn cmd_config_path(config_path: Option<&Path>) -> Result<()> {
    let path = ServoConfig::resolve_config_path(config_path).ok_or_else(|| {
        Error::config("Could not determine config directory for this platform")
    })?;
    println!("{}", path.display());
    if !path.exists() {
        eprintln!("(file does not exist; run `servo config init` to create it)");
    }
    Ok(())
}

/// Print the effective configuration, after environment overrides.
pub fn cmd_config_show(config_path: Option<&Path>) -> Result<()> {
    let config = ServoConfig::load(config_path)?;
    print!("{}", config.to_toml_string()?);
    Ok(())
}

/// Create a default configuration file.
pub fn cmd_config_init(config_path: Option<&Path>, force: bool) -> Result<()> {
    let path = ServoConfig::resolve_config_path(config_path)
        .ok_or_else(|| Error::config("Could not determine config directory"))?;
    write_default_config(&path, force)?;
    println!("Config file created at {}", path.display());
    Ok(())
}

/// Write the default config to `path`, creating parent directories.
///
/// Refuses to replace an existing file unless `force` is set.
pub fn write_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
    }

    let header = format!("# {PROJECT_NAME} configuration\n\n");
    let body = ServoConfig::default().to_toml_string()?;
    std::fs::write(path, header + &body).map_err(|e| Error::io_with_path(e, path))?;
    tracing::info!(path = %path.display(), "Wrote default config");
    Ok(())
}
