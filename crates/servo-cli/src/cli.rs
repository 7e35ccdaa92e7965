//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use servo_nomenclature::Platform;

use crate::config::{CONFIG_ENV, DATA_DIR_ENV};

/// Servo - encode and decode servomotor part numbers
#[derive(Parser, Debug)]
#[command(name = "servo")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = CONFIG_ENV)]
    pub config: Option<PathBuf>,

    /// Directory holding the catalogue documents
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    pub data_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode one or more part numbers
    Decode {
        /// Part numbers, e.g. SGMXA-01AFA6C; '?' marks an unknown character
        #[arg(required = true)]
        codes: Vec<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Build a part number from segment selections
    Encode {
        /// Series code, e.g. SGMXA
        #[arg(short, long)]
        series: String,

        /// Platform to look the series up in (default: inferred from the series)
        #[arg(short, long)]
        platform: Option<Platform>,

        /// Template name
        #[arg(short, long, default_value = "standard")]
        template: String,

        /// Segment selection as key=code; repeatable
        #[arg(long = "set", value_name = "KEY=CODE")]
        selections: Vec<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List series with their titles and templates
    Series {
        /// Only list this platform
        #[arg(short, long)]
        platform: Option<Platform>,
    },

    /// List the selectable codes of a series template
    Options {
        /// Series code, e.g. SGMXA
        #[arg(short, long)]
        series: String,

        /// Template name
        #[arg(short, long, default_value = "standard")]
        template: String,
    },

    /// Configuration management
    Config {
        /// Config action
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ConfigAction {
    /// Print the resolved config file path
    Path,
    /// Print the effective configuration
    Show,
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
