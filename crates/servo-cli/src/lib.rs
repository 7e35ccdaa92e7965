//! # servo-cli
//!
//! Command-line front end for servo-nomenclature:
//! - decode part numbers into described segments
//! - build part numbers from segment selections
//! - list series, templates and selectable codes
//! - manage the config file

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_handlers;
pub mod error;

pub use error::{Error, Result};
