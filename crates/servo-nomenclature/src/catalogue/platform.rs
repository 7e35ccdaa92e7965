//! Product platforms, each with an independent catalogue.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Top-level product generation.
///
/// Decoding tries platforms in [`Platform::ALL`] order, so a series code
/// present in both catalogues resolves to Sigma-X.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Platform {
    /// Sigma-X servomotors (SGMX*).
    #[default]
    SigmaX,
    /// Sigma-7 servomotors (SGM7*).
    #[serde(rename = "sigma-7")]
    Sigma7,
}

impl Platform {
    /// All platforms in detection order.
    pub const ALL: [Platform; 2] = [Platform::SigmaX, Platform::Sigma7];

    /// Stable identifier, e.g. `sigma-x`.
    pub fn id(&self) -> &'static str {
        match self {
            Self::SigmaX => "sigma-x",
            Self::Sigma7 => "sigma-7",
        }
    }

    /// Product name shown to users, e.g. `Sigma-X`.
    pub fn title(&self) -> &'static str {
        match self {
            Self::SigmaX => "Sigma-X",
            Self::Sigma7 => "Sigma-7",
        }
    }

    /// File name of the platform's catalogue document.
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::SigmaX => "sigma_x_series_nomenclature.json",
            Self::Sigma7 => "sigma_7_series_nomenclature.json",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Platform {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "sigma-x" | "sigmax" | "x" => Ok(Self::SigmaX),
            "sigma-7" | "sigma7" | "7" => Ok(Self::Sigma7),
            _ => Err(Error::UnknownPlatform(s.to_string())),
        }
    }
}
