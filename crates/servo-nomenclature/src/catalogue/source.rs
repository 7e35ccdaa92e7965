//! Where catalogue documents come from.
//!
//! A [`CatalogueSource`] produces the raw JSON document for a platform. The
//! crate ships two implementations: [`EmbeddedSource`] serves the documents
//! compiled into the binary, [`DirectorySource`] reads them from disk so
//! catalogues can be updated without a rebuild.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use super::Platform;
use crate::error::{Error, Result};

const SIGMA_X_JSON: &str = include_str!("../../data/sigma_x_series_nomenclature.json");
const SIGMA_7_JSON: &str = include_str!("../../data/sigma_7_series_nomenclature.json");

/// Provider of raw catalogue documents.
#[async_trait]
pub trait CatalogueSource: Send + Sync {
    /// Fetch the JSON document for a platform.
    ///
    /// Failures are reported as [`Error::DataUnavailable`].
    async fn fetch(&self, platform: Platform) -> Result<String>;

    /// Short description of the source, used in log messages.
    fn describe(&self) -> String;
}

/// Catalogues bundled with the crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedSource;

impl EmbeddedSource {
    /// Returns the bundled document for a platform.
    pub fn document(platform: Platform) -> &'static str {
        match platform {
            Platform::SigmaX => SIGMA_X_JSON,
            Platform::Sigma7 => SIGMA_7_JSON,
        }
    }
}

#[async_trait]
impl CatalogueSource for EmbeddedSource {
    async fn fetch(&self, platform: Platform) -> Result<String> {
        Ok(Self::document(platform).to_string())
    }

    fn describe(&self) -> String {
        "bundled catalogues".to_string()
    }
}

/// Catalogues stored as `<dir>/<platform file name>`.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    /// Create a source reading from the given directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory the documents are read from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of a platform's document.
    pub fn path_for(&self, platform: Platform) -> PathBuf {
        self.dir.join(platform.file_name())
    }
}

#[async_trait]
impl CatalogueSource for DirectorySource {
    async fn fetch(&self, platform: Platform) -> Result<String> {
        let path = self.path_for(platform);
        tokio::fs::read_to_string(&path).await.map_err(|e| {
            Error::data_unavailable_with_source(
                platform,
                format!("cannot read {}", path.display()),
                e,
            )
        })
    }

    fn describe(&self) -> String {
        self.dir.display().to_string()
    }
}
