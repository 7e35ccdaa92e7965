//! Typed catalogue model.
//!
//! A [`Catalogue`] holds the series of one [`Platform`]; each [`Series`]
//! owns its [`Segment`] definitions and part-number templates. Catalogues are
//! loaded once and are read-only afterwards, so a [`CatalogueSet`] can be
//! shared behind an `Arc` by any number of sessions.
//!
//! Loading is deliberately lenient: only the top-level structure is checked.
//! Malformed segments surface later as unknown values when describing or
//! decoding.
//!
//! # Usage
//!
//! ```rust
//! use servo_nomenclature::{CatalogueSet, Platform};
//!
//! let catalogues = CatalogueSet::bundled().unwrap();
//! let sigma_x = catalogues.get(Platform::SigmaX);
//! let series = sigma_x.series("SGMXA").unwrap();
//! assert_eq!(series.model_code(), Some("SGMXA"));
//! ```

mod platform;
mod source;
mod template;
mod value_table;

pub use platform::Platform;
pub use source::{CatalogueSource, DirectorySource, EmbeddedSource};
pub use template::{
    STANDARD_TEMPLATE, Template, TemplateKind, series_title, template_display_name,
};
pub use value_table::{FlatTable, FlatValue, GearType, SpeedTable, ValueTable};

use indexmap::IndexMap;
use serde::Deserialize;
use value_table::RawSegment;

use crate::error::{Error, Result};

/// Segment keys with dedicated handling.
pub mod keys {
    /// Motor model; its table is keyed by the series name itself.
    pub const MODEL: &str = "a";
    /// Rated output; always two characters wide.
    pub const RATED_OUTPUT: &str = "b";
    /// Options; one or two characters wide on option-spec series.
    pub const OPTIONS: &str = "g";
    /// Gear reduction ratio; one or two characters wide.
    pub const GEAR_RATIO: &str = "o";
}

// ============================================================================
// Segment
// ============================================================================

/// One semantic field of a part number.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawSegment")]
pub struct Segment {
    /// Display label, e.g. "Rated output".
    pub item: String,
    /// The segment's codes.
    pub values: ValueTable,
}

impl Segment {
    /// Create a segment from a label and a table.
    pub fn new(item: impl Into<String>, values: ValueTable) -> Self {
        Self {
            item: item.into(),
            values,
        }
    }
}

impl From<RawSegment> for Segment {
    fn from(raw: RawSegment) -> Self {
        Self {
            item: raw.item(),
            values: raw.classify(),
        }
    }
}

// ============================================================================
// Series
// ============================================================================

/// A motor product family.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Series {
    /// Segment definitions keyed by single-letter segment key.
    #[serde(default)]
    pub segments: IndexMap<String, Segment>,
    /// Templates keyed by template name, in declaration order.
    #[serde(default, rename = "part_number_templates")]
    pub templates: IndexMap<String, Template>,
}

impl Series {
    /// Look up a segment by key.
    pub fn segment(&self, key: &str) -> Option<&Segment> {
        self.segments.get(key)
    }

    /// Look up a template by name.
    pub fn template(&self, name: &str) -> Option<&Template> {
        self.templates.get(name)
    }

    /// Template names in declaration order.
    pub fn template_names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    /// First code of the model segment, normally the series name.
    pub fn model_code(&self) -> Option<&str> {
        self.segment(keys::MODEL)?.values.first_code()
    }
}

// ============================================================================
// Catalogue
// ============================================================================

#[derive(Deserialize)]
struct RawCatalogue {
    series: IndexMap<String, Series>,
}

/// All series of one platform.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalogue {
    platform: Platform,
    series: IndexMap<String, Series>,
}

impl Catalogue {
    /// Create a catalogue from already-built series.
    pub fn new(platform: Platform, series: IndexMap<String, Series>) -> Self {
        Self { platform, series }
    }

    /// Parse a catalogue document.
    ///
    /// Fails with [`Error::DataUnavailable`] when the document is not JSON or
    /// has no `series` table.
    pub fn from_json_str(platform: Platform, json: &str) -> Result<Self> {
        let raw: RawCatalogue = serde_json::from_str(json).map_err(|e| {
            Error::data_unavailable_with_source(platform, "invalid catalogue document", e)
        })?;
        tracing::info!(
            platform = %platform,
            series = raw.series.len(),
            "Catalogue loaded"
        );
        Ok(Self::new(platform, raw.series))
    }

    /// Platform this catalogue belongs to.
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Look up a series by name.
    pub fn series(&self, name: &str) -> Option<&Series> {
        self.series.get(name)
    }

    /// Series names in declaration order.
    pub fn series_names(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    /// Series in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Series)> {
        self.series.iter().map(|(name, series)| (name.as_str(), series))
    }

    /// Number of series.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Returns `true` if the catalogue declares no series.
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// Fetch and parse one platform's catalogue.
pub async fn load_catalogue(source: &dyn CatalogueSource, platform: Platform) -> Result<Catalogue> {
    tracing::debug!(platform = %platform, source = %source.describe(), "Fetching catalogue");
    let json = source.fetch(platform).await?;
    Catalogue::from_json_str(platform, &json)
}

// ============================================================================
// CatalogueSet
// ============================================================================

/// The catalogues of both platforms.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogueSet {
    sigma_x: Catalogue,
    sigma_7: Catalogue,
}

impl CatalogueSet {
    /// Combine two catalogues.
    ///
    /// Fails if either catalogue belongs to the wrong platform.
    pub fn new(sigma_x: Catalogue, sigma_7: Catalogue) -> Result<Self> {
        for (expected, catalogue) in [(Platform::SigmaX, &sigma_x), (Platform::Sigma7, &sigma_7)] {
            if catalogue.platform() != expected {
                return Err(Error::data_unavailable(
                    expected,
                    format!("got the {} catalogue instead", catalogue.platform()),
                ));
            }
        }
        Ok(Self { sigma_x, sigma_7 })
    }

    /// The catalogues bundled with the crate.
    pub fn bundled() -> Result<Self> {
        Self::new(
            Catalogue::from_json_str(Platform::SigmaX, EmbeddedSource::document(Platform::SigmaX))?,
            Catalogue::from_json_str(Platform::Sigma7, EmbeddedSource::document(Platform::Sigma7))?,
        )
    }

    /// Load both catalogues from a source, Sigma-X first.
    ///
    /// Either failure aborts the whole load.
    pub async fn load(source: &dyn CatalogueSource) -> Result<Self> {
        let sigma_x = load_catalogue(source, Platform::SigmaX).await?;
        let sigma_7 = load_catalogue(source, Platform::Sigma7).await?;
        Self::new(sigma_x, sigma_7)
    }

    /// The catalogue of a platform.
    pub fn get(&self, platform: Platform) -> &Catalogue {
        match platform {
            Platform::SigmaX => &self.sigma_x,
            Platform::Sigma7 => &self.sigma_7,
        }
    }

    /// Catalogues in detection order.
    pub fn iter(&self) -> impl Iterator<Item = &Catalogue> {
        Platform::ALL.into_iter().map(|platform| self.get(platform))
    }

    /// Find a series in any platform, searching in detection order.
    pub fn find_series(&self, name: &str) -> Option<(Platform, &Series)> {
        self.iter()
            .find_map(|catalogue| catalogue.series(name).map(|s| (catalogue.platform(), s)))
    }
}
