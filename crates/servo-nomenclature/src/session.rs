//! Interactive selection session.
//!
//! A [`Session`] is the mutable half of the library. It tracks the active
//! platform, series, template and segment selections of one user, while the
//! catalogues themselves stay immutable behind an [`Arc`]. Each session is
//! owned by exactly one presentation layer; share the [`CatalogueSet`], not
//! the session.
//!
//! Every mutating call returns the refreshed [`PartCode`] so a renderer never
//! has to re-derive it.
//!
//! # Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use servo_nomenclature::{CatalogueSet, Session};
//!
//! let mut session = Session::new(Arc::new(CatalogueSet::bundled().unwrap()));
//! session.select_series("SGMXA").unwrap();
//! session.select_template("standard").unwrap();
//! let part = session.set_segment_value("b", Some("01"));
//! assert_eq!(part.code, "SGMXA-01_____");
//! ```

use std::sync::Arc;

use serde::Serialize;

use crate::catalogue::{CatalogueSet, Platform, Series, keys, template_display_name};
use crate::decode::{DecodedResult, decode};
use crate::encode::{PartCode, Selections, build_code};
use crate::error::{Error, Result};
use crate::options::{SegmentChoices, segment_choices};

/// One selected segment, described for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryEntry {
    /// Segment key.
    pub key: String,
    /// Segment label.
    pub label: String,
    /// Selected code.
    pub code: String,
    /// Description of the code.
    pub description: String,
}

/// A template offered by the selected series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateEntry {
    /// Template key, e.g. `with_gear`.
    pub name: String,
    /// Display name, e.g. `With gearhead`.
    pub display_name: String,
}

/// Selection state of one user.
#[derive(Debug, Clone)]
pub struct Session {
    catalogues: Arc<CatalogueSet>,
    platform: Platform,
    series: Option<String>,
    template: Option<String>,
    selections: Selections,
}

impl Session {
    /// Start a session on the default platform.
    pub fn new(catalogues: Arc<CatalogueSet>) -> Self {
        Self::with_platform(catalogues, Platform::default())
    }

    /// Start a session on the given platform.
    pub fn with_platform(catalogues: Arc<CatalogueSet>, platform: Platform) -> Self {
        Self {
            catalogues,
            platform,
            series: None,
            template: None,
            selections: Selections::new(),
        }
    }

    /// Shared catalogues.
    pub fn catalogues(&self) -> &CatalogueSet {
        &self.catalogues
    }

    /// Active platform.
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Selected series name.
    pub fn series(&self) -> Option<&str> {
        self.series.as_deref()
    }

    /// Selected template name.
    pub fn template(&self) -> Option<&str> {
        self.template.as_deref()
    }

    /// Current selections, including the implicit model entry.
    pub fn selections(&self) -> &Selections {
        &self.selections
    }

    /// Switch platforms. Everything selected so far is discarded.
    pub fn switch_platform(&mut self, platform: Platform) -> PartCode {
        tracing::debug!(from = %self.platform, to = %platform, "Switching platform");
        self.platform = platform;
        self.reset();
        self.part_code()
    }

    /// Select a series of the active platform.
    ///
    /// Choosing a different series clears the template and every selection,
    /// then selects the model segment. Re-selecting the current series keeps
    /// the state untouched.
    pub fn select_series(&mut self, name: &str) -> Result<PartCode> {
        if self.series.as_deref() == Some(name) {
            return Ok(self.part_code());
        }
        if self.catalogues.get(self.platform).series(name).is_none() {
            return Err(Error::UnknownSeries {
                platform: self.platform,
                series: name.to_string(),
            });
        }

        self.series = Some(name.to_string());
        self.template = None;
        self.seed_model();
        Ok(self.part_code())
    }

    /// Select a template of the current series. Selections are cleared and
    /// the model segment is selected again.
    pub fn select_template(&mut self, name: &str) -> Result<PartCode> {
        let Some(series_name) = self.series.clone() else {
            return Err(Error::NoSeriesSelected);
        };
        let declared = self
            .current_series()
            .is_some_and(|series| series.template(name).is_some());
        if !declared {
            return Err(Error::UnknownTemplate {
                series: series_name,
                template: name.to_string(),
            });
        }

        self.template = Some(name.to_string());
        self.seed_model();
        Ok(self.part_code())
    }

    /// Set or clear the code of one segment.
    ///
    /// `None` and empty strings clear the selection. Free-format segments keep
    /// only the first character, upper-cased. Keys outside the current
    /// template are ignored.
    pub fn set_segment_value(&mut self, key: &str, code: Option<&str>) -> PartCode {
        let Some(series) = self.current_series() else {
            tracing::warn!(key, "No series selected; ignoring segment value");
            return self.part_code();
        };
        let Some(template) = self.template.as_deref().and_then(|t| series.template(t)) else {
            tracing::warn!(key, "No template selected; ignoring segment value");
            return self.part_code();
        };
        if !template.iter().any(|k| k == key) {
            tracing::warn!(key, template = ?self.template, "Segment is not part of the template");
            return self.part_code();
        }

        let free_format = series
            .segment(key)
            .is_some_and(|segment| segment.values.format().is_some());
        let code = code.map(str::trim).unwrap_or_default();
        let code = if free_format {
            code.chars().take(1).collect::<String>().to_uppercase()
        } else {
            code.to_string()
        };

        self.selections.set(key, code);
        self.part_code()
    }

    /// Part number for the current state. Empty until a template is chosen.
    pub fn part_code(&self) -> PartCode {
        match (self.current_series(), self.template.as_deref()) {
            (Some(series), Some(template)) => build_code(series, template, &self.selections),
            _ => PartCode::empty(),
        }
    }

    /// Selected segments in template order, each described.
    pub fn summary(&self) -> Vec<SummaryEntry> {
        let Some(series) = self.current_series() else {
            return Vec::new();
        };
        let Some(template) = self.template.as_deref().and_then(|t| series.template(t)) else {
            return Vec::new();
        };

        template
            .iter()
            .filter_map(|key| {
                let code = self.selections.get(key)?;
                let segment = series.segment(key)?;
                Some(SummaryEntry {
                    key: key.clone(),
                    label: segment.item.clone(),
                    code: code.to_string(),
                    description: segment.describe(code),
                })
            })
            .collect()
    }

    /// Templates of the current series, in declaration order.
    pub fn templates(&self) -> Vec<TemplateEntry> {
        self.current_series()
            .map(|series| {
                series
                    .template_names()
                    .map(|name| TemplateEntry {
                        name: name.to_string(),
                        display_name: template_display_name(name).to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Choices for every selectable segment of the current template.
    pub fn segment_choices(&self) -> Vec<SegmentChoices> {
        match (self.current_series(), self.template.as_deref()) {
            (Some(series), Some(template)) => segment_choices(series, template),
            _ => Vec::new(),
        }
    }

    /// Decode a part number against the shared catalogues. The selection
    /// state is not touched.
    pub fn decode(&self, raw: &str) -> Result<DecodedResult> {
        decode(&self.catalogues, raw)
    }

    /// Forget the series, template and selections. The platform is kept.
    pub fn reset(&mut self) {
        self.series = None;
        self.template = None;
        self.selections.clear();
    }

    fn current_series(&self) -> Option<&Series> {
        let name = self.series.as_deref()?;
        self.catalogues.get(self.platform).series(name)
    }

    fn seed_model(&mut self) {
        self.selections.clear();
        if let Some(name) = &self.series {
            self.selections.set(keys::MODEL, name.clone());
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(Arc::new(CatalogueSet::bundled().unwrap()))
    }

    #[test]
    fn test_new_session_is_empty() {
        let session = session();
        assert_eq!(session.platform(), Platform::SigmaX);
        assert_eq!(session.series(), None);
        assert_eq!(session.part_code(), PartCode::empty());
        assert!(session.summary().is_empty());
        assert!(session.templates().is_empty());
    }

    #[test]
    fn test_select_series_seeds_model() {
        let mut session = session();
        let part = session.select_series("SGMXA").unwrap();
        assert_eq!(part, PartCode::empty());
        assert_eq!(session.selections().get("a"), Some("SGMXA"));
        assert_eq!(session.template(), None);
    }

    #[test]
    fn test_select_unknown_series() {
        let mut session = session();
        let err = session.select_series("SGM7A").unwrap_err();
        assert!(matches!(err, Error::UnknownSeries { platform: Platform::SigmaX, .. }));
    }

    #[test]
    fn test_reselecting_series_keeps_state() {
        let mut session = session();
        session.select_series("SGMXA").unwrap();
        session.select_template("standard").unwrap();
        session.set_segment_value("b", Some("01"));
        let part = session.select_series("SGMXA").unwrap();
        assert_eq!(part.code, "SGMXA-01_____");
        assert_eq!(session.template(), Some("standard"));
    }

    #[test]
    fn test_changing_series_clears_template() {
        let mut session = session();
        session.select_series("SGMXA").unwrap();
        session.select_template("with_gear").unwrap();
        session.set_segment_value("b", Some("01"));
        session.select_series("SGMXJ").unwrap();
        assert_eq!(session.template(), None);
        assert_eq!(session.selections().len(), 1);
        assert_eq!(session.selections().get("a"), Some("SGMXJ"));
    }

    #[test]
    fn test_select_template_requires_series() {
        let mut session = session();
        assert!(matches!(
            session.select_template("standard"),
            Err(Error::NoSeriesSelected)
        ));
        session.select_series("SGMXG").unwrap();
        assert!(matches!(
            session.select_template("with_gear"),
            Err(Error::UnknownTemplate { .. })
        ));
    }

    #[test]
    fn test_select_template_clears_and_reseeds() {
        let mut session = session();
        session.select_series("SGMXA").unwrap();
        session.select_template("standard").unwrap();
        session.set_segment_value("c", Some("A"));
        let part = session.select_template("exclusive_customer").unwrap();
        assert_eq!(part.code, "SGMXA-_______");
        assert_eq!(part.placeholder_count(), 7);
        assert_eq!(session.selections().len(), 1);
    }

    #[test]
    fn test_complete_selection() {
        let mut session = session();
        session.select_series("SGMXA").unwrap();
        session.select_template("standard").unwrap();
        for (key, code) in [("b", "01"), ("c", "A"), ("d", "F"), ("e", "A"), ("f", "6")] {
            session.set_segment_value(key, Some(code));
        }
        let part = session.set_segment_value("g", Some("C"));
        assert_eq!(part.code, "SGMXA-01AFA6C");
        assert!(part.can_copy());
        assert_eq!(part.percentage(), 100);
    }

    #[test]
    fn test_clearing_a_segment() {
        let mut session = session();
        session.select_series("SGMXA").unwrap();
        session.select_template("standard").unwrap();
        session.set_segment_value("b", Some("01"));
        assert_eq!(session.set_segment_value("b", Some("")).code, "SGMXA-______");
        session.set_segment_value("b", Some("02"));
        assert_eq!(session.set_segment_value("b", None).code, "SGMXA-______");
    }

    #[test]
    fn test_free_format_is_uppercased_and_truncated() {
        let mut session = session();
        session.select_series("SGMXA").unwrap();
        session.select_template("exclusive_customer").unwrap();
        session.set_segment_value("h", Some("kx"));
        assert_eq!(session.selections().get("h"), Some("K"));
    }

    #[test]
    fn test_key_outside_template_is_ignored() {
        let mut session = session();
        session.select_series("SGMXA").unwrap();
        session.select_template("standard").unwrap();
        let part = session.set_segment_value("o", Some("B"));
        assert_eq!(part.code, "SGMXA-______");
        assert!(!session.selections().contains("o"));
    }

    #[test]
    fn test_value_without_template_is_ignored() {
        let mut session = session();
        session.select_series("SGMXA").unwrap();
        session.set_segment_value("b", Some("01"));
        assert!(!session.selections().contains("b"));
    }

    #[test]
    fn test_summary_follows_template_order() {
        let mut session = session();
        session.select_series("SGMXA").unwrap();
        session.select_template("standard").unwrap();
        session.set_segment_value("g", Some("C"));
        session.set_segment_value("b", Some("01"));
        let summary = session.summary();
        let keys: Vec<_> = summary.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, ["a", "b", "g"]);
        assert_eq!(summary[1].description, "100 W");
        assert_eq!(summary[2].label, "Options");
        assert_eq!(summary[2].description, "With 24-VDC holding brake");
    }

    #[test]
    fn test_templates_have_display_names() {
        let mut session = session();
        session.select_series("SGMXA").unwrap();
        let templates = session.templates();
        assert_eq!(templates[0].name, "standard");
        assert_eq!(templates[0].display_name, "Standard configuration");
        assert_eq!(templates.len(), 4);
    }

    #[test]
    fn test_switch_platform_resets() {
        let mut session = session();
        session.select_series("SGMXA").unwrap();
        session.select_template("standard").unwrap();
        let part = session.switch_platform(Platform::Sigma7);
        assert_eq!(part, PartCode::empty());
        assert_eq!(session.series(), None);
        assert!(session.selections().is_empty());
        session.select_series("SGM7A").unwrap();
    }

    #[test]
    fn test_reset_keeps_platform() {
        let mut session = session();
        session.switch_platform(Platform::Sigma7);
        session.select_series("SGM7J").unwrap();
        session.reset();
        assert_eq!(session.platform(), Platform::Sigma7);
        assert_eq!(session.series(), None);
    }

    #[test]
    fn test_segment_choices_follow_template() {
        let mut session = session();
        assert!(session.segment_choices().is_empty());
        session.select_series("SGMXJ").unwrap();
        session.select_template("exclusive_customer_with_region_options").unwrap();
        let keys: Vec<_> = session
            .segment_choices()
            .into_iter()
            .map(|c| c.key)
            .collect();
        assert_eq!(keys, ["b", "c", "d", "e", "f", "g", "h", "i"]);
    }

    #[test]
    fn test_decode_does_not_touch_selections() {
        let mut session = session();
        session.select_series("SGMXA").unwrap();
        let decoded = session.decode("SGM7J-02AFA61").unwrap();
        assert_eq!(decoded.platform, Platform::Sigma7);
        assert_eq!(session.series(), Some("SGMXA"));
    }
}
