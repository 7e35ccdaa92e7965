//! Part-number encoding from segment selections.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::catalogue::{Series, keys};

/// Stands in for a segment that has not been selected yet.
pub const PLACEHOLDER: char = '_';

/// Separates the model segment from the rest of the part number.
pub const SEPARATOR: char = '-';

/// Chosen code per segment key, at most one per key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selections(IndexMap<String, String>);

impl Selections {
    /// Create an empty selection set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a code for a segment, replacing any previous choice.
    ///
    /// An empty code removes the selection.
    pub fn set(&mut self, key: impl Into<String>, code: impl Into<String>) {
        let key = key.into();
        let code = code.into();
        if code.is_empty() {
            self.0.shift_remove(&key);
        } else {
            self.0.insert(key, code);
        }
    }

    /// Remove a segment's selection, returning the previous code.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.shift_remove(key)
    }

    /// The selected code of a segment.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Returns `true` if the segment has a selection.
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of selected segments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Remove every selection.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Selections in the order they were made.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Selections {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut selections = Self::new();
        for (key, code) in iter {
            selections.set(key, code);
        }
        selections
    }
}

/// Result of encoding a selection set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartCode {
    /// Part number, with [`PLACEHOLDER`] for every unselected segment.
    pub code: String,
    /// `true` when every segment of the template has a code.
    pub complete: bool,
    /// Selected segments divided by template length.
    pub completion_ratio: f64,
}

impl PartCode {
    /// Result used while no series or template is chosen.
    pub fn empty() -> Self {
        Self {
            code: String::new(),
            complete: false,
            completion_ratio: 0.0,
        }
    }

    /// Completion as a rounded percentage.
    pub fn percentage(&self) -> u32 {
        // Ratio is non-negative; clamp so stray selections never exceed 100.
        (self.completion_ratio.clamp(0.0, 1.0) * 100.0).round() as u32
    }

    /// Only complete part numbers may be copied.
    pub fn can_copy(&self) -> bool {
        self.complete
    }

    /// Number of unselected segments.
    pub fn placeholder_count(&self) -> usize {
        self.code.chars().filter(|&c| c == PLACEHOLDER).count()
    }

    /// Each character of the code, flagged `true` when it is a placeholder.
    pub fn cells(&self) -> impl Iterator<Item = (char, bool)> + '_ {
        self.code.chars().map(|c| (c, c == PLACEHOLDER))
    }
}

/// Build a part number from selections.
///
/// The model segment falls back to the first code of its table when it has
/// no explicit selection, so the series is visible before any choice is made.
/// That fallback is not counted as a selection. Every other unselected
/// segment contributes a [`PLACEHOLDER`] and makes the result incomplete.
/// A single [`SEPARATOR`] follows the first segment.
///
/// Template keys without a segment definition are skipped. An unknown
/// template yields [`PartCode::empty`].
pub fn build_code(series: &Series, template_name: &str, selections: &Selections) -> PartCode {
    let Some(template) = series.template(template_name) else {
        return PartCode::empty();
    };

    let mut code = String::new();
    let mut complete = true;

    for (index, key) in template.iter().enumerate() {
        let Some(segment) = series.segment(key) else {
            continue;
        };

        match selections.get(key) {
            Some(selected) => code.push_str(selected),
            None if key == keys::MODEL => {
                code.push_str(segment.values.first_code().unwrap_or_default());
            }
            None => {
                code.push(PLACEHOLDER);
                complete = false;
            }
        }

        if index == 0 {
            code.push(SEPARATOR);
        }
    }

    let completion_ratio = if template.is_empty() {
        0.0
    } else {
        selections.len() as f64 / template.len() as f64
    };

    PartCode {
        code,
        complete,
        completion_ratio,
    }
}
