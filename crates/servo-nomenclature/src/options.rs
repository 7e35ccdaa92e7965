//! Choosable codes per segment, for building selection pickers.

use serde::Serialize;

use crate::catalogue::{Segment, Series, ValueTable, keys};

/// A choosable code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SegmentOption {
    /// Code to select.
    pub code: String,
    /// Picker text, e.g. `01 - 100 W`.
    pub label: String,
    /// Gear type the code belongs to, for grouped pickers.
    pub group: Option<String>,
}

impl SegmentOption {
    fn new(code: &str, label: String, group: Option<&str>) -> Self {
        Self {
            code: code.to_string(),
            label,
            group: group.map(str::to_string),
        }
    }
}

/// How a segment is chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Choices {
    /// Pick one of the listed codes.
    List {
        /// Codes in catalogue order.
        options: Vec<SegmentOption>,
    },
    /// Type a free code matching the pattern.
    FreeInput {
        /// Pattern hint, e.g. `A-Z`.
        pattern: String,
        /// Maximum code length.
        max_len: usize,
    },
}

/// Choices for one segment of a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SegmentChoices {
    /// Position among the choosable segments, starting at 1.
    pub number: usize,
    /// Segment key.
    pub key: String,
    /// Segment label.
    pub label: String,
    /// What can be chosen.
    pub choices: Choices,
}

impl Segment {
    /// Lists the codes a user may choose for this segment.
    pub fn options(&self) -> Choices {
        let options = match &self.values {
            ValueTable::Format(pattern) => {
                return Choices::FreeInput {
                    pattern: pattern.clone(),
                    max_len: 1,
                };
            }
            ValueTable::Flat(table) | ValueTable::OptionSpec { low_power: table, .. } => table
                .iter()
                .map(|(code, value)| SegmentOption::new(code, format!("{code} - {value}"), None))
                .collect(),
            ValueTable::SpeedPower(rows) => rows
                .iter()
                .map(|(code, speeds)| {
                    let powers: Vec<&str> = speeds.values().flatten().map(String::as_str).collect();
                    let label = if powers.is_empty() {
                        code.clone()
                    } else {
                        format!("{code} - {} kW", powers.join("/"))
                    };
                    SegmentOption::new(code, label, None)
                })
                .collect(),
            ValueTable::GearRatios { flat, gear_types } => flat
                .iter()
                .map(|(code, value)| SegmentOption::new(code, format!("{code} - {value}"), None))
                .chain(gear_types.iter().flat_map(|(gear, table)| {
                    table.codes.iter().map(move |(code, ratio)| {
                        SegmentOption::new(code, format!("{code} - {ratio}"), Some(gear))
                    })
                }))
                .collect(),
            ValueTable::Empty => Vec::new(),
        };
        Choices::List { options }
    }
}

/// Choices for every segment of a template except the model, which is fixed
/// by the series. Unknown templates and undefined segment keys yield nothing.
pub fn segment_choices(series: &Series, template: &str) -> Vec<SegmentChoices> {
    let Some(template) = series.template(template) else {
        return Vec::new();
    };
    template
        .iter()
        .filter(|key| key.as_str() != keys::MODEL)
        .filter_map(|key| series.segment(key).map(|segment| (key, segment)))
        .enumerate()
        .map(|(index, (key, segment))| SegmentChoices {
            number: index + 1,
            key: key.clone(),
            label: segment.item.clone(),
            choices: segment.options(),
        })
        .collect()
}
