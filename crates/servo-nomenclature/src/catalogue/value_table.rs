//! Segment value tables.
//!
//! A segment's codes are described by one of several table shapes. The
//! catalogue documents encode the shape implicitly through which keys are
//! present (`values`, `values_for_80_400W`, `values_for_750_1500W`,
//! `values_by_gear_type`) and through the JSON type of `values`. The shape is
//! classified once at load time into [`ValueTable`], so describing and
//! decoding dispatch on the variant instead of on series or segment names.
//!
//! Classification is lenient: an unexpected shape degrades to a
//! [`ValueTable::Empty`] table or to [`FlatValue::Other`] entries, and the
//! affected codes later describe as unknown values.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;

/// Ordered code → value mapping.
pub type FlatTable = IndexMap<String, FlatValue>;

/// Ordered speed → power mapping; `None` where the motor has no rating at
/// that speed.
pub type SpeedTable = IndexMap<String, Option<String>>;

/// A single entry of a flat table.
#[derive(Debug, Clone, PartialEq)]
pub enum FlatValue {
    /// Numeric value, interpreted as a power rating in watts.
    Watts(f64),
    /// Plain description.
    Text(String),
    /// Any other JSON value, kept verbatim.
    Other(Value),
}

impl FlatValue {
    fn from_json(value: &Value) -> Self {
        match value {
            Value::Number(n) => n
                .as_f64()
                .map_or_else(|| Self::Other(value.clone()), Self::Watts),
            Value::String(s) => Self::Text(s.clone()),
            other => Self::Other(other.clone()),
        }
    }
}

impl fmt::Display for FlatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Watts(watts) => write!(f, "{watts} W"),
            Self::Text(text) => f.write_str(text),
            Self::Other(value) => write!(f, "{value}"),
        }
    }
}

/// One gear family of a gear-ratio segment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GearType {
    /// Description of the gear family.
    pub description: String,
    /// Ratio code → ratio description, e.g. `"B" → "1/11"`.
    pub codes: IndexMap<String, String>,
}

/// Shape of a segment's value table.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueTable {
    /// Code → description or watts.
    Flat(FlatTable),
    /// Code → (speed → power in kW). Used for high-torque series whose output
    /// code stands for a rating at several speeds.
    SpeedPower(IndexMap<String, SpeedTable>),
    /// Option codes split by motor power class.
    OptionSpec {
        /// Single-character codes valid for 80 W to 400 W motors.
        low_power: FlatTable,
        /// Two-character cable/connector codes for 750 W to 1500 W motors.
        high_power: Option<FlatTable>,
    },
    /// Gear reduction ratios grouped by gear type.
    GearRatios {
        /// Codes valid for every gear type (often empty).
        flat: FlatTable,
        /// Gear families in declaration order.
        gear_types: IndexMap<String, GearType>,
    },
    /// A free single character matching the described pattern, e.g. `A-Z`.
    Format(String),
    /// No usable table.
    Empty,
}

impl ValueTable {
    /// Returns the table consulted for plain code lookups, if any.
    pub fn flat(&self) -> Option<&FlatTable> {
        match self {
            Self::Flat(table) => Some(table),
            Self::OptionSpec { low_power, .. } => Some(low_power),
            Self::GearRatios { flat, .. } => Some(flat),
            _ => None,
        }
    }

    /// Looks a code up in the flat table and renders it.
    pub fn lookup(&self, code: &str) -> Option<String> {
        self.flat()?.get(code).map(ToString::to_string)
    }

    /// Returns the gear families of a gear-ratio table.
    pub fn gear_types(&self) -> Option<&IndexMap<String, GearType>> {
        match self {
            Self::GearRatios { gear_types, .. } => Some(gear_types),
            _ => None,
        }
    }

    /// Finds a ratio code in the gear families; the first family declaring it
    /// wins.
    pub fn gear_ratio(&self, code: &str) -> Option<&str> {
        self.gear_types()?
            .values()
            .find_map(|gear| gear.codes.get(code))
            .map(String::as_str)
    }

    /// Returns the pattern of a free-format segment.
    pub fn format(&self) -> Option<&str> {
        match self {
            Self::Format(pattern) => Some(pattern),
            _ => None,
        }
    }

    /// First code in declaration order.
    pub fn first_code(&self) -> Option<&str> {
        let first = match self {
            Self::SpeedPower(table) => table.keys().next(),
            Self::GearRatios { flat, gear_types } => flat
                .keys()
                .next()
                .or_else(|| gear_types.values().find_map(|g| g.codes.keys().next())),
            other => other.flat().and_then(|t| t.keys().next()),
        };
        first.map(String::as_str)
    }
}

/// Segment as written in the catalogue document.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawSegment {
    #[serde(default)]
    item: Option<String>,
    #[serde(default)]
    values: Option<Value>,
    #[serde(default, rename = "values_for_80_400W")]
    values_for_80_400w: Option<Value>,
    #[serde(default, rename = "values_for_750_1500W")]
    values_for_750_1500w: Option<Value>,
    #[serde(default)]
    values_by_gear_type: Option<Value>,
}

impl RawSegment {
    pub(crate) fn item(&self) -> String {
        self.item.clone().unwrap_or_default()
    }

    pub(crate) fn classify(&self) -> ValueTable {
        if let Some(Value::Object(gears)) = &self.values_by_gear_type {
            return ValueTable::GearRatios {
                flat: self.values.as_ref().map(flat_table).unwrap_or_default(),
                gear_types: gears
                    .iter()
                    .map(|(name, gear)| (name.clone(), gear_type(gear)))
                    .collect(),
            };
        }

        if let Some(low @ Value::Object(_)) = &self.values_for_80_400w {
            return ValueTable::OptionSpec {
                low_power: flat_table(low),
                high_power: self
                    .values_for_750_1500w
                    .as_ref()
                    .filter(|v| v.is_object())
                    .map(flat_table),
            };
        }

        match &self.values {
            Some(Value::Object(map)) if is_speed_power(map) => ValueTable::SpeedPower(
                map.iter()
                    .map(|(code, speeds)| (code.clone(), speed_table(speeds)))
                    .collect(),
            ),
            Some(values @ Value::Object(_)) => ValueTable::Flat(flat_table(values)),
            Some(Value::String(pattern)) => ValueTable::Format(pattern.clone()),
            _ => ValueTable::Empty,
        }
    }
}

fn is_speed_power(map: &Map<String, Value>) -> bool {
    !map.is_empty() && map.values().all(Value::is_object)
}

fn flat_table(value: &Value) -> FlatTable {
    value
        .as_object()
        .map(|map| {
            map.iter()
                .map(|(code, v)| (code.clone(), FlatValue::from_json(v)))
                .collect()
        })
        .unwrap_or_default()
}

fn speed_table(value: &Value) -> SpeedTable {
    value
        .as_object()
        .map(|map| {
            map.iter()
                .map(|(speed, power)| {
                    let power = match power {
                        Value::Null => None,
                        Value::String(s) => Some(s.clone()),
                        other => Some(other.to_string()),
                    };
                    (speed.clone(), power)
                })
                .collect()
        })
        .unwrap_or_default()
}

fn gear_type(value: &Value) -> GearType {
    let description = value
        .get("description")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let codes = value
        .get("codes")
        .and_then(Value::as_object)
        .map(|codes| {
            codes
                .iter()
                .map(|(code, ratio)| {
                    let ratio = ratio
                        .as_str()
                        .map_or_else(|| ratio.to_string(), str::to_string);
                    (code.clone(), ratio)
                })
                .collect()
        })
        .unwrap_or_default();
    GearType { description, codes }
}
