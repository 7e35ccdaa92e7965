//! Human-readable descriptions of segment codes.
//!
//! Describing never fails. Codes that cannot be resolved produce a fallback
//! description, since partial or garbled input is an expected state while a
//! user is still typing or selecting.

use crate::catalogue::{Segment, SpeedTable, ValueTable};

/// Description of a wildcard (`?`) code.
pub const UNSPECIFIED: &str = "unspecified (?)";

/// Description of a code missing from its segment's table.
pub const UNKNOWN_VALUE: &str = "unknown value";

/// Description of a gear ratio code outside every gear family.
pub const CUSTOM_REDUCTION_RATIO: &str = "custom reduction ratio";

/// Description of a two-character option code on high-power flat motors.
pub const CABLE_CONNECTOR_OPTION: &str = "cable length and connector type option";

/// Describe a segment code.
///
/// Resolution order, first match wins:
/// 1. speed/power tables join their non-null ratings as `"<kW>kW @ <speed>"`,
///    falling back to the raw code;
/// 2. flat tables render numbers as watts and strings verbatim;
/// 3. gear ratio tables scan each gear family in declaration order, else
///    [`CUSTOM_REDUCTION_RATIO`];
/// 4. free-format segments describe their pattern;
/// 5. anything else is [`UNKNOWN_VALUE`].
pub fn describe(segment: &Segment, code: &str) -> String {
    segment.describe(code)
}

impl Segment {
    /// Describe a code of this segment. See [`describe`].
    pub fn describe(&self, code: &str) -> String {
        if let ValueTable::SpeedPower(rows) = &self.values {
            return rows
                .get(code)
                .and_then(speed_power_summary)
                .unwrap_or_else(|| code.to_string());
        }

        if let Some(description) = self.values.lookup(code) {
            return description;
        }

        if self.values.gear_types().is_some() {
            return self
                .values
                .gear_ratio(code)
                .unwrap_or(CUSTOM_REDUCTION_RATIO)
                .to_string();
        }

        match self.values.format() {
            Some(pattern) => format_hint(pattern),
            None => UNKNOWN_VALUE.to_string(),
        }
    }
}

/// `"Format: <pattern>"` description of a free-format segment.
pub(crate) fn format_hint(pattern: &str) -> String {
    format!("Format: {pattern}")
}

/// Joins the non-null ratings of a speed table, or `None` if there are none.
pub(crate) fn speed_power_summary(speeds: &SpeedTable) -> Option<String> {
    let ratings: Vec<String> = speeds
        .iter()
        .filter_map(|(speed, power)| power.as_ref().map(|p| format!("{p}kW @ {speed}")))
        .collect();
    (!ratings.is_empty()).then(|| ratings.join(", "))
}
