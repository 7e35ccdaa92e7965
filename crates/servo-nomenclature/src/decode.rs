//! Part-number decoding.
//!
//! Decoding is heuristic by nature: segment widths are not recorded in the
//! part number, some segments are one or two characters wide, and users may
//! type `?` for characters they do not know. The decoder therefore works in
//! three phases:
//!
//! 1. **Series detection.** The normalized input is matched against every
//!    series name, platform by platform in [`Platform::ALL`] order and series
//!    by series in catalogue order. An exact prefix match is tried first;
//!    only if nothing matches, a wildcard-tolerant pass allows arbitrary
//!    characters between the letters of the series name.
//! 2. **Template selection.** The first template whose expected length
//!    admits the input length wins. The tolerance is loose on purpose and may
//!    pick a template that differs from the one used to encode the input.
//!    If no template qualifies, the standard template is used and the result
//!    is flagged as a best guess.
//! 3. **Positional walk.** The template's segments consume the input left to
//!    right. Only the gear ratio and option segments retry a wider width when
//!    the narrow one does not resolve; there is no backtracking across
//!    segments.
//!
//! Unresolved codes never abort decoding. The only failures are blank input
//! and input that matches no series at all.

use regex::Regex;
use serde::Serialize;

use crate::catalogue::{
    CatalogueSet, Platform, STANDARD_TEMPLATE, Segment, Series, Template, ValueTable, keys,
    series_title,
};
use crate::describe::{
    CABLE_CONNECTOR_OPTION, CUSTOM_REDUCTION_RATIO, UNKNOWN_VALUE, UNSPECIFIED, format_hint,
    speed_power_summary,
};
use crate::error::{Error, Result};

/// Marks an unknown character in decode input.
pub const WILDCARD: char = '?';

/// One decoded segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedSegment {
    /// Segment key, e.g. `b`.
    pub key: String,
    /// Segment label, e.g. "Rated output".
    pub label: String,
    /// Characters consumed for this segment.
    pub code: String,
    /// Resolved description.
    pub description: String,
}

impl DecodedSegment {
    /// Returns `true` if the segment contains a wildcard.
    pub fn is_unspecified(&self) -> bool {
        self.code.contains(WILDCARD) || self.description == UNSPECIFIED
    }
}

/// Result of decoding a part number.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedResult {
    /// Platform the series was found in.
    pub platform: Platform,
    /// Detected series name.
    pub series: String,
    /// Name of the template used for the walk.
    pub template: String,
    /// `true` when no template matched and the standard one was assumed.
    pub best_guess: bool,
    /// Input as typed, trimmed and upper-cased.
    pub input: String,
    /// Input with whitespace and hyphens removed.
    pub normalized: String,
    /// Decoded segments in template order.
    pub segments: Vec<DecodedSegment>,
}

impl DecodedResult {
    /// Template name, tagged when it is a best guess.
    pub fn template_label(&self) -> String {
        if self.best_guess {
            format!("{} (best guess)", self.template)
        } else {
            self.template.clone()
        }
    }

    /// Product title of the detected series.
    pub fn series_title(&self) -> &str {
        series_title(&self.series)
    }
}

/// Strip whitespace and hyphens and upper-case the rest.
///
/// # Examples
///
/// ```
/// use servo_nomenclature::decode::normalize;
///
/// assert_eq!(normalize(" sgmxa-01 afa6c "), "SGMXA01AFA6C");
/// ```
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .flat_map(char::to_uppercase)
        .collect()
}

/// Decode a part number against both platforms' catalogues.
///
/// Fails with [`Error::EmptyInput`] for blank input and with
/// [`Error::UnrecognizedSeries`] when no series prefix matches.
pub fn decode(catalogues: &CatalogueSet, raw: &str) -> Result<DecodedResult> {
    let input = raw.trim().to_uppercase();
    if input.is_empty() {
        return Err(Error::EmptyInput);
    }
    let normalized = normalize(raw);

    let Some(detected) = detect_series(catalogues, &normalized) else {
        return Err(Error::UnrecognizedSeries {
            input: normalized,
            expected: expected_series(catalogues),
        });
    };

    let chars: Vec<char> = normalized.chars().collect();
    let series_len = detected.name.chars().count();
    let choice = choose_template(detected.series, series_len, chars.len());

    tracing::debug!(
        series = detected.name,
        platform = %detected.platform,
        template = %choice.name,
        best_guess = choice.best_guess,
        "Decoding part number"
    );

    let mut cursor = Cursor::new(chars, series_len);
    let mut segments = Vec::with_capacity(choice.template.len());

    for key in choice.template {
        let Some(segment) = detected.series.segment(key) else {
            continue;
        };
        let Some(decoded) = decode_segment(detected.name, key, segment, &mut cursor) else {
            break;
        };
        segments.push(decoded);
    }

    Ok(DecodedResult {
        platform: detected.platform,
        series: detected.name.to_string(),
        template: choice.name,
        best_guess: choice.best_guess,
        input,
        normalized,
        segments,
    })
}

// ============================================================================
// Series detection
// ============================================================================

struct Detected<'a> {
    platform: Platform,
    name: &'a str,
    series: &'a Series,
}

fn detect_series<'a>(catalogues: &'a CatalogueSet, code: &str) -> Option<Detected<'a>> {
    let exact = find_series(catalogues, |name| code.starts_with(name));
    if exact.is_some() {
        return exact;
    }

    let wildcard = find_series(catalogues, |name| {
        wildcard_pattern(name).is_some_and(|pattern| pattern.is_match(code))
    });
    if let Some(detected) = &wildcard {
        tracing::debug!(series = detected.name, "Series matched by wildcard pass");
    }
    wildcard
}

fn find_series<'a>(
    catalogues: &'a CatalogueSet,
    mut matches: impl FnMut(&str) -> bool,
) -> Option<Detected<'a>> {
    catalogues.iter().find_map(|catalogue| {
        catalogue
            .iter()
            .find(|(name, _)| matches(name))
            .map(|(name, series)| Detected {
                platform: catalogue.platform(),
                name,
                series,
            })
    })
}

/// `^S.*G.*M.*X.*A`: the series letters in order, anything in between.
fn wildcard_pattern(series: &str) -> Option<Regex> {
    let letters: Vec<String> = series
        .chars()
        .map(|c| regex::escape(c.encode_utf8(&mut [0; 4])))
        .collect();
    let pattern = format!("(?i)^{}", letters.join(".*"));
    match Regex::new(&pattern) {
        Ok(regex) => Some(regex),
        Err(e) => {
            tracing::warn!(series, error = %e, "Skipping series with unusable name");
            None
        }
    }
}

fn expected_series(catalogues: &CatalogueSet) -> Vec<String> {
    catalogues
        .iter()
        .map(|catalogue| {
            let names: Vec<&str> = catalogue.series_names().collect();
            format!("{} ({})", catalogue.platform().title(), names.join(", "))
        })
        .collect()
}

// ============================================================================
// Template selection
// ============================================================================

struct TemplateChoice<'a> {
    name: String,
    template: &'a [String],
    best_guess: bool,
}

/// Length of a template's part number assuming one character per segment,
/// plus one for each segment that may be two characters wide.
fn expected_length(template: &Template, series_len: usize) -> usize {
    series_len
        + template
            .iter()
            .filter(|key| key.as_str() != keys::MODEL)
            .map(|key| match key.as_str() {
                keys::GEAR_RATIO | keys::OPTIONS => 2,
                _ => 1,
            })
            .sum::<usize>()
}

fn choose_template(series: &Series, series_len: usize, input_len: usize) -> TemplateChoice<'_> {
    let matched = series.templates.iter().find(|(_, template)| {
        (series_len..=expected_length(template, series_len) + 2).contains(&input_len)
    });
    if let Some((name, template)) = matched {
        return TemplateChoice {
            name: name.clone(),
            template,
            best_guess: false,
        };
    }

    let fallback = series
        .templates
        .get_key_value(STANDARD_TEMPLATE)
        .or_else(|| series.templates.first());
    tracing::debug!(input_len, "No template matches input length, assuming standard");
    match fallback {
        Some((name, template)) => TemplateChoice {
            name: name.clone(),
            template,
            best_guess: true,
        },
        None => TemplateChoice {
            name: STANDARD_TEMPLATE.to_string(),
            template: &[],
            best_guess: true,
        },
    }
}

// ============================================================================
// Positional walk
// ============================================================================

/// Read position over the normalized input. Reads past the end yield
/// shorter (possibly empty) codes rather than failing.
struct Cursor {
    chars: Vec<char>,
    position: usize,
}

impl Cursor {
    fn new(chars: Vec<char>, position: usize) -> Self {
        Self { chars, position }
    }

    fn peek(&self, width: usize) -> String {
        let start = self.position.min(self.chars.len());
        let end = (self.position + width).min(self.chars.len());
        self.chars[start..end].iter().collect()
    }

    fn is_exhausted(&self) -> bool {
        self.position >= self.chars.len()
    }

    fn take(&mut self, width: usize) -> String {
        let code = self.peek(width);
        self.position += width;
        code
    }
}

/// How a segment was resolved: the width it occupies and its description.
struct Resolution {
    width: usize,
    description: String,
}

impl Resolution {
    fn new(width: usize, description: impl Into<String>) -> Self {
        Self {
            width,
            description: description.into(),
        }
    }
}

/// Decode the segment at the cursor. `None` ends the walk.
fn decode_segment(
    series_name: &str,
    key: &str,
    segment: &Segment,
    cursor: &mut Cursor,
) -> Option<DecodedSegment> {
    if key == keys::MODEL {
        let description = segment
            .values
            .lookup(series_name)
            .unwrap_or_else(|| series_name.to_string());
        return Some(DecodedSegment {
            key: key.to_string(),
            label: segment.item.clone(),
            code: series_name.to_string(),
            description,
        });
    }

    let resolution = match key {
        keys::RATED_OUTPUT => rated_output(segment, &cursor.peek(2)),
        keys::GEAR_RATIO => gear_ratio(segment, cursor),
        _ if matches!(segment.values, ValueTable::OptionSpec { .. }) => {
            option_spec(segment, cursor)
        }
        _ if cursor.is_exhausted() => return None,
        _ => single(segment, &cursor.peek(1)),
    };

    Some(DecodedSegment {
        key: key.to_string(),
        label: segment.item.clone(),
        code: cursor.take(resolution.width),
        description: resolution.description,
    })
}

/// Rated output codes are always two characters.
fn rated_output(segment: &Segment, code: &str) -> Resolution {
    if code.contains(WILDCARD) {
        return Resolution::new(2, UNSPECIFIED);
    }
    let description = match &segment.values {
        ValueTable::SpeedPower(rows) => rows
            .get(code)
            .map(|speeds| speed_power_summary(speeds).unwrap_or_else(|| code.to_string())),
        values => values.lookup(code),
    };
    Resolution::new(2, description.unwrap_or_else(|| UNKNOWN_VALUE.to_string()))
}

/// One character from the tables, else a two-character custom ratio.
fn gear_ratio(segment: &Segment, cursor: &Cursor) -> Resolution {
    let narrow = cursor.peek(1);
    lone_wildcard(&narrow)
        .or_else(|| {
            segment
                .values
                .lookup(&narrow)
                .or_else(|| segment.values.gear_ratio(&narrow).map(str::to_string))
                .map(|description| Resolution::new(1, description))
        })
        .or_else(|| {
            segment.values.gear_types().map(|_| {
                let wide = cursor.peek(2);
                let description = if wide.contains(WILDCARD) {
                    UNSPECIFIED
                } else {
                    CUSTOM_REDUCTION_RATIO
                };
                Resolution::new(2, description)
            })
        })
        .unwrap_or_else(|| Resolution::new(1, UNKNOWN_VALUE))
}

/// One character from the 80–400 W table, else a two-character
/// cable/connector code.
fn option_spec(segment: &Segment, cursor: &Cursor) -> Resolution {
    let narrow = cursor.peek(1);
    lone_wildcard(&narrow)
        .or_else(|| {
            segment
                .values
                .lookup(&narrow)
                .map(|description| Resolution::new(1, description))
        })
        .unwrap_or_else(|| {
            let wide = cursor.peek(2);
            let description = match &segment.values {
                _ if wide.contains(WILDCARD) => UNSPECIFIED,
                ValueTable::OptionSpec {
                    high_power: Some(_),
                    ..
                } => CABLE_CONNECTOR_OPTION,
                _ => UNKNOWN_VALUE,
            };
            Resolution::new(2, description)
        })
}

fn single(segment: &Segment, code: &str) -> Resolution {
    if code.starts_with(WILDCARD) {
        return Resolution::new(1, UNSPECIFIED);
    }
    let description = match &segment.values {
        ValueTable::Format(pattern) => format_hint(pattern),
        values => values
            .lookup(code)
            .unwrap_or_else(|| UNKNOWN_VALUE.to_string()),
    };
    Resolution::new(1, description)
}

fn lone_wildcard(code: &str) -> Option<Resolution> {
    (code.len() == 1 && code.starts_with(WILDCARD)).then(|| Resolution::new(1, UNSPECIFIED))
}
