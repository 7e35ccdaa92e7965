//! Handler functions for the codec commands.
//!
//! Each command has a pure `render_*` or `build_*` half that returns what
//! would be printed, and a thin `cmd_*` half that prints it.

use std::fmt::Write as _;
use std::sync::Arc;

use serde_json::json;
use servo_nomenclature::catalogue::series_title;
use servo_nomenclature::{CatalogueSet, Choices, DecodedResult, Platform, Session, decode};

use crate::config::OutputFormat;
use crate::error::{Error, Result};

// ============================================================================
// decode
// ============================================================================

/// Decode every code, printing results to stdout and failures to stderr.
///
/// Returns the number of codes that could not be decoded.
pub fn cmd_decode(
    catalogues: &CatalogueSet,
    codes: &[String],
    format: OutputFormat,
) -> Result<usize> {
    let results: Vec<_> = codes
        .iter()
        .map(|code| (code, decode(catalogues, code)))
        .collect();
    let failures = results.iter().filter(|(_, result)| result.is_err()).count();

    match format {
        OutputFormat::Json => {
            let documents: Vec<_> = results
                .iter()
                .map(|(code, result)| match result {
                    Ok(decoded) => serde_json::to_value(decoded),
                    Err(e) => Ok(json!({ "input": code, "error": e.to_string() })),
                })
                .collect::<std::result::Result<_, _>>()?;
            println!("{}", serde_json::to_string_pretty(&documents)?);
        }
        OutputFormat::Text => {
            for (code, result) in &results {
                match result {
                    Ok(decoded) => println!("{}", render_decoded(decoded)),
                    Err(e) => eprintln!("{code}: {e}"),
                }
            }
        }
    }

    Ok(failures)
}

/// Text rendering of one decoded part number.
pub fn render_decoded(decoded: &DecodedResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", decoded.input);
    let _ = writeln!(
        out,
        "  Series:   {} - {} ({})",
        decoded.series,
        decoded.series_title(),
        decoded.platform.title()
    );
    let _ = writeln!(out, "  Template: {}", decoded.template_label());
    for segment in &decoded.segments {
        let marker = if segment.is_unspecified() { "?" } else { " " };
        let _ = writeln!(
            out,
            "  {marker} {:<26} {:<6} {}",
            segment.label, segment.code, segment.description
        );
    }
    out
}

// ============================================================================
// encode
// ============================================================================

/// Split a `key=code` argument.
pub fn parse_assignment(raw: &str) -> Result<(String, String)> {
    match raw.split_once('=') {
        Some((key, code)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), code.trim().to_string()))
        }
        _ => Err(Error::InvalidAssignment(raw.to_string())),
    }
}

/// Drive a session through the requested selections.
///
/// The platform defaults to the one declaring the series, then to
/// `fallback_platform`.
pub fn build_session(
    catalogues: Arc<CatalogueSet>,
    series: &str,
    platform: Option<Platform>,
    fallback_platform: Platform,
    template: &str,
    assignments: &[String],
) -> Result<Session> {
    let series = series.trim().to_uppercase();
    let platform = platform
        .or_else(|| catalogues.find_series(&series).map(|(platform, _)| platform))
        .unwrap_or(fallback_platform);

    let mut session = Session::with_platform(catalogues, platform);
    session.select_series(&series)?;
    session.select_template(template)?;
    for raw in assignments {
        let (key, code) = parse_assignment(raw)?;
        session.set_segment_value(&key, Some(&code));
    }
    Ok(session)
}

/// Text rendering of a session's part number and selections.
pub fn render_encoded(session: &Session) -> String {
    let part = session.part_code();
    let mut out = String::new();
    let _ = writeln!(out, "{}", part.code);
    if part.can_copy() {
        let _ = writeln!(out, "  complete");
    } else {
        let _ = writeln!(
            out,
            "  incomplete: {}% selected, {} segment(s) open",
            part.percentage(),
            part.placeholder_count()
        );
    }
    for entry in session.summary() {
        let _ = writeln!(out, "    {:<26} {:<6} {}", entry.label, entry.code, entry.description);
    }
    out
}

/// Print the encoded part number.
pub fn cmd_encode(session: &Session, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let part = session.part_code();
            let document = json!({
                "platform": session.platform(),
                "series": session.series(),
                "template": session.template(),
                "code": part.code,
                "complete": part.complete,
                "percentage": part.percentage(),
                "summary": session.summary(),
            });
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
        OutputFormat::Text => print!("{}", render_encoded(session)),
    }
    Ok(())
}

// ============================================================================
// series
// ============================================================================

/// Text listing of series, optionally restricted to one platform.
pub fn render_series(catalogues: &CatalogueSet, platform: Option<Platform>) -> String {
    let mut out = String::new();
    for catalogue in catalogues.iter() {
        if platform.is_some_and(|p| p != catalogue.platform()) {
            continue;
        }
        let _ = writeln!(out, "{}", catalogue.platform().title());
        for (name, series) in catalogue.iter() {
            let templates: Vec<&str> = series.template_names().collect();
            let _ = writeln!(
                out,
                "  {:<6} {:<38} [{}]",
                name,
                series_title(name),
                templates.join(", ")
            );
        }
    }
    out
}

// ============================================================================
// options
// ============================================================================

/// Text listing of the selectable codes of a series template.
pub fn render_options(
    catalogues: Arc<CatalogueSet>,
    series: &str,
    template: &str,
) -> Result<String> {
    let session = build_session(catalogues, series, None, Platform::default(), template, &[])?;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} / {}",
        session.series().unwrap_or_default(),
        session.template().unwrap_or_default()
    );

    for choice in session.segment_choices() {
        let _ = writeln!(out, "{}. {} ({})", choice.number, choice.label, choice.key);
        match &choice.choices {
            Choices::List { options } => {
                let mut group = None;
                for option in options {
                    if option.group.is_some() && option.group != group {
                        group = option.group.clone();
                        let _ = writeln!(out, "   {}:", option.group.as_deref().unwrap_or_default());
                    }
                    let _ = writeln!(out, "     {}", option.label);
                }
            }
            Choices::FreeInput { pattern, max_len } => {
                let _ = writeln!(out, "     free input, {max_len} character(s), {pattern}");
            }
        }
    }
    Ok(out)
}
