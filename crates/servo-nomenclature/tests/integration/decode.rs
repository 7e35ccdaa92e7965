//! Integration tests for decoding against the bundled catalogues.

use servo_nomenclature::describe::{CUSTOM_REDUCTION_RATIO, UNKNOWN_VALUE, UNSPECIFIED};
use servo_nomenclature::{Error, Platform, decode};

use crate::common::bundled;

#[test]
fn test_decode_every_bundled_series() {
    let catalogues = bundled();
    for catalogue in catalogues.iter() {
        for (name, series) in catalogue.iter() {
            let decoded = decode(&catalogues, name).unwrap();
            assert_eq!(decoded.series, name);
            assert_eq!(decoded.platform, catalogue.platform());
            assert_eq!(decoded.segments[0].code, name);
            assert_eq!(
                Some(decoded.segments[0].description.as_str()),
                series.segment("a").and_then(|a| a.values.lookup(name)).as_deref()
            );
        }
    }
}

#[test]
fn test_decode_gear_code_takes_first_fitting_template() {
    let decoded = decode(&bundled(), "SGMXA-04AFA6CHBF K").unwrap();
    let described: Vec<(&str, &str)> = decoded
        .segments
        .iter()
        .map(|s| (s.key.as_str(), s.code.as_str()))
        .collect();

    // with_gear's length band already covers the trailing customer code, so
    // the walk ends at the gear output shaft.
    assert_eq!(decoded.template, "with_gear");
    assert!(!decoded.best_guess);
    assert_eq!(
        described,
        [
            ("a", "SGMXA"),
            ("b", "04"),
            ("c", "A"),
            ("d", "F"),
            ("e", "A"),
            ("f", "6"),
            ("g", "C"),
            ("j", "H"),
            ("o", "B"),
            ("k", "F"),
        ]
    );
    assert_eq!(decoded.segments[1].description, "400 W");
    assert_eq!(decoded.segments[8].description, "1/11");
}

#[test]
fn test_decode_keeps_going_past_bad_segments() {
    let decoded = decode(&bundled(), "SGMXA-01QFA6C").unwrap();

    assert_eq!(decoded.segments.len(), 7);
    assert_eq!(decoded.segments[2].code, "Q");
    assert_eq!(decoded.segments[2].description, UNKNOWN_VALUE);
    assert_eq!(decoded.segments[6].description, "With 24-VDC holding brake");
}

#[test]
fn test_decode_wildcards_across_segments() {
    let decoded = decode(&bundled(), "SGMXA-0?A?A6C").unwrap();

    assert_eq!(decoded.segments[1].code, "0?");
    assert_eq!(decoded.segments[1].description, UNSPECIFIED);
    assert_eq!(decoded.segments[3].code, "?");
    assert!(decoded.segments[3].is_unspecified());
    assert!(!decoded.segments[2].is_unspecified());
}

#[test]
fn test_decode_custom_gear_ratio() {
    let decoded = decode(&bundled(), "SGM7A-01AFA6CJ992").unwrap();
    let ratio = decoded.segments.iter().find(|s| s.key == "o").unwrap();

    assert_eq!(decoded.platform, Platform::Sigma7);
    assert_eq!(ratio.code, "99");
    assert_eq!(ratio.description, CUSTOM_REDUCTION_RATIO);
}

#[test]
fn test_unrecognized_series_lists_both_platforms() {
    let err = decode(&bundled(), "ZZZZZ123").unwrap_err();
    let Error::UnrecognizedSeries { input, expected } = &err else {
        unreachable!("Expected UnrecognizedSeries, got {err:?}");
    };

    assert_eq!(input, "ZZZZZ123");
    assert_eq!(expected.len(), 2);
    assert!(expected[0].starts_with("Sigma-X ("));
    assert!(expected[1].contains("SGM7A"));
    assert!(err.is_recoverable());
}

#[test]
fn test_decoded_result_serializes_for_renderers() {
    let decoded = decode(&bundled(), "SGMXG-20AFA6C").unwrap();
    let json = serde_json::to_value(&decoded).unwrap();

    assert_eq!(json["platform"], "sigma-x");
    assert_eq!(json["segments"][1]["description"], "1.8kW @ 1500, 2.0kW @ 3000");
}
