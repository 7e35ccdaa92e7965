//! Integration tests for interactive selection sessions.

use std::sync::Arc;

use servo_nomenclature::{Choices, Platform, Session, decode};

use crate::common::{bundled, session_on};

#[test]
fn test_build_gear_code_then_decode_it() {
    let mut session = session_on(Platform::SigmaX);
    session.select_series("SGMXJ").unwrap();
    session
        .select_template("with_gear_exclusive_customer_with_region_options")
        .unwrap();

    let picks = [
        ("b", "02"),
        ("c", "A"),
        ("d", "7"),
        ("e", "A"),
        ("f", "2"),
        ("g", "1"),
        ("j", "J"),
        ("o", "D"),
        ("k", "0"),
        ("h", "m"),
    ];
    for (key, code) in picks {
        let part = session.set_segment_value(key, Some(code));
        assert!(!part.can_copy());
    }
    let part = session.set_segment_value("i", Some("E"));

    assert!(part.can_copy());
    assert_eq!(part.code, "SGMXJ-02A7A21JD0ME");

    let decoded = session.decode(&part.code).unwrap();
    assert_eq!(decoded.template, "with_gear");
    let summary = session.summary();
    assert_eq!(summary.len(), 12);
    assert_eq!(decoded.segments.len(), 10);
    for (entry, segment) in summary.iter().zip(&decoded.segments) {
        assert_eq!(entry.key, segment.key);
        assert_eq!(entry.code, segment.code);
        assert_eq!(entry.description, segment.description);
    }
}

#[test]
fn test_choices_drive_a_complete_selection() {
    let mut session = session_on(Platform::Sigma7);
    session.select_series("SGM7G").unwrap();
    session.select_template("exclusive_customer").unwrap();

    for choice in session.segment_choices() {
        let code = match &choice.choices {
            Choices::List { options } => options[0].code.clone(),
            Choices::FreeInput { .. } => "x".to_string(),
        };
        session.set_segment_value(&choice.key, Some(&code));
    }

    let part = session.part_code();
    assert!(part.complete);
    assert_eq!(part.percentage(), 100);
    assert!(part.code.ends_with('X'));
    assert_eq!(decode(&bundled(), &part.code).unwrap().series, "SGM7G");
}

#[test]
fn test_sessions_share_catalogues() {
    let catalogues = bundled();
    let mut first = Session::new(Arc::clone(&catalogues));
    let mut second = Session::new(Arc::clone(&catalogues));

    first.select_series("SGMXA").unwrap();
    second.select_series("SGMXP").unwrap();

    assert_eq!(first.series(), Some("SGMXA"));
    assert_eq!(second.series(), Some("SGMXP"));
    assert_eq!(Arc::strong_count(&catalogues), 3);
}

#[test]
fn test_progress_while_selecting() {
    let mut session = session_on(Platform::SigmaX);
    session.select_series("SGMXA").unwrap();
    let part = session.select_template("standard").unwrap();
    assert_eq!(part.percentage(), 14);

    let part = session.set_segment_value("b", Some("01"));
    assert_eq!(part.percentage(), 29);
    let placeholders = part.cells().filter(|(_, placeholder)| *placeholder).count();
    assert_eq!(placeholders, 5);
}
