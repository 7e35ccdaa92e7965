//! Common test utilities for servo-nomenclature integration tests.

use std::path::Path;
use std::sync::Arc;

use servo_nomenclature::{CatalogueSet, EmbeddedSource, Platform, Session};

/// The bundled catalogues, ready to share between sessions.
pub fn bundled() -> Arc<CatalogueSet> {
    Arc::new(CatalogueSet::bundled().unwrap())
}

/// A fresh session on the given platform.
pub fn session_on(platform: Platform) -> Session {
    Session::with_platform(bundled(), platform)
}

/// Writes the bundled catalogue documents into `dir`, as a directory source
/// expects to find them.
pub fn write_bundled_catalogues(dir: &Path) {
    for platform in Platform::ALL {
        std::fs::write(
            dir.join(platform.file_name()),
            EmbeddedSource::document(platform),
        )
        .unwrap();
    }
}

/// A one-series catalogue document with a single three-segment template.
pub fn tiny_catalogue(series: &str) -> String {
    format!(
        r#"{{
  "series": {{
    "{series}": {{
      "segments": {{
        "a": {{"item": "Servomotor model", "values": {{"{series}": "{series}"}}}},
        "b": {{"item": "Rated output", "values": {{"01": 100, "02": 200}}}},
        "c": {{"item": "Power supply voltage", "values": {{"A": "200 VAC"}}}}
      }},
      "part_number_templates": {{
        "standard": ["a", "b", "c"]
      }}
    }}
  }}
}}"#
    )
}
