//! Integration tests for loading catalogues from the filesystem.

use servo_nomenclature::{
    CatalogueSet, CatalogueSource, DirectorySource, Error, Platform, decode, load_catalogue,
};

use crate::common::{tiny_catalogue, write_bundled_catalogues};

#[tokio::test]
async fn test_directory_source_matches_bundled() {
    let dir = tempfile::tempdir().unwrap();
    write_bundled_catalogues(dir.path());

    let source = DirectorySource::new(dir.path());
    let loaded = CatalogueSet::load(&source).await.unwrap();

    assert_eq!(loaded, CatalogueSet::bundled().unwrap());
}

#[tokio::test]
async fn test_directory_source_custom_catalogue() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(Platform::SigmaX.file_name()),
        tiny_catalogue("SGMXZ"),
    )
    .unwrap();
    std::fs::write(
        dir.path().join(Platform::Sigma7.file_name()),
        tiny_catalogue("SGM7Z"),
    )
    .unwrap();

    let catalogues = CatalogueSet::load(&DirectorySource::new(dir.path()))
        .await
        .unwrap();
    let decoded = decode(&catalogues, "sgm7z-02a").unwrap();

    assert_eq!(decoded.platform, Platform::Sigma7);
    assert_eq!(decoded.series, "SGM7Z");
    assert_eq!(decoded.segments[1].description, "200 W");
    assert_eq!(decoded.segments[2].description, "200 VAC");
}

#[tokio::test]
async fn test_missing_platform_aborts_load() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(Platform::SigmaX.file_name()),
        tiny_catalogue("SGMXZ"),
    )
    .unwrap();

    let err = CatalogueSet::load(&DirectorySource::new(dir.path()))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::DataUnavailable {
            platform: Platform::Sigma7,
            ..
        }
    ));
    assert!(!err.is_recoverable());
}

#[tokio::test]
async fn test_malformed_document_is_data_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(Platform::SigmaX.file_name()), "{ broken").unwrap();

    let source = DirectorySource::new(dir.path());
    let err = load_catalogue(&source, Platform::SigmaX).await.unwrap_err();

    assert!(matches!(err, Error::DataUnavailable { .. }));
    assert!(err.to_string().contains("sigma-x"));
}

#[tokio::test]
async fn test_directory_source_describes_itself() {
    let dir = tempfile::tempdir().unwrap();
    let source = DirectorySource::new(dir.path());

    assert!(source.describe().contains(&dir.path().display().to_string()));
    assert_eq!(
        source.path_for(Platform::Sigma7),
        dir.path().join("sigma_7_series_nomenclature.json")
    );
}
