//! Tests for loading observation tables from disk

use std::fs::File;
use std::sync::Arc;

use arrow::array::Array;
use itl3_compare::loader::{self, DataLoader, SourceFormat};
use itl3_compare::{CompareConfig, CompareError};
use parquet::arrow::ArrowWriter;

use crate::utils::{REGIONS, YEARS, config_for, regional_csv};

#[test]
fn test_load_csv_sources() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());

    let tables = loader::load(&config).unwrap();
    let regional = &tables.regional;

    let expected_rows = REGIONS.len() * YEARS.count();
    assert_eq!(regional.observations().num_rows(), expected_rows);
    assert_eq!(regional.regions().len(), REGIONS.len());

    // Ordered by name, and quoted names survive intact
    let names: Vec<_> = regional.regions().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Bristol, City of",
            "Camden and City of London",
            "Hartlepool",
            "Manchester",
            "Sheffield"
        ]
    );

    let national = tables.national.observations();
    assert!(national.has_indicator("GVA per hour worked"));
    assert_eq!(national.values("GVA per hour worked").unwrap().null_count(), 1);
    assert_eq!(tables.national.region().unwrap().name, "United Kingdom");
}

#[test]
fn test_missing_source_is_data_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let config = CompareConfig {
        regional_path: dir.path().join("absent.csv"),
        national_path: dir.path().join("absent_uk.csv"),
        ..CompareConfig::default()
    };

    let err = loader::load(&config).unwrap_err();
    assert!(matches!(err, CompareError::DataUnavailable { .. }));
    assert!(!err.is_recoverable());
}

#[test]
fn test_source_without_key_columns_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.csv");
    std::fs::write(&path, "region,when,Active\nTLC31,2022,0.7\n").unwrap();

    let err = loader::load_regional(&path, 1024).unwrap_err();
    match err {
        CompareError::DataUnavailable { path: failed, reason } => {
            assert_eq!(failed, path);
            assert!(reason.contains("code"), "unexpected reason: {reason}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_data_loader_memoizes() {
    let dir = tempfile::tempdir().unwrap();
    let loader = DataLoader::new(config_for(dir.path()));
    assert!(!loader.is_loaded());

    let first = loader.load().unwrap();
    // The sources may disappear once loaded
    std::fs::remove_file(&loader.config().regional_path).unwrap();
    let second = loader.load().unwrap();

    assert!(loader.is_loaded());
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_failed_load_is_not_memoized() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());
    let regional_path = config.regional_path.clone();
    std::fs::remove_file(&regional_path).unwrap();

    let loader = DataLoader::new(config);
    assert!(loader.load().is_err());
    assert!(!loader.is_loaded());

    std::fs::write(&regional_path, regional_csv()).unwrap();
    assert!(loader.load().is_ok());
}

#[tokio::test]
async fn test_load_async_matches_sync() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());

    let sync_tables = loader::load(&config).unwrap();
    let async_tables = loader::load_async(&config).await.unwrap();

    assert_eq!(
        sync_tables.regional.observations().batch(),
        async_tables.regional.observations().batch()
    );
    assert_eq!(sync_tables.regional.regions(), async_tables.regional.regions());
}

#[test]
fn test_parquet_source() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());
    let csv_table = loader::load_regional(&config.regional_path, 4096).unwrap();

    let parquet_path = dir.path().join("regions.parquet");
    let batch = csv_table.observations().batch();
    let file = File::create(&parquet_path).unwrap();
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None).unwrap();
    writer.write(batch).unwrap();
    writer.close().unwrap();

    assert_eq!(SourceFormat::from_path(&parquet_path), SourceFormat::Parquet);
    let parquet_table = loader::load_regional(&parquet_path, 64).unwrap();
    assert_eq!(parquet_table.observations().batch(), batch);
    assert_eq!(parquet_table.regions(), csv_table.regions());
}
