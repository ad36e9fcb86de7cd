//! End-to-end tests: fixture files through the engine with the built-in registry

use itl3_compare::{
    CompareError, ComparisonEngine, DataLoader, RegionPair, ToRecordBatch, Unit, default_registry,
};

use crate::utils::{INDICATORS, config_for, non_null_count};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_full_report_for_query_pair() {
    let dir = tempfile::tempdir().unwrap();
    let loader = DataLoader::new(config_for(dir.path()));
    let tables = loader.load().unwrap();
    let engine =
        ComparisonEngine::new(&tables.regional, Some(&tables.national), default_registry()).unwrap();

    let pair =
        RegionPair::from_query(&tables.regional, [("REGION_1", "tlc31"), ("region_2", "tle32")])
            .unwrap();
    let report = engine.compare(&pair, "GVA per hour worked").unwrap();

    assert_eq!(report.regions[0].name, "Hartlepool");
    assert_eq!(report.regions[1].name, "Sheffield");

    // 2022 GVA: 39, 43, 47, 51, 55
    let hartlepool = &report.gauges[0];
    assert!(approx(hartlepool.value, 39.0));
    assert!(approx(hartlepool.median, 47.0));
    assert!(hartlepool.display_min <= hartlepool.median);
    assert!(hartlepool.display_max >= hartlepool.value);

    // National trace skips the missing 2010 observation
    let national = report.time_series.national.as_ref().unwrap();
    assert_eq!(national.len(), 18);
    assert!(!national.years().contains(&2010));

    // Carousel covers every indicator but the headline, in registry order
    let carousel: Vec<_> = report.carousel.iter().map(|p| p.indicator.as_str()).collect();
    assert_eq!(carousel, INDICATORS[1..].to_vec());
    assert!(report.carousel.iter().all(|p| p.unit == Unit::Percentage));

    // Sheffield never reports Export Intensity
    let sheffield = &report.profiles[1];
    assert_eq!(sheffield.len(), INDICATORS.len() - 1);
    assert_eq!(sheffield.score("Export Intensity"), None);
    assert_eq!(report.carousel[0].regions[1].len(), 0);
}

#[test]
fn test_profile_ranks_at_each_baseline_year() {
    let dir = tempfile::tempdir().unwrap();
    let tables = itl3_compare::load(&config_for(dir.path())).unwrap();
    let engine = ComparisonEngine::new(&tables.regional, None, default_registry()).unwrap();

    let hartlepool = engine.profile_vector("TLC31").unwrap();
    // GVA baseline 2004: Bristol has no data, Hartlepool is lowest of four
    assert!(approx(hartlepool.score("GVA per hour worked").unwrap(), 25.0));
    // Low Skilled is inverted: lowest of five scores 80
    assert!(approx(hartlepool.score("Low Skilled").unwrap(), 80.0));
    assert_eq!(hartlepool.years[0], 2004);
    assert_eq!(hartlepool.years[8], 2018);

    // Bristol has nothing before 2010, so the 2004 GVA baseline drops out
    let bristol = engine.profile_vector("Bristol, City of").unwrap();
    assert_eq!(bristol.score("GVA per hour worked"), None);
    assert!(approx(bristol.score("Gigabit connectivity").unwrap(), 100.0));
}

#[test]
fn test_paired_series_lengths_and_export() {
    let dir = tempfile::tempdir().unwrap();
    let tables = itl3_compare::load(&config_for(dir.path())).unwrap();
    let engine = ComparisonEngine::new(&tables.regional, None, default_registry()).unwrap();

    let codes = ["TLC31", "TLD33", "TLE32", "TLI31", "TLK11"];
    for (k, indicator) in INDICATORS.iter().enumerate() {
        let paired = engine.paired_series(indicator, &codes).unwrap();
        for (r, series) in paired.regions.iter().enumerate() {
            assert_eq!(series.len(), non_null_count(r, k), "{indicator} / {}", codes[r]);
        }

        let batch = paired.to_record_batch().unwrap();
        let expected: usize = (0..codes.len()).map(|r| non_null_count(r, k)).sum();
        assert_eq!(batch.num_rows(), expected);
    }

    let gva = engine.paired_series("GVA per hour worked", &["TLC31"]).unwrap();
    assert_eq!(gva.unit, Unit::Currency);
    assert!(approx(gva.regions[0].points[0].value, 30.0));

    let active = engine.paired_series("Active", &["TLC31"]).unwrap();
    assert!(approx(active.regions[0].points[0].value, (0.05 + 0.07 * 5.0) * 100.0));
}

#[test]
fn test_unknown_entities_fail_loudly() {
    let dir = tempfile::tempdir().unwrap();
    let tables = itl3_compare::load(&config_for(dir.path())).unwrap();
    let engine = ComparisonEngine::new(&tables.regional, None, default_registry()).unwrap();

    assert!(matches!(
        engine.gauge_value("Broadband", "TLC31"),
        Err(CompareError::IndicatorNotConfigured(_))
    ));
    assert!(matches!(
        engine.profile_vector("TLZ99"),
        Err(CompareError::RegionNotFound { .. })
    ));
    assert!(matches!(
        engine.time_series(&["TLC31", "TLZ99"], "Active"),
        Err(CompareError::RegionNotFound { .. })
    ));
}

#[test]
fn test_report_serializes_to_json() {
    let dir = tempfile::tempdir().unwrap();
    let tables = itl3_compare::load(&config_for(dir.path())).unwrap();
    let engine =
        ComparisonEngine::new(&tables.regional, Some(&tables.national), default_registry()).unwrap();
    let pair = RegionPair::new(&tables.regional, "TLD33", "TLI31").unwrap();

    let report = engine.compare(&pair, "GVA per hour worked").unwrap();
    let json: serde_json::Value = serde_json::to_value(&report).unwrap();

    assert_eq!(json["headline"], "GVA per hour worked");
    assert_eq!(json["regions"][0]["code"], "TLD33");
    assert_eq!(json["carousel"][0]["unit"], "percentage");
    assert!(json["profiles"][1]["scores"].is_array());
}
