//! Shared fixtures: small but realistic observation sources written to a
//! temporary directory.

#![allow(dead_code)]

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use itl3_compare::CompareConfig;

/// Indicator columns, in the built-in registry order
pub const INDICATORS: [&str; 10] = [
    "GVA per hour worked",
    "Export Intensity",
    "New Businesses",
    "Low Skilled",
    "High Skilled",
    "Active",
    "Inactive due to Illness",
    "Working Age",
    "5G connectivity",
    "Gigabit connectivity",
];

/// `(code, name)` of the fixture regions, in index order
pub const REGIONS: [(&str, &str); 5] = [
    ("TLC31", "Hartlepool"),
    ("TLD33", "Manchester"),
    ("TLE32", "Sheffield"),
    ("TLI31", "Camden and City of London"),
    ("TLK11", "Bristol, City of"),
];

/// First and last observation years
pub const YEARS: std::ops::RangeInclusive<i64> = 2004..=2024;

/// Fixture value of indicator `k` for region `r` in `year`
///
/// Nulls: Sheffield never reports Export Intensity, Bristol reports nothing
/// before 2010 and connectivity starts in 2018.
#[must_use]
pub fn value(r: usize, year: i64, k: usize) -> Option<f64> {
    if r == 2 && k == 1 {
        return None;
    }
    if r == 4 && year < 2010 {
        return None;
    }
    if k >= 8 && year < 2018 {
        return None;
    }
    let step = (year - 2004) as f64;
    if k == 0 {
        Some(30.0 + 4.0 * r as f64 + 0.5 * step)
    } else {
        Some(0.05 + 0.07 * k as f64 + 0.02 * r as f64 + 0.002 * step)
    }
}

fn quote(field: &str) -> String {
    if field.contains(',') {
        format!("\"{field}\"")
    } else {
        field.to_string()
    }
}

/// Regional table as CSV text
#[must_use]
pub fn regional_csv() -> String {
    let mut csv = String::from("code,name,year");
    for indicator in INDICATORS {
        csv.push(',');
        csv.push_str(indicator);
    }
    csv.push('\n');

    for (r, (code, name)) in REGIONS.iter().enumerate() {
        for year in YEARS {
            let _ = write!(csv, "{code},{},{year}", quote(name));
            for k in 0..INDICATORS.len() {
                csv.push(',');
                if let Some(v) = value(r, year, k) {
                    let _ = write!(csv, "{v}");
                }
            }
            csv.push('\n');
        }
    }
    csv
}

/// National table as CSV text; 2010 is missing
#[must_use]
pub fn national_csv() -> String {
    let mut csv = String::from("code,name,year,GVA per hour worked\n");
    for year in 2004..=2022 {
        let _ = write!(csv, "K02000001,United Kingdom,{year},");
        if year != 2010 {
            let _ = write!(csv, "{}", 40.0 + 0.5 * (year - 2004) as f64);
        }
        csv.push('\n');
    }
    csv
}

/// Write both sources into `dir` and return their paths
pub fn write_sources(dir: &Path) -> (PathBuf, PathBuf) {
    let regional = dir.join("itl3_compare_data.csv");
    let national = dir.join("itl3_compare_uk_data.csv");
    std::fs::write(&regional, regional_csv()).expect("write regional fixture");
    std::fs::write(&national, national_csv()).expect("write national fixture");
    (regional, national)
}

/// Configuration pointing at fixture sources in `dir`
pub fn config_for(dir: &Path) -> CompareConfig {
    let (regional_path, national_path) = write_sources(dir);
    CompareConfig {
        regional_path,
        national_path,
        ..CompareConfig::default()
    }
}

/// Number of non-null fixture values for one region and indicator
#[must_use]
pub fn non_null_count(r: usize, k: usize) -> usize {
    YEARS.filter(|&year| value(r, year, k).is_some()).count()
}
