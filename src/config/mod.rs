//! Configuration for the comparison pipeline.

use std::path::PathBuf;

/// Indicator reported in currency rather than as a proportion
pub const GVA_PER_HOUR: &str = "GVA per hour worked";

/// Default batch size for CSV reading
pub const DEFAULT_BATCH_SIZE: usize = 8192;

/// Configuration for loading tables and building comparisons
#[derive(Debug, Clone)]
pub struct CompareConfig {
    /// Path to the regional observations table (CSV or Parquet)
    pub regional_path: PathBuf,
    /// Path to the national reference table (CSV or Parquet)
    pub national_path: PathBuf,
    /// Optional JSON registry file; the built-in registry is used when absent
    pub registry_path: Option<PathBuf>,
    /// Indicator shown on the gauges and the time series
    pub headline_indicator: String,
    /// Indicators stored in currency units; everything else is a proportion
    pub currency_indicators: Vec<String>,
    /// Indicators where a lower value is better
    pub inverted_indicators: Vec<String>,
    /// Rows per record batch when reading CSV sources
    pub batch_size: usize,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            regional_path: PathBuf::from("src/itl3_compare_data.csv"),
            national_path: PathBuf::from("src/itl3_compare_uk_data.csv"),
            registry_path: None,
            headline_indicator: GVA_PER_HOUR.to_string(),
            currency_indicators: vec![GVA_PER_HOUR.to_string()],
            inverted_indicators: vec![
                "Low Skilled".to_string(),
                "Inactive due to Illness".to_string(),
            ],
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl CompareConfig {
    /// Build a configuration from defaults, overridden by `ITL3_*` environment
    /// variables where present
    ///
    /// Recognised variables: `ITL3_DATA`, `ITL3_NATIONAL_DATA`,
    /// `ITL3_REGISTRY`, `ITL3_HEADLINE`, `ITL3_BATCH_SIZE`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_lookup(|key| std::env::var(key).ok())
    }

    fn with_lookup(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(path) = lookup("ITL3_DATA") {
            self.regional_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("ITL3_NATIONAL_DATA") {
            self.national_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("ITL3_REGISTRY") {
            self.registry_path = Some(PathBuf::from(path));
        }
        if let Some(name) = lookup("ITL3_HEADLINE") {
            self.headline_indicator = name;
        }
        match lookup("ITL3_BATCH_SIZE").map(|s| s.parse::<usize>()) {
            Some(Ok(size)) if size > 0 => self.batch_size = size,
            Some(_) => log::warn!("Ignoring invalid ITL3_BATCH_SIZE"),
            None => {}
        }
        self
    }

    /// Whether an indicator is reported in currency units
    #[must_use]
    pub fn is_currency(&self, indicator: &str) -> bool {
        self.currency_indicators.iter().any(|name| name == indicator)
    }

    /// Whether a lower value of the indicator is better
    #[must_use]
    pub fn is_inverted(&self, indicator: &str) -> bool {
        self.inverted_indicators.iter().any(|name| name == indicator)
    }
}
