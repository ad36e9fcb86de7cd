//! Ordered, read-only lookup of indicator metadata

use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

use rustc_hash::FxHashMap;
use serde::Deserialize;
use serde::de::{self, MapAccess, Visitor};

use super::{IndicatorSpec, Polarity, Unit};
use crate::config::CompareConfig;
use crate::error::util::safe_read_to_string;
use crate::error::{CompareError, Result};

const ONS_PRODUCTIVITY: &str = r#"<a href="https://www.ons.gov.uk/employmentandlabourmarket/peopleinwork/labourproductivity/datasets/subregionalproductivitylabourproductivitygvaperhourworkedandgvaperfilledjobindicesbyuknuts2andnuts3subregions" target="_blank">Source</a>"#;
const ONS_TRADE: &str = r#"<a href="https://www.ons.gov.uk/businessindustryandtrade/internationaltrade/datasets/subnationaltradeingoods" target="_blank">Source</a>"#;
const ONS_DEMOGRAPHY: &str = r#"<a href="https://www.ons.gov.uk/businessindustryandtrade/business/activitysizeandlocation/datasets/businessdemographyreferencetable" target="_blank">Source</a>"#;
const NOMIS_APS: &str =
    r#"<a href="https://www.nomisweb.co.uk/datasets/apsnew" target="_blank">Source</a>"#;
const OFCOM_INFRASTRUCTURE: &str = r#"<a href="https://www.ofcom.org.uk/research-and-data/multi-sector-research/infrastructure-research" target="_blank">Source</a>"#;

/// Name used for an in-memory registry in error messages
const REGISTRY_SOURCE: &str = "indicator registry";

static DEFAULT_REGISTRY: LazyLock<IndicatorRegistry> = LazyLock::new(IndicatorRegistry::default);

/// Process-wide built-in registry
#[must_use]
pub fn default_registry() -> &'static IndicatorRegistry {
    &DEFAULT_REGISTRY
}

/// Indicator metadata keyed by name, iterated in configuration order
#[derive(Debug, Clone)]
pub struct IndicatorRegistry {
    specs: Vec<IndicatorSpec>,
    index: FxHashMap<String, usize>,
}

impl IndicatorRegistry {
    /// Build a registry from specs in display order
    ///
    /// A later spec with an already-seen name replaces the earlier one but
    /// keeps its position.
    #[must_use]
    pub fn new(specs: impl IntoIterator<Item = IndicatorSpec>) -> Self {
        let mut registry = Self {
            specs: Vec::new(),
            index: FxHashMap::default(),
        };
        for spec in specs {
            if let Some(&pos) = registry.index.get(&spec.name) {
                log::warn!("Indicator '{}' configured twice, keeping the last entry", spec.name);
                registry.specs[pos] = spec;
            } else {
                registry.index.insert(spec.name.clone(), registry.specs.len());
                registry.specs.push(spec);
            }
        }
        registry
    }

    /// Look up an indicator by name
    pub fn get(&self, name: &str) -> Result<&IndicatorSpec> {
        self.index
            .get(name)
            .map(|&pos| &self.specs[pos])
            .ok_or_else(|| CompareError::IndicatorNotConfigured(name.to_string()))
    }

    /// Whether an indicator is configured
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Iterate specs in configuration order
    pub fn iter(&self) -> impl Iterator<Item = &IndicatorSpec> {
        self.specs.iter()
    }

    /// Indicator names in configuration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.specs.iter().map(|spec| spec.name.as_str())
    }

    /// The first configured indicator
    #[must_use]
    pub fn headline(&self) -> Option<&IndicatorSpec> {
        self.specs.first()
    }

    /// Number of configured indicators
    #[must_use]
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Whether no indicators are configured
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Parse a registry from its JSON form
    ///
    /// The input is an object mapping each indicator name to
    /// `[label, latestYear, baselineYear, sourceHtml]`; years may be strings
    /// or numbers. Entry order is kept. Units and polarity come from the
    /// allow-lists in `config`. Malformed input is `DataUnavailable`.
    pub fn from_json(json: &str, config: &CompareConfig) -> Result<Self> {
        Self::parse(json, config, Path::new(REGISTRY_SOURCE))
    }

    /// Read and parse a registry JSON file
    pub fn from_json_file(path: &Path, config: &CompareConfig) -> Result<Self> {
        let content = safe_read_to_string(path, REGISTRY_SOURCE)?;
        Self::parse(&content, config, path)
    }

    fn parse(json: &str, config: &CompareConfig, source: &Path) -> Result<Self> {
        let entries: OrderedEntries = serde_json::from_str(json).map_err(|e| {
            CompareError::data_unavailable(source, format!("Invalid registry JSON: {e}"))
        })?;

        let specs = entries
            .0
            .into_iter()
            .map(|(name, RawEntry(label, latest, baseline, source_html))| {
                let latest_year = latest.to_year(&name, source)?;
                let baseline_year = baseline.to_year(&name, source)?;
                let unit = if config.is_currency(&name) {
                    Unit::Currency
                } else {
                    Unit::Percentage
                };
                let polarity = if config.is_inverted(&name) {
                    Polarity::Inverted
                } else {
                    Polarity::Normal
                };
                Ok(IndicatorSpec::new(name, label, latest_year, baseline_year, source_html)
                    .with_unit(unit)
                    .with_polarity(polarity))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::new(specs))
    }
}

impl Default for IndicatorRegistry {
    fn default() -> Self {
        Self::new([
            IndicatorSpec::new(
                "GVA per hour worked",
                "Productivity measured as Gross Value Added per hour worked",
                2022,
                2004,
                ONS_PRODUCTIVITY,
            )
            .with_unit(Unit::Currency),
            IndicatorSpec::new(
                "Export Intensity",
                "Exports as a percentage of GDP",
                2022,
                2016,
                ONS_TRADE,
            ),
            IndicatorSpec::new(
                "New Businesses",
                "New firms as a percentage of total active firms",
                2022,
                2017,
                ONS_DEMOGRAPHY,
            ),
            IndicatorSpec::new(
                "Low Skilled",
                "Percentage of the working-age population with NVQ1/RQF1 or \u{2018}no qualifications\u{2019}",
                2022,
                2016,
                NOMIS_APS,
            )
            .with_polarity(Polarity::Inverted),
            IndicatorSpec::new(
                "High Skilled",
                "Percentage of the working-age population with qualification at NVQ4+/RQF4+ level",
                2022,
                2012,
                NOMIS_APS,
            ),
            IndicatorSpec::new(
                "Active",
                "Percentage of the working-age population active in employment",
                2022,
                2012,
                NOMIS_APS,
            ),
            IndicatorSpec::new(
                "Inactive due to Illness",
                "Percentage of <i>inactive</i> working age population, inactive due to ill health",
                2022,
                2014,
                NOMIS_APS,
            )
            .with_polarity(Polarity::Inverted),
            IndicatorSpec::new(
                "Working Age",
                "Percentage of the total population that are of working age (aged 16-64)",
                2022,
                2012,
                NOMIS_APS,
            ),
            IndicatorSpec::new(
                "5G connectivity",
                "Percentage of outdoor areas with 5G service access from at least one mobile network operator",
                2024,
                2018,
                OFCOM_INFRASTRUCTURE,
            ),
            IndicatorSpec::new(
                "Gigabit connectivity",
                "Percentage of premises that have access to a gigabit connection",
                2024,
                2018,
                OFCOM_INFRASTRUCTURE,
            ),
        ])
    }
}

/// Year cell of a registry entry
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum YearField {
    Number(i64),
    Text(String),
}

impl YearField {
    fn to_year(&self, indicator: &str, source: &Path) -> Result<i64> {
        match self {
            Self::Number(year) => Ok(*year),
            Self::Text(text) => text.trim().parse::<i64>().map_err(|_| {
                CompareError::data_unavailable(
                    source,
                    format!("Invalid year '{text}' for indicator '{indicator}'"),
                )
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawEntry(String, YearField, YearField, String);

/// JSON object entries in document order
struct OrderedEntries(Vec<(String, RawEntry)>);

impl<'de> Deserialize<'de> for OrderedEntries {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = OrderedEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object of indicator name to [label, latest, baseline, source]")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, entry)) = map.next_entry::<String, RawEntry>()? {
                    entries.push((name, entry));
                }
                Ok(OrderedEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}
