//! Region pair selection
//!
//! Picks the two regions of a comparison from optional query-style
//! parameters. Unmatched parameters fall back to defaults: the first
//! region by name, and for the second, the first region that is not the
//! first selection.

use serde::Serialize;

use crate::error::{CompareError, Result};
use crate::table::{Region, RegionalTable};

/// Parameter naming the first region
pub const REGION_1_PARAM: &str = "region_1";
/// Parameter naming the second region
pub const REGION_2_PARAM: &str = "region_2";

/// Two distinct regions to compare
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionPair {
    first: Region,
    second: Region,
}

impl RegionPair {
    /// Resolve two explicit identifiers (codes or names)
    ///
    /// Fails with `RegionNotFound` when either is unknown or both name the
    /// same region.
    pub fn new(table: &RegionalTable, first: &str, second: &str) -> Result<Self> {
        let first = table.resolve(first)?.clone();
        let second = table.resolve(second)?.clone();
        if first == second {
            return Err(CompareError::RegionNotFound {
                region: second.code,
                detail: Some("the second region must differ from the first".to_string()),
            });
        }
        Ok(Self { first, second })
    }

    /// Resolve the pair from query parameters
    ///
    /// Keys are matched case-insensitively against `region_1`/`region_2`;
    /// values are upper-cased and matched against region codes.
    pub fn from_query<'q, I>(table: &RegionalTable, params: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'q str, &'q str)>,
    {
        let mut wanted_1 = None;
        let mut wanted_2 = None;
        for (key, value) in params {
            let key = key.to_lowercase();
            if key == REGION_1_PARAM {
                wanted_1 = Some(value.to_uppercase());
            } else if key == REGION_2_PARAM {
                wanted_2 = Some(value.to_uppercase());
            }
        }

        let regions = table.regions();
        if regions.len() < 2 {
            return Err(CompareError::RegionNotFound {
                region: wanted_2.or(wanted_1).unwrap_or_default(),
                detail: Some(format!(
                    "a comparison needs two regions, the table has {}",
                    regions.len()
                )),
            });
        }

        let first = pick(regions.iter(), wanted_1.as_deref())
            .ok_or_else(|| CompareError::region_not_found(wanted_1.clone().unwrap_or_default()))?;
        let second = pick(
            regions.iter().filter(|region| region.code != first.code),
            wanted_2.as_deref(),
        )
        .ok_or_else(|| CompareError::region_not_found(wanted_2.clone().unwrap_or_default()))?;

        Ok(Self {
            first: first.clone(),
            second: second.clone(),
        })
    }

    /// The first region
    #[must_use]
    pub const fn first(&self) -> &Region {
        &self.first
    }

    /// The second region
    #[must_use]
    pub const fn second(&self) -> &Region {
        &self.second
    }

    /// Region codes in order, for the engine's identifier arguments
    #[must_use]
    pub fn codes(&self) -> [&str; 2] {
        [self.first.code.as_str(), self.second.code.as_str()]
    }

    /// The same pair in the opposite order
    #[must_use]
    pub fn swapped(&self) -> Self {
        Self {
            first: self.second.clone(),
            second: self.first.clone(),
        }
    }
}

/// The candidate whose code equals `wanted`, else the first candidate
fn pick<'a>(
    mut candidates: impl Iterator<Item = &'a Region> + Clone,
    wanted: Option<&str>,
) -> Option<&'a Region> {
    if let Some(code) = wanted {
        if let Some(region) = candidates.clone().find(|region| region.code == code) {
            return Some(region);
        }
        log::warn!("Region '{code}' not found, using the default selection");
    }
    candidates.next()
}
