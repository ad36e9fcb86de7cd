use rustc_hash::FxHashMap;

use super::ComparisonEngine;
use crate::algorithm::statistics::percentile_rank;
use crate::error::Result;
use crate::indicator::IndicatorSpec;
use crate::models::ProfileVector;
use crate::table::Region;

impl ComparisonEngine<'_> {
    /// Percentile profile of a region across every configured indicator
    ///
    /// Each indicator is ranked at its own baseline year. Scores are
    /// oriented so that higher is better; indicators without a value for the
    /// region are left out.
    pub fn profile_vector(&self, region: &str) -> Result<ProfileVector> {
        let region = self.region(region)?;

        let mut profile = ProfileVector {
            region: region.clone(),
            indicators: Vec::with_capacity(self.registry.len()),
            years: Vec::with_capacity(self.registry.len()),
            scores: Vec::with_capacity(self.registry.len()),
        };

        for spec in self.registry.iter() {
            match self.score(spec, region)? {
                Some(score) => {
                    profile.indicators.push(spec.name.clone());
                    profile.years.push(spec.baseline_year);
                    profile.scores.push(score);
                }
                None => log::debug!(
                    "{} has no {} value in {}, leaving it out of the profile",
                    region.code,
                    spec.name,
                    spec.baseline_year
                ),
            }
        }

        Ok(profile)
    }

    /// Oriented percentile of `region` for one indicator, `None` when the
    /// region has no value at the baseline year
    fn score(&self, spec: &IndicatorSpec, region: &Region) -> Result<Option<f64>> {
        let values = self.values(spec)?;

        // First non-null observation per region in table order
        let mut by_region: FxHashMap<&str, f64> = FxHashMap::default();
        for obs in self.regional.observations().observations(values) {
            if obs.year != spec.baseline_year {
                continue;
            }
            if let Some(value) = obs.value {
                by_region.entry(obs.code).or_insert(value);
            }
        }

        let Some(&target) = by_region.get(region.code.as_str()) else {
            return Ok(None);
        };
        let population: Vec<f64> = by_region.into_values().collect();
        Ok(Some(spec.polarity.orient(percentile_rank(&population, target))))
    }
}
