use super::ComparisonEngine;
use crate::error::Result;
use crate::models::ComparisonReport;
use crate::selection::RegionPair;

impl ComparisonEngine<'_> {
    /// Build every artifact of one dashboard view
    ///
    /// The gauges, the time series, the profiles and the carousel do not
    /// depend on each other and are computed in parallel.
    pub fn compare(&self, pair: &RegionPair, headline: &str) -> Result<ComparisonReport> {
        let codes = pair.codes();
        let [first, second] = codes;
        let headline = self.spec(headline)?.name.as_str();

        let ((gauges, time_series), (profiles, carousel)) = rayon::join(
            || {
                rayon::join(
                    || -> Result<Vec<_>> {
                        Ok(vec![
                            self.gauge_value(headline, first)?,
                            self.gauge_value(headline, second)?,
                        ])
                    },
                    || self.time_series(&codes, headline),
                )
            },
            || {
                rayon::join(
                    || -> Result<Vec<_>> {
                        Ok(vec![self.profile_vector(first)?, self.profile_vector(second)?])
                    },
                    || self.carousel(headline, &codes),
                )
            },
        );

        Ok(ComparisonReport {
            regions: [pair.first().clone(), pair.second().clone()],
            headline: headline.to_string(),
            gauges: gauges?,
            time_series: time_series?,
            profiles: profiles?,
            carousel: carousel?,
        })
    }
}
