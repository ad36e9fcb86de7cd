//! Order statistics used by the comparison engine
//!
//! All functions ignore NaN, so callers can feed raw column values after
//! dropping nulls.

/// Lower gauge bound relative to the median
pub const LOWER_FACTOR: f64 = 0.75;
/// Lower gauge bound never starts above this fraction of the median
pub const LOWER_CAP_FACTOR: f64 = 0.85;
/// Upper gauge bound relative to the median
pub const UPPER_FACTOR: f64 = 1.25;
/// Upper gauge bound never ends below this fraction of the median
pub const UPPER_FLOOR_FACTOR: f64 = 1.15;
/// Headroom kept above the region's own value
pub const VALUE_HEADROOM: f64 = 1.15;

/// Median of the values; the mean of the two middle values for an even count
#[must_use]
pub fn median(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let mut sorted: Vec<f64> = values.into_iter().filter(|v| !v.is_nan()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Share of `values` at or below `target`, scaled to 0-100
///
/// Equal values receive equal ranks. An empty population ranks nothing and
/// returns 0.
#[must_use]
pub fn percentile_rank(values: &[f64], target: f64) -> f64 {
    let population = values.iter().filter(|v| !v.is_nan()).count();
    if population == 0 {
        return 0.0;
    }
    let at_or_below = values.iter().filter(|&&v| v <= target).count();
    at_or_below as f64 / population as f64 * 100.0
}

/// Display range for a gauge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeBounds {
    /// Start of the axis
    pub lower: f64,
    /// End of the axis
    pub upper: f64,
}

impl GaugeBounds {
    /// Range centred on the cross-region median, widened so `value` fits
    ///
    /// `lower = min(m*0.85, max(0, m*0.75))`, `upper = max(m*1.15, m*1.25)`,
    /// and `upper` grows to `value*1.15` when that is larger.
    #[must_use]
    pub fn around(median: f64, value: f64) -> Self {
        let lower = (median * LOWER_CAP_FACTOR).min((median * LOWER_FACTOR).max(0.0));
        let mut upper = (median * UPPER_FLOOR_FACTOR).max(median * UPPER_FACTOR);
        if value * VALUE_HEADROOM > upper {
            upper = value * VALUE_HEADROOM;
        }
        Self { lower, upper }
    }
}
