//! Summary statistics for numeric columns.

use crate::error::Result;
use crate::types::{DescriptiveStats, SummaryStats};
use crate::utils::{quantile_sorted, sorted_values};
use polars::prelude::*;

/// Compute count, mean, median, standard deviation, min, quartiles and max
/// over the non-missing values of a numeric column.
///
/// An all-missing column yields [`DescriptiveStats::Undefined`].
pub fn compute_descriptive_stats(series: &Series) -> Result<DescriptiveStats> {
    let sorted = sorted_values(series)?;
    Ok(stats_from_sorted(&sorted))
}

pub(crate) fn stats_from_sorted(sorted: &[f64]) -> DescriptiveStats {
    let (Some(&min), Some(&max)) = (sorted.first(), sorted.last()) else {
        return DescriptiveStats::Undefined;
    };

    let n = sorted.len();
    let mean = sorted.iter().sum::<f64>() / n as f64;
    let quartile = |q| quantile_sorted(sorted, q).unwrap_or(min);

    DescriptiveStats::Defined(SummaryStats {
        count: n,
        mean,
        median: quartile(0.5),
        std: calculate_std(sorted, mean),
        min,
        q1: quartile(0.25),
        q3: quartile(0.75),
        max,
    })
}

/// Sample standard deviation; 0.0 when fewer than two values.
pub(crate) fn calculate_std(values: &[f64], mean: f64) -> f64 {
    let n = values.len() as f64;
    if n <= 1.0 {
        return 0.0;
    }

    let variance: f64 = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    variance.sqrt()
}
