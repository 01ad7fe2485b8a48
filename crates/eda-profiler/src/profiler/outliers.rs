//! IQR-based outlier detection.

use crate::config::ProfileConfig;
use crate::error::Result;
use crate::types::OutlierReport;
use crate::utils::{indexed_values, quantile_sorted};
use polars::prelude::*;

/// Flag values outside `[Q1 - k*IQR, Q3 + k*IQR]`.
///
/// `k` is [`ProfileConfig::iqr_multiplier`]. Columns with fewer than
/// [`ProfileConfig::min_outlier_values`] non-missing values are skipped.
/// Returned indices are row indices into the column, so missing rows are
/// never flagged.
pub fn compute_outliers(series: &Series, config: &ProfileConfig) -> Result<OutlierReport> {
    let values = indexed_values(series)?;
    Ok(detect_iqr_outliers(
        &values,
        config.iqr_multiplier,
        config.min_outlier_values,
    ))
}

pub(crate) fn detect_iqr_outliers(
    values: &[(usize, f64)],
    multiplier: f64,
    min_values: usize,
) -> OutlierReport {
    if values.len() < min_values {
        return OutlierReport::Skipped {
            non_missing: values.len(),
        };
    }

    let mut sorted: Vec<f64> = values.iter().map(|(_, v)| *v).collect();
    sorted.sort_by(f64::total_cmp);

    // min_values is at least 4, so both quartiles exist
    let q1 = quantile_sorted(&sorted, 0.25).unwrap_or_default();
    let q3 = quantile_sorted(&sorted, 0.75).unwrap_or_default();
    let iqr = q3 - q1;

    let lower_bound = q1 - multiplier * iqr;
    let upper_bound = q3 + multiplier * iqr;

    let indices = values
        .iter()
        .filter(|(_, val)| *val < lower_bound || *val > upper_bound)
        .map(|(idx, _)| *idx)
        .collect();

    OutlierReport::Detected {
        q1,
        q3,
        iqr,
        lower_bound,
        upper_bound,
        indices,
    }
}
