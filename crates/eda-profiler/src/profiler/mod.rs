//! Dataset profiling.
//!
//! This module turns a loaded [`Dataset`] into a [`DatasetProfile`]:
//! - Missing-value counts for every column
//! - Descriptive statistics and IQR outliers for numeric columns
//! - Cardinality and top values for categorical columns
//! - Pearson correlation between numeric columns
//!
//! Every operation is a pure function of its input column(s).

mod categorical;
mod correlation;
mod missing;
mod outliers;
mod statistics;

pub use categorical::compute_categorical_summary;
pub use correlation::compute_correlation;
pub use missing::compute_missingness;
pub use outliers::compute_outliers;
pub use statistics::compute_descriptive_stats;

use crate::config::ProfileConfig;
use crate::dataset::Dataset;
use crate::error::{Result, ResultExt};
use crate::types::{
    ColumnKind, ColumnProfile, DatasetProfile, DatasetShape, NumericProfile, OutlierReport,
};
use polars::prelude::*;
use tracing::{debug, info, warn};

/// Data profiler for analyzing dataset structure and statistics.
pub struct DataProfiler;

impl DataProfiler {
    /// Profile an entire dataset.
    ///
    /// Columns are profiled in dataset order, then the correlation matrix is
    /// computed over all numeric columns.
    pub fn profile_dataset(dataset: &Dataset, config: &ProfileConfig) -> Result<DatasetProfile> {
        info!(
            "Profiling dataset: {} rows x {} columns",
            dataset.height(),
            dataset.width()
        );

        let mut column_profiles = Vec::with_capacity(dataset.width());
        for (series, kind) in dataset.columns() {
            let profile = Self::profile_column(series, kind, config)
                .context(format!("Failed to profile column '{}'", series.name()))?;
            column_profiles.push(profile);
        }

        let numeric_columns = dataset.numeric_columns();
        let correlations = compute_correlation(&numeric_columns)?;
        debug!(
            "Computed correlations for {} numeric columns",
            correlations.columns.len()
        );

        Ok(DatasetProfile {
            shape: DatasetShape {
                rows: dataset.height(),
                columns: dataset.width(),
                memory_bytes: dataset.memory_bytes(),
            },
            column_profiles,
            correlations,
        })
    }

    /// Profile a single column of the given kind.
    pub fn profile_column(
        series: &Series,
        kind: ColumnKind,
        config: &ProfileConfig,
    ) -> Result<ColumnProfile> {
        let name = series.name().to_string();
        let missing = compute_missingness(series);
        let non_missing_count = series.len() - missing.count;

        let (unique_count, numeric, categorical) = match kind {
            ColumnKind::Numeric => {
                let stats = compute_descriptive_stats(series)?;
                if stats.is_undefined() {
                    warn!("Column '{}' has no values; statistics undefined", name);
                }

                let outliers = compute_outliers(series, config)?;
                if let OutlierReport::Skipped { non_missing } = outliers {
                    debug!(
                        "Skipping outlier detection for '{}': {} values",
                        name, non_missing
                    );
                }

                let unique_count = series.drop_nulls().n_unique()?;
                (unique_count, Some(NumericProfile { stats, outliers }), None)
            }
            ColumnKind::Categorical => {
                let summary = compute_categorical_summary(series, config.top_values)?;
                (summary.unique_count, None, Some(summary))
            }
        };

        debug!(
            "Profiled '{}' ({}): {} missing, {} unique",
            name,
            kind.as_str(),
            missing.count,
            unique_count
        );

        Ok(ColumnProfile {
            name,
            dtype: format!("{:?}", series.dtype()),
            kind,
            missing,
            non_missing_count,
            unique_count,
            numeric,
            categorical,
        })
    }
}
