//! Automated Exploratory Data Analysis Library
//!
//! A first-pass profiler for tabular CSV data, built with Rust and Polars.
//!
//! # Overview
//!
//! Given a CSV file, this library computes:
//!
//! - **Missingness**: per-column missing counts and percentages
//! - **Descriptive Statistics**: count, mean, std, min, quartiles and max for numeric columns
//! - **Categorical Summary**: unique counts and most frequent values
//! - **Correlation**: pairwise Pearson coefficients between numeric columns
//! - **Outliers**: IQR-fence outlier detection per numeric column
//!
//! and assembles the results into a [`ProfileReport`] that can be written as
//! JSON, HTML or both.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use eda_profiler::{DataProfiler, Dataset, ProfileConfig, ReportFormat, ReportGenerator};
//!
//! let config = ProfileConfig::default();
//! let dataset = Dataset::load_csv("data.csv", &config)?;
//! let profile = DataProfiler::profile_dataset(&dataset, &config)?;
//!
//! let report = ReportGenerator::assemble(profile, "data.csv", "Automated EDA Report");
//! ReportGenerator::write_report(&report, "eda_report.json", ReportFormat::Both)?;
//! ```
//!
//! # Configuration
//!
//! Use [`ProfileConfig`] to customize loading and analysis:
//!
//! ```rust,ignore
//! use eda_profiler::ProfileConfig;
//!
//! let config = ProfileConfig::builder()
//!     .iqr_multiplier(3.0)         // Only flag extreme outliers
//!     .top_values(5)               // Keep five most frequent categories
//!     .delimiter(';')
//!     .null_markers(["", "n/a"])
//!     .build()?;
//! ```
//!
//! Undefined results (statistics of an all-missing column, correlation with a
//! constant column) are explicit variants rather than NaN; see
//! [`DescriptiveStats`] and [`Coefficient`].

pub mod config;
pub mod dataset;
pub mod error;
pub mod profiler;
pub mod reporting;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use config::{ConfigValidationError, ProfileConfig, ProfileConfigBuilder};
pub use dataset::Dataset;
pub use error::{EdaError, Result as EdaResult, ResultExt};
pub use profiler::{
    DataProfiler, compute_categorical_summary, compute_correlation, compute_descriptive_stats,
    compute_missingness, compute_outliers,
};
pub use reporting::{
    DEFAULT_REPORT_TITLE, ProfileReport, ReportFormat, ReportGenerator, ReportSummary, render_html,
};
pub use types::{
    CategoricalSummary, Coefficient, ColumnKind, ColumnProfile, CorrelationMatrix, DatasetProfile,
    DatasetShape, DescriptiveStats, Missingness, NumericProfile, OutlierReport, SummaryStats,
    ValueFrequency,
};
