//! Configuration for dataset loading and profiling.
//!
//! Use [`ProfileConfig::builder()`] for a validated configuration, or
//! deserialize one from JSON (missing fields fall back to defaults).

use serde::{Deserialize, Serialize};

/// Default multiplier applied to the IQR when computing outlier bounds.
pub const DEFAULT_IQR_MULTIPLIER: f64 = 1.5;

/// Quartiles are not meaningful below this many values.
pub const MIN_IQR_VALUES: usize = 4;

/// Default number of most-frequent values kept per categorical column.
pub const DEFAULT_TOP_VALUES: usize = 3;

/// Markers read as missing in addition to empty fields.
pub const DEFAULT_NULL_MARKERS: [&str; 8] =
    ["NA", "N/A", "NaN", "nan", "null", "NULL", "None", "#N/A"];

/// Configuration for a profiling run.
///
/// # Example
///
/// ```rust,ignore
/// use eda_profiler::config::ProfileConfig;
///
/// let config = ProfileConfig::builder()
///     .iqr_multiplier(3.0)
///     .top_values(5)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    /// Multiplier `k` for the outlier fences `[Q1 - k*IQR, Q3 + k*IQR]`.
    /// Default: 1.5
    pub iqr_multiplier: f64,

    /// Numeric columns with fewer non-missing values are skipped by
    /// outlier detection.
    /// Default: 4
    pub min_outlier_values: usize,

    /// Number of most-frequent values reported per categorical column.
    /// Default: 3
    pub top_values: usize,

    /// Cell values treated as missing when loading CSV input.
    pub null_markers: Vec<String>,

    /// Field delimiter of the input file.
    /// Default: ','
    pub delimiter: char,

    /// Rows scanned for schema inference. `None` scans the whole file so
    /// that every value takes part in kind inference.
    /// Default: None
    pub infer_schema_rows: Option<usize>,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            iqr_multiplier: DEFAULT_IQR_MULTIPLIER,
            min_outlier_values: MIN_IQR_VALUES,
            top_values: DEFAULT_TOP_VALUES,
            null_markers: DEFAULT_NULL_MARKERS.iter().map(|s| s.to_string()).collect(),
            delimiter: ',',
            infer_schema_rows: None,
        }
    }
}

impl ProfileConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ProfileConfigBuilder {
        ProfileConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !self.iqr_multiplier.is_finite() || self.iqr_multiplier <= 0.0 {
            return Err(ConfigValidationError::InvalidIqrMultiplier(
                self.iqr_multiplier,
            ));
        }

        if self.min_outlier_values < MIN_IQR_VALUES {
            return Err(ConfigValidationError::TooFewOutlierValues(
                self.min_outlier_values,
            ));
        }

        if self.top_values == 0 {
            return Err(ConfigValidationError::InvalidTopValues);
        }

        if !self.delimiter.is_ascii() {
            return Err(ConfigValidationError::NonAsciiDelimiter(self.delimiter));
        }

        if self.infer_schema_rows == Some(0) {
            return Err(ConfigValidationError::InvalidSchemaRows);
        }

        Ok(())
    }

    /// Load a configuration from a JSON file and validate it.
    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ProfileConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// The delimiter as a single byte, as the CSV reader expects it.
    pub fn delimiter_byte(&self) -> u8 {
        self.delimiter as u8
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid IQR multiplier: {0} (must be a positive finite number)")]
    InvalidIqrMultiplier(f64),

    #[error("Invalid minimum outlier values: {0} (must be at least {MIN_IQR_VALUES})")]
    TooFewOutlierValues(usize),

    #[error("Invalid top values: must be at least 1")]
    InvalidTopValues,

    #[error("Invalid delimiter '{0}' (must be a single ASCII character)")]
    NonAsciiDelimiter(char),

    #[error("Invalid schema inference length: must be at least 1 row")]
    InvalidSchemaRows,
}

/// Builder for [`ProfileConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct ProfileConfigBuilder {
    iqr_multiplier: Option<f64>,
    min_outlier_values: Option<usize>,
    top_values: Option<usize>,
    null_markers: Option<Vec<String>>,
    delimiter: Option<char>,
    infer_schema_rows: Option<usize>,
}

impl ProfileConfigBuilder {
    /// Start from an existing configuration, e.g. one loaded from a file,
    /// so that individual settings can be overridden.
    pub fn from_config(config: ProfileConfig) -> Self {
        Self {
            iqr_multiplier: Some(config.iqr_multiplier),
            min_outlier_values: Some(config.min_outlier_values),
            top_values: Some(config.top_values),
            null_markers: Some(config.null_markers),
            delimiter: Some(config.delimiter),
            infer_schema_rows: config.infer_schema_rows,
        }
    }

    /// Set the IQR multiplier used for outlier fences.
    pub fn iqr_multiplier(mut self, multiplier: f64) -> Self {
        self.iqr_multiplier = Some(multiplier);
        self
    }

    /// Set the minimum number of non-missing values needed for outlier detection.
    pub fn min_outlier_values(mut self, count: usize) -> Self {
        self.min_outlier_values = Some(count);
        self
    }

    /// Set how many most-frequent values to report per categorical column.
    pub fn top_values(mut self, count: usize) -> Self {
        self.top_values = Some(count);
        self
    }

    /// Replace the set of missing-value markers.
    pub fn null_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.null_markers = Some(markers.into_iter().map(Into::into).collect());
        self
    }

    /// Set the input field delimiter.
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Limit schema inference to the first `rows` rows.
    pub fn infer_schema_rows(mut self, rows: usize) -> Self {
        self.infer_schema_rows = Some(rows);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `ProfileConfig` or an error if validation fails.
    pub fn build(self) -> Result<ProfileConfig, ConfigValidationError> {
        let defaults = ProfileConfig::default();
        let config = ProfileConfig {
            iqr_multiplier: self.iqr_multiplier.unwrap_or(defaults.iqr_multiplier),
            min_outlier_values: self
                .min_outlier_values
                .unwrap_or(defaults.min_outlier_values),
            top_values: self.top_values.unwrap_or(defaults.top_values),
            null_markers: self.null_markers.unwrap_or(defaults.null_markers),
            delimiter: self.delimiter.unwrap_or(defaults.delimiter),
            infer_schema_rows: self.infer_schema_rows,
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ProfileConfig::default();
        assert_eq!(config.iqr_multiplier, 1.5);
        assert_eq!(config.min_outlier_values, 4);
        assert_eq!(config.top_values, 3);
        assert_eq!(config.delimiter, ',');
        assert!(config.infer_schema_rows.is_none());
        assert!(config.null_markers.iter().any(|m| m == "NA"));
    }

    #[test]
    fn test_builder_defaults_match_default() {
        let config = ProfileConfig::builder().build().unwrap();
        assert_eq!(config, ProfileConfig::default());
    }

    #[test]
    fn test_builder_custom_values() {
        let config = ProfileConfig::builder()
            .iqr_multiplier(3.0)
            .top_values(5)
            .delimiter(';')
            .null_markers(["?"])
            .infer_schema_rows(100)
            .build()
            .unwrap();

        assert_eq!(config.iqr_multiplier, 3.0);
        assert_eq!(config.top_values, 5);
        assert_eq!(config.delimiter_byte(), b';');
        assert_eq!(config.null_markers, vec!["?".to_string()]);
        assert_eq!(config.infer_schema_rows, Some(100));
    }

    #[test]
    fn test_validation_invalid_multiplier() {
        let result = ProfileConfig::builder().iqr_multiplier(0.0).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidIqrMultiplier(_)
        ));

        let result = ProfileConfig::builder().iqr_multiplier(f64::NAN).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_min_outlier_values() {
        let result = ProfileConfig::builder().min_outlier_values(3).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::TooFewOutlierValues(3)
        ));
    }

    #[test]
    fn test_validation_top_values_and_delimiter() {
        assert!(ProfileConfig::builder().top_values(0).build().is_err());
        assert!(ProfileConfig::builder().delimiter('§').build().is_err());
        assert!(ProfileConfig::builder().infer_schema_rows(0).build().is_err());
    }

    #[test]
    fn test_from_config_overrides() {
        let base = ProfileConfig::builder().top_values(10).build().unwrap();
        let config = ProfileConfigBuilder::from_config(base)
            .iqr_multiplier(2.0)
            .build()
            .unwrap();

        assert_eq!(config.top_values, 10);
        assert_eq!(config.iqr_multiplier, 2.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "iqr_multiplier": 3.0, "delimiter": "\t" }"#;
        let config: ProfileConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.iqr_multiplier, 3.0);
        assert_eq!(config.delimiter, '\t');
        assert_eq!(config.top_values, DEFAULT_TOP_VALUES);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = ProfileConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: ProfileConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
