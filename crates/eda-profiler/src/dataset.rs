//! Loading tabular input and inferring column kinds.
//!
//! A [`Dataset`] is a Polars `DataFrame` paired with one [`ColumnKind`] per
//! column. A column is numeric iff every non-missing value parses as a
//! number; string columns that pass this test are converted to `Float64`
//! so that the engine only ever sees numeric dtypes for numeric columns.

use crate::config::ProfileConfig;
use crate::error::{EdaError, Result, ResultExt};
use crate::types::ColumnKind;
use crate::utils::{is_numeric_dtype, parse_numeric_value};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A loaded table with per-column inferred kinds.
#[derive(Debug, Clone)]
pub struct Dataset {
    frame: DataFrame,
    kinds: Vec<ColumnKind>,
}

impl Dataset {
    /// Build a dataset from an in-memory frame, inferring column kinds.
    pub fn from_frame(mut frame: DataFrame) -> Result<Self> {
        let names: Vec<String> = frame
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        let mut kinds = Vec::with_capacity(names.len());

        for name in &names {
            let series = frame.column(name)?.as_materialized_series().clone();
            let (kind, normalized) = infer_column_kind(&series)?;
            if let Some(normalized) = normalized {
                frame
                    .replace(name, normalized)
                    .context(format!("Failed to normalize column '{}'", name))?;
            }
            debug!("Column '{}' inferred as {}", name, kind.as_str());
            kinds.push(kind);
        }

        Ok(Self { frame, kinds })
    }

    /// Read a delimited file and infer column kinds.
    pub fn load_csv(path: impl AsRef<Path>, config: &ProfileConfig) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(EdaError::FileNotFound(path.to_path_buf()));
        }

        info!("Loading dataset from: {}", path.display());
        let frame = read_csv_with_fallback(path, config)?;
        info!("Dataset loaded successfully: {:?}", frame.shape());

        Self::from_frame(frame)
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn width(&self) -> usize {
        self.frame.width()
    }

    pub fn kinds(&self) -> &[ColumnKind] {
        &self.kinds
    }

    /// Kind of the named column.
    pub fn kind(&self, name: &str) -> Option<ColumnKind> {
        self.frame
            .get_column_index(name)
            .and_then(|idx| self.kinds.get(idx).copied())
    }

    /// Columns in dataset order with their kinds.
    pub fn columns(&self) -> impl Iterator<Item = (&Series, ColumnKind)> {
        self.frame
            .get_columns()
            .iter()
            .map(|col| col.as_materialized_series())
            .zip(self.kinds.iter().copied())
    }

    /// Numeric columns in dataset order.
    pub fn numeric_columns(&self) -> Vec<&Series> {
        self.columns()
            .filter(|(_, kind)| *kind == ColumnKind::Numeric)
            .map(|(series, _)| series)
            .collect()
    }

    /// Column by name.
    pub fn series(&self, name: &str) -> Result<&Series> {
        self.frame
            .column(name)
            .map(|col| col.as_materialized_series())
            .map_err(|_| EdaError::ColumnNotFound(name.to_string()))
    }

    /// Estimated in-memory size of the table in bytes.
    pub fn memory_bytes(&self) -> u64 {
        self.frame.estimated_size() as u64
    }
}

/// Infer the kind of a column.
///
/// Returns the normalized series when the column has to be rewritten:
/// numeric strings become `Float64`, NaN in float columns becomes null,
/// and all-null columns become an all-null `Float64` column.
pub(crate) fn infer_column_kind(series: &Series) -> Result<(ColumnKind, Option<Series>)> {
    let dtype = series.dtype();

    if is_numeric_dtype(dtype) {
        let normalized = if matches!(dtype, DataType::Float32 | DataType::Float64) {
            nan_to_null(series)?
        } else {
            None
        };
        return Ok((ColumnKind::Numeric, normalized));
    }

    match dtype {
        DataType::Null => {
            let casted = series.cast(&DataType::Float64)?;
            Ok((ColumnKind::Numeric, Some(casted)))
        }
        DataType::String => {
            let str_series = series.str()?;
            let mut parsed = Vec::with_capacity(series.len());
            for value in str_series.into_iter() {
                match value {
                    None => parsed.push(None),
                    Some(raw) => match parse_numeric_value(raw) {
                        Some(num) if !num.is_nan() => parsed.push(Some(num)),
                        _ => return Ok((ColumnKind::Categorical, None)),
                    },
                }
            }
            Ok((
                ColumnKind::Numeric,
                Some(Series::new(series.name().clone(), parsed)),
            ))
        }
        _ => Ok((ColumnKind::Categorical, None)),
    }
}

fn nan_to_null(series: &Series) -> Result<Option<Series>> {
    let float_series = series.cast(&DataType::Float64)?;
    let values = float_series.f64()?;
    if !values.into_iter().any(|v| v.is_some_and(f64::is_nan)) {
        return Ok(None);
    }
    let cleaned: Vec<Option<f64>> = values
        .into_iter()
        .map(|v| v.filter(|val| !val.is_nan()))
        .collect();
    Ok(Some(Series::new(series.name().clone(), cleaned)))
}

fn csv_options(config: &ProfileConfig, quote_char: Option<u8>) -> CsvReadOptions {
    let null_values = if config.null_markers.is_empty() {
        None
    } else {
        Some(NullValues::AllColumns(
            config
                .null_markers
                .iter()
                .map(|marker| marker.as_str().into())
                .collect(),
        ))
    };

    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(config.infer_schema_rows)
        .with_parse_options(
            CsvParseOptions::default()
                .with_separator(config.delimiter_byte())
                .with_quote_char(quote_char)
                .with_missing_is_null(true)
                .with_null_values(null_values),
        )
}

/// Read with standard quoting first, then retry without quote handling.
fn read_csv_with_fallback(path: &Path, config: &ProfileConfig) -> Result<DataFrame> {
    let file_path = Some(PathBuf::from(path));

    match csv_options(config, Some(b'"'))
        .try_into_reader_with_file_path(file_path.clone())?
        .finish()
    {
        Ok(df) => return Ok(df),
        Err(e) => {
            debug!("Standard loading failed: {}", e);
        }
    }

    csv_options(config, None)
        .try_into_reader_with_file_path(file_path)?
        .finish()
        .context(format!("Failed to read CSV file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_numeric_column() {
        let series = Series::new("a".into(), &[1i64, 2, 3]);
        let (kind, normalized) = infer_column_kind(&series).unwrap();
        assert_eq!(kind, ColumnKind::Numeric);
        assert!(normalized.is_none());
    }

    #[test]
    fn test_numeric_strings_are_converted() {
        let series = Series::new("a".into(), &[Some("1.5"), None, Some(" 2 ")]);
        let (kind, normalized) = infer_column_kind(&series).unwrap();
        assert_eq!(kind, ColumnKind::Numeric);

        let normalized = normalized.unwrap();
        assert_eq!(normalized.dtype(), &DataType::Float64);
        assert_eq!(normalized.null_count(), 1);
    }

    #[test]
    fn test_one_non_numeric_value_makes_column_categorical() {
        let series = Series::new("a".into(), &["1", "2", "three"]);
        let (kind, normalized) = infer_column_kind(&series).unwrap();
        assert_eq!(kind, ColumnKind::Categorical);
        assert!(normalized.is_none());
    }

    #[test]
    fn test_all_null_string_column_is_numeric() {
        let series = Series::new("a".into(), &[None::<&str>, None, None]);
        let (kind, normalized) = infer_column_kind(&series).unwrap();
        assert_eq!(kind, ColumnKind::Numeric);
        assert_eq!(normalized.unwrap().null_count(), 3);
    }

    #[test]
    fn test_boolean_column_is_categorical() {
        let series = Series::new("flag".into(), &[true, false, true]);
        let (kind, _) = infer_column_kind(&series).unwrap();
        assert_eq!(kind, ColumnKind::Categorical);
    }

    #[test]
    fn test_nan_becomes_null() {
        let series = Series::new("a".into(), &[1.0f64, f64::NAN, 3.0]);
        let (kind, normalized) = infer_column_kind(&series).unwrap();
        assert_eq!(kind, ColumnKind::Numeric);
        assert_eq!(normalized.unwrap().null_count(), 1);
    }

    #[test]
    fn test_from_frame_kinds_follow_column_order() {
        let df = df![
            "num" => [1.0, 2.0, 3.0],
            "text" => ["a", "b", "c"],
            "num_str" => ["4", "5", "6"],
        ]
        .unwrap();

        let dataset = Dataset::from_frame(df).unwrap();
        assert_eq!(
            dataset.kinds(),
            &[
                ColumnKind::Numeric,
                ColumnKind::Categorical,
                ColumnKind::Numeric
            ]
        );
        assert_eq!(dataset.kind("num_str"), Some(ColumnKind::Numeric));
        assert_eq!(
            dataset.series("num_str").unwrap().dtype(),
            &DataType::Float64
        );
        assert_eq!(dataset.numeric_columns().len(), 2);
    }

    #[test]
    fn test_series_unknown_column() {
        let dataset = Dataset::from_frame(df!["a" => [1, 2]].unwrap()).unwrap();
        let err = dataset.series("b").unwrap_err();
        assert_eq!(err.error_code(), "COLUMN_NOT_FOUND");
    }

    #[test]
    fn test_load_missing_file() {
        let err = Dataset::load_csv("does/not/exist.csv", &ProfileConfig::default()).unwrap_err();
        assert!(err.is_input_missing());
    }
}
