//! Shared helpers for the profiling engine.

use polars::prelude::*;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

// =============================================================================
// String Parsing Utilities
// =============================================================================

/// Parse a cell as a number, ignoring surrounding whitespace.
///
/// Formatting characters (currency symbols, thousands separators) are not
/// stripped: a value like `$1,200` keeps its column categorical.
pub fn parse_numeric_value(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

// =============================================================================
// Series Statistics Utilities
// =============================================================================

/// Non-missing values of a numeric series, in row order, with their row
/// indices. NaN is treated as missing.
pub fn indexed_values(series: &Series) -> PolarsResult<Vec<(usize, f64)>> {
    let float_series = series.cast(&DataType::Float64)?;
    Ok(float_series
        .f64()?
        .into_iter()
        .enumerate()
        .filter_map(|(idx, v)| v.filter(|val| !val.is_nan()).map(|val| (idx, val)))
        .collect())
}

/// Non-missing values of a numeric series, sorted ascending.
pub fn sorted_values(series: &Series) -> PolarsResult<Vec<f64>> {
    let mut values: Vec<f64> = indexed_values(series)?
        .into_iter()
        .map(|(_, v)| v)
        .collect();
    values.sort_by(f64::total_cmp);
    Ok(values)
}

/// Quantile of sorted values using linear interpolation between the
/// closest ranks (`pos = q * (n - 1)`).
///
/// Returns `None` for an empty slice.
pub fn quantile_sorted(values: &[f64], quantile: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let pos = quantile.clamp(0.0, 1.0) * (values.len() as f64 - 1.0);
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    if lower == upper {
        return Some(values[lower]);
    }
    let weight = pos - lower as f64;
    Some(values[lower] + (values[upper] - values[lower]) * weight)
}

/// Percentage of `part` in `total`, 0.0 when `total` is zero.
#[inline]
pub fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        (part as f64 / total as f64) * 100.0
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_numeric_dtype() {
        assert!(is_numeric_dtype(&DataType::Int64));
        assert!(is_numeric_dtype(&DataType::Float64));
        assert!(!is_numeric_dtype(&DataType::String));
        assert!(!is_numeric_dtype(&DataType::Boolean));
    }

    #[test]
    fn test_parse_numeric_value() {
        assert_eq!(parse_numeric_value("42"), Some(42.0));
        assert_eq!(parse_numeric_value("  -1.5e3 "), Some(-1500.0));
        assert_eq!(parse_numeric_value(""), None);
        assert_eq!(parse_numeric_value("   "), None);
        assert_eq!(parse_numeric_value("hello"), None);
        assert_eq!(parse_numeric_value("$1,234.56"), None);
    }

    #[test]
    fn test_quantile_sorted_interpolates() {
        let values = [3.0, 3.2, 3.5, 100.0];
        assert!((quantile_sorted(&values, 0.25).unwrap() - 3.15).abs() < 1e-9);
        assert!((quantile_sorted(&values, 0.5).unwrap() - 3.35).abs() < 1e-9);
        assert!((quantile_sorted(&values, 0.75).unwrap() - 27.625).abs() < 1e-9);
    }

    #[test]
    fn test_quantile_sorted_edges() {
        assert_eq!(quantile_sorted(&[], 0.5), None);
        assert_eq!(quantile_sorted(&[7.0], 0.25), Some(7.0));
        assert_eq!(quantile_sorted(&[1.0, 2.0, 3.0], 0.0), Some(1.0));
        assert_eq!(quantile_sorted(&[1.0, 2.0, 3.0], 1.0), Some(3.0));
    }

    #[test]
    fn test_indexed_values_skip_nulls() {
        let series = Series::new("v".into(), &[Some(1.0), None, Some(3.0)]);
        let values = indexed_values(&series).unwrap();
        assert_eq!(values, vec![(0, 1.0), (2, 3.0)]);
    }

    #[test]
    fn test_sorted_values_from_integers() {
        let series = Series::new("v".into(), &[3i64, 1, 2]);
        assert_eq!(sorted_values(&series).unwrap(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(1, 4), 25.0);
        assert_eq!(percentage(0, 0), 0.0);
    }
}
