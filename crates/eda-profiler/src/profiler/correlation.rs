//! Pairwise Pearson correlation between numeric columns.

use crate::error::Result;
use crate::types::{Coefficient, CorrelationMatrix};
use polars::prelude::*;
use tracing::debug;

/// Compute the Pearson correlation matrix of the given numeric columns.
///
/// Each pair uses the rows where both values are present. A pair yields
/// [`Coefficient::Undefined`] when fewer than two such rows exist or when
/// either side has zero variance over them; this includes the diagonal entry
/// of a constant column. A coefficient that is not finite (e.g. from an
/// infinite input value) is also undefined.
pub fn compute_correlation(columns: &[&Series]) -> Result<CorrelationMatrix> {
    let names: Vec<String> = columns.iter().map(|s| s.name().to_string()).collect();

    let mut series_values: Vec<Vec<Option<f64>>> = Vec::with_capacity(columns.len());
    for series in columns {
        let casted = series.cast(&DataType::Float64)?;
        series_values.push(
            casted
                .f64()?
                .into_iter()
                .map(|v| v.filter(|val| !val.is_nan()))
                .collect(),
        );
    }

    let size = names.len();
    let mut values = vec![vec![Coefficient::Undefined; size]; size];

    for i in 0..size {
        for j in i..size {
            let coefficient = match pearson(&series_values[i], &series_values[j]) {
                Coefficient::Defined(_) if i == j => Coefficient::Defined(1.0),
                other => other,
            };
            if coefficient == Coefficient::Undefined {
                debug!(
                    "Correlation between '{}' and '{}' is undefined",
                    names[i], names[j]
                );
            }
            values[i][j] = coefficient;
            values[j][i] = coefficient;
        }
    }

    Ok(CorrelationMatrix {
        columns: names,
        values,
    })
}

/// Pearson coefficient over pairwise-complete observations.
pub(crate) fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> Coefficient {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y.iter())
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .collect();

    if pairs.len() < 2 {
        return Coefficient::Undefined;
    }

    // Decide constancy on the values; accumulated sums are inexact for
    // repeated fractions like 0.1
    let (x0, y0) = pairs[0];
    if pairs.iter().all(|(a, _)| *a == x0) || pairs.iter().all(|(_, b)| *b == y0) {
        return Coefficient::Undefined;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(a, _)| a).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, b)| b).sum::<f64>() / n;

    let mut numerator = 0.0;
    let mut sum_sq_x = 0.0;
    let mut sum_sq_y = 0.0;
    for (a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        numerator += dx * dy;
        sum_sq_x += dx * dx;
        sum_sq_y += dy * dy;
    }

    if sum_sq_x == 0.0 || sum_sq_y == 0.0 {
        return Coefficient::Undefined;
    }

    let r = numerator / (sum_sq_x * sum_sq_y).sqrt();
    if !r.is_finite() {
        return Coefficient::Undefined;
    }
    Coefficient::Defined(r.clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(matrix: &CorrelationMatrix, a: &str, b: &str) -> Option<f64> {
        matrix.get(a, b).and_then(|c| c.value())
    }

    #[test]
    fn test_perfect_positive_and_negative() {
        let a = Series::new("a".into(), &[1.0f64, 2.0, 3.0, 4.0]);
        let b = Series::new("b".into(), &[2.0f64, 4.0, 6.0, 8.0]);
        let c = Series::new("c".into(), &[4.0f64, 3.0, 2.0, 1.0]);
        let matrix = compute_correlation(&[&a, &b, &c]).unwrap();

        assert!((value(&matrix, "a", "b").unwrap() - 1.0).abs() < 1e-12);
        assert!((value(&matrix, "a", "c").unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_diagonal_is_exactly_one() {
        let a = Series::new("a".into(), &[1.5f64, 2.25, 3.0, 10.0]);
        let matrix = compute_correlation(&[&a]).unwrap();
        assert_eq!(matrix.values[0][0], Coefficient::Defined(1.0));
    }

    #[test]
    fn test_symmetric() {
        let a = Series::new("a".into(), &[1.0f64, 2.0, 3.0, 4.0, 5.0]);
        let b = Series::new("b".into(), &[10.0f64, 100.0, 10.0, 10.0, 10.0]);
        let c = Series::new("c".into(), &[Some(1.1), Some(2.2), None, Some(4.4), Some(5.5)]);
        let matrix = compute_correlation(&[&a, &b, &c]).unwrap();

        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(matrix.values[i][j], matrix.values[j][i]);
            }
        }
    }

    #[test]
    fn test_zero_variance_is_undefined() {
        let a = Series::new("a".into(), &[1.0f64, 2.0, 3.0]);
        let constant = Series::new("k".into(), &[7.0f64, 7.0, 7.0]);
        let matrix = compute_correlation(&[&a, &constant]).unwrap();

        assert_eq!(matrix.get("a", "k"), Some(Coefficient::Undefined));
        assert_eq!(matrix.get("k", "k"), Some(Coefficient::Undefined));
        assert_eq!(matrix.get("a", "a"), Some(Coefficient::Defined(1.0)));
    }

    #[test]
    fn test_constant_fractional_column_is_undefined() {
        let a = Series::new("a".into(), &[1.0f64, 2.0, 3.0]);
        let constant = Series::new("k".into(), &[0.1f64, 0.1, 0.1]);
        let matrix = compute_correlation(&[&a, &constant]).unwrap();

        assert_eq!(matrix.get("k", "k"), Some(Coefficient::Undefined));
        assert_eq!(matrix.get("a", "k"), Some(Coefficient::Undefined));
        assert_eq!(matrix.get("k", "a"), Some(Coefficient::Undefined));
    }

    #[test]
    fn test_constant_over_complete_rows_is_undefined() {
        // b varies overall but is constant on the rows where a is present
        let a = Series::new("a".into(), &[Some(1.0), Some(2.0), None, Some(4.0)]);
        let b = Series::new("b".into(), &[Some(0.3), Some(0.3), Some(9.0), Some(0.3)]);
        let matrix = compute_correlation(&[&a, &b]).unwrap();

        assert_eq!(matrix.get("a", "b"), Some(Coefficient::Undefined));
        assert_eq!(matrix.get("b", "b"), Some(Coefficient::Defined(1.0)));
    }

    #[test]
    fn test_infinite_value_is_undefined() {
        let a = Series::new("a".into(), &[1.0f64, 2.0, f64::INFINITY, 4.0]);
        let b = Series::new("b".into(), &[2.0f64, 4.0, 6.0, 9.0]);
        let matrix = compute_correlation(&[&a, &b]).unwrap();

        assert_eq!(matrix.get("a", "b"), Some(Coefficient::Undefined));
        assert_eq!(matrix.get("a", "a"), Some(Coefficient::Undefined));
        assert_eq!(matrix.get("b", "b"), Some(Coefficient::Defined(1.0)));
    }

    #[test]
    fn test_pairwise_complete_rows() {
        // Only rows 0, 1, 3 are complete; over those a and b are perfectly linear
        let a = Series::new("a".into(), &[Some(1.0), Some(2.0), None, Some(4.0)]);
        let b = Series::new("b".into(), &[Some(3.0), Some(5.0), Some(100.0), Some(9.0)]);
        let matrix = compute_correlation(&[&a, &b]).unwrap();

        assert!((value(&matrix, "a", "b").unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_fewer_than_two_complete_rows() {
        let a = Series::new("a".into(), &[Some(1.0), None, Some(3.0)]);
        let b = Series::new("b".into(), &[None, Some(2.0), Some(5.0)]);
        let matrix = compute_correlation(&[&a, &b]).unwrap();

        assert_eq!(matrix.get("a", "b"), Some(Coefficient::Undefined));
    }

    #[test]
    fn test_all_missing_column_is_undefined() {
        let empty = Series::new("e".into(), &[None::<f64>, None, None]);
        let matrix = compute_correlation(&[&empty]).unwrap();
        assert_eq!(matrix.values[0][0], Coefficient::Undefined);
    }

    #[test]
    fn test_no_columns() {
        let matrix = compute_correlation(&[]).unwrap();
        assert!(matrix.is_empty());
        assert!(matrix.values.is_empty());
    }

    #[test]
    fn test_values_within_bounds() {
        let a = Series::new("a".into(), &[0.1f64, 0.2, 0.3, 0.4, 0.5, 0.6]);
        let b = Series::new("b".into(), &[0.3f64, 0.6, 0.9, 1.2, 1.5, 1.8]);
        let matrix = compute_correlation(&[&a, &b]).unwrap();

        for row in &matrix.values {
            for c in row {
                let v = c.value().unwrap();
                assert!((-1.0..=1.0).contains(&v));
            }
        }
    }
}
