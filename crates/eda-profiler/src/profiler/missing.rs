//! Missing-value detection.

use crate::types::Missingness;
use crate::utils::percentage;
use polars::prelude::*;

/// Count missing values in a column and express them as a share of rows.
pub fn compute_missingness(series: &Series) -> Missingness {
    let count = series.null_count();
    Missingness {
        count,
        percentage: percentage(count, series.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missingness_counts_nulls() {
        let series = Series::new("c".into(), &[Some(1.1), Some(2.2), None, Some(4.4), Some(5.5)]);
        let missing = compute_missingness(&series);
        assert_eq!(missing.count, 1);
        assert!((missing.percentage - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_missingness_one_in_150() {
        let values: Vec<Option<&str>> = (0..150)
            .map(|i| if i == 42 { None } else { Some("setosa") })
            .collect();
        let series = Series::new("species".into(), values);
        let missing = compute_missingness(&series);

        assert_eq!(missing.count, 1);
        assert_eq!((missing.percentage * 100.0).round() / 100.0, 0.67);
    }

    #[test]
    fn test_missingness_no_nulls() {
        let series = Series::new("a".into(), &[1, 2, 3]);
        let missing = compute_missingness(&series);
        assert_eq!(missing.count, 0);
        assert_eq!(missing.percentage, 0.0);
    }

    #[test]
    fn test_missingness_empty_column() {
        let series = Series::new("a".into(), Vec::<f64>::new());
        let missing = compute_missingness(&series);
        assert_eq!(missing.count, 0);
        assert_eq!(missing.percentage, 0.0);
    }
}
