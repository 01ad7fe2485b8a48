//! Cardinality and frequency summary for categorical columns.

use crate::error::Result;
use crate::types::{CategoricalSummary, ValueFrequency};
use polars::prelude::*;
use std::collections::HashMap;

/// Count distinct non-missing values and keep the `top_n` most frequent.
///
/// Ties in frequency are ordered by value so the output is deterministic.
pub fn compute_categorical_summary(series: &Series, top_n: usize) -> Result<CategoricalSummary> {
    let casted = series.cast(&DataType::String)?;

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for value in casted.str()?.into_iter().flatten() {
        *counts.entry(value).or_insert(0) += 1;
    }

    let unique_count = counts.len();
    let mut entries: Vec<(&str, usize)> = counts.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let top_values = entries
        .into_iter()
        .take(top_n)
        .map(|(value, count)| ValueFrequency {
            value: value.to_string(),
            count,
        })
        .collect();

    Ok(CategoricalSummary {
        unique_count,
        top_values,
    })
}
