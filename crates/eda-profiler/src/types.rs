use serde::{Deserialize, Serialize};

/// Inferred kind of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Every non-missing value parses as a number.
    Numeric,
    /// Anything else: text, booleans, dates.
    Categorical,
}

impl ColumnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnKind::Numeric => "numeric",
            ColumnKind::Categorical => "categorical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Missingness {
    pub count: usize,
    /// Share of rows that are missing, in percent (0.0 - 100.0).
    pub percentage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation (n - 1 denominator).
    pub std: f64,
    pub min: f64,
    pub q1: f64,
    pub q3: f64,
    pub max: f64,
}

/// Descriptive statistics of a numeric column.
///
/// A column without any non-missing value yields `Undefined` rather than
/// statistics computed over zero values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DescriptiveStats {
    Defined(SummaryStats),
    Undefined,
}

impl DescriptiveStats {
    pub fn as_defined(&self) -> Option<&SummaryStats> {
        match self {
            DescriptiveStats::Defined(stats) => Some(stats),
            DescriptiveStats::Undefined => None,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, DescriptiveStats::Undefined)
    }
}

/// Result of IQR outlier detection on a numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutlierReport {
    /// Too few non-missing values for quartiles to be meaningful.
    Skipped { non_missing: usize },
    Detected {
        q1: f64,
        q3: f64,
        iqr: f64,
        lower_bound: f64,
        upper_bound: f64,
        /// Row indices (into the dataset) of values outside the bounds.
        indices: Vec<usize>,
    },
}

impl OutlierReport {
    pub fn indices(&self) -> &[usize] {
        match self {
            OutlierReport::Skipped { .. } => &[],
            OutlierReport::Detected { indices, .. } => indices,
        }
    }

    pub fn count(&self) -> usize {
        self.indices().len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueFrequency {
    pub value: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalSummary {
    pub unique_count: usize,
    /// Most frequent values, by descending count then ascending value.
    pub top_values: Vec<ValueFrequency>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericProfile {
    pub stats: DescriptiveStats,
    pub outliers: OutlierReport,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProfile {
    pub name: String,
    pub dtype: String,
    pub kind: ColumnKind,
    pub missing: Missingness,
    pub non_missing_count: usize,
    pub unique_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeric: Option<NumericProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categorical: Option<CategoricalSummary>,
}

impl ColumnProfile {
    pub fn outlier_count(&self) -> usize {
        self.numeric
            .as_ref()
            .map(|numeric| numeric.outliers.count())
            .unwrap_or(0)
    }
}

/// One cell of a correlation matrix.
///
/// Serialized as a plain number, or `null` when undefined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Coefficient {
    Defined(f64),
    Undefined,
}

impl Coefficient {
    pub fn value(&self) -> Option<f64> {
        match self {
            Coefficient::Defined(value) => Some(*value),
            Coefficient::Undefined => None,
        }
    }
}

/// Pairwise Pearson coefficients between numeric columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    /// Row-major; `values[i][j]` pairs `columns[i]` with `columns[j]`.
    pub values: Vec<Vec<Coefficient>>,
}

impl CorrelationMatrix {
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Coefficient for a pair of columns, if both are in the matrix.
    pub fn get(&self, a: &str, b: &str) -> Option<Coefficient> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        Some(self.values[i][j])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetShape {
    pub rows: usize,
    pub columns: usize,
    /// Estimated in-memory size of the loaded table.
    pub memory_bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetProfile {
    pub shape: DatasetShape,
    pub column_profiles: Vec<ColumnProfile>,
    pub correlations: CorrelationMatrix,
}

impl DatasetProfile {
    pub fn column(&self, name: &str) -> Option<&ColumnProfile> {
        self.column_profiles.iter().find(|col| col.name == name)
    }

    pub fn total_missing(&self) -> usize {
        self.column_profiles.iter().map(|col| col.missing.count).sum()
    }

    pub fn total_outliers(&self) -> usize {
        self.column_profiles.iter().map(|col| col.outlier_count()).sum()
    }
}
