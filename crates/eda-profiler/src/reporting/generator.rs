use crate::error::{EdaError, Result, ResultExt};
use crate::reporting::html::render_html;
use crate::types::{ColumnKind, ColumnProfile, CorrelationMatrix, DatasetProfile, DatasetShape};
use crate::utils::percentage;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Title used when none is given.
pub const DEFAULT_REPORT_TITLE: &str = "Automated EDA Report";

/// Output format(s) for a written report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    #[default]
    Json,
    Html,
    /// JSON and HTML side by side, sharing the file stem.
    Both,
}

// ============================================================================
// Report Types
// ============================================================================

/// Dataset-wide totals shown at the top of a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Total number of missing cells
    pub total_missing: usize,
    /// Missing cells as a percentage of all cells
    pub total_missing_percentage: f64,
    /// Columns with at least one missing value
    pub columns_with_missing: Vec<String>,
    /// Total number of flagged outlier values
    pub total_outliers: usize,
    /// Numeric columns with at least one outlier
    pub outlier_columns: Vec<String>,
    pub numeric_columns: usize,
    pub categorical_columns: usize,
}

/// The complete profiling report for one input file.
///
/// Produced once per run; this is the structure serialized to JSON and
/// rendered to HTML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileReport {
    /// Timestamp when the report was generated
    pub generated_at: String,
    pub title: String,
    /// Path to the input file
    pub input_file: String,
    pub shape: DatasetShape,
    pub summary: ReportSummary,
    /// Per-column profiles, in dataset order
    pub columns: Vec<ColumnProfile>,
    /// Pearson correlation between numeric columns
    pub correlations: CorrelationMatrix,
}

impl ProfileReport {
    pub fn column(&self, name: &str) -> Option<&ColumnProfile> {
        self.columns.iter().find(|col| col.name == name)
    }
}

pub struct ReportGenerator;

impl ReportGenerator {
    /// Combine a dataset profile with run metadata into a report.
    pub fn assemble(profile: DatasetProfile, input_file: &str, title: &str) -> ProfileReport {
        let summary = Self::summarize(&profile);
        let DatasetProfile {
            shape,
            column_profiles,
            correlations,
        } = profile;

        ProfileReport {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            title: title.to_string(),
            input_file: input_file.to_string(),
            shape,
            summary,
            columns: column_profiles,
            correlations,
        }
    }

    fn summarize(profile: &DatasetProfile) -> ReportSummary {
        let total_missing = profile.total_missing();
        let total_cells = profile.shape.rows.saturating_mul(profile.shape.columns);

        let columns_with_missing = profile
            .column_profiles
            .iter()
            .filter(|col| col.missing.count > 0)
            .map(|col| col.name.clone())
            .collect();

        let outlier_columns = profile
            .column_profiles
            .iter()
            .filter(|col| col.outlier_count() > 0)
            .map(|col| col.name.clone())
            .collect();

        let count_kind = |kind| {
            profile
                .column_profiles
                .iter()
                .filter(|col| col.kind == kind)
                .count()
        };

        ReportSummary {
            total_missing,
            total_missing_percentage: percentage(total_missing, total_cells),
            columns_with_missing,
            total_outliers: profile.total_outliers(),
            outlier_columns,
            numeric_columns: count_kind(ColumnKind::Numeric),
            categorical_columns: count_kind(ColumnKind::Categorical),
        }
    }

    /// Pretty-printed JSON rendering of a report.
    pub fn to_json(report: &ProfileReport) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }

    /// Write a report in the requested format(s) and return the paths written.
    ///
    /// - `Json` writes to `path` as given.
    /// - `Html` writes to `path`, switching the extension to `.html` unless it
    ///   already is `.html`/`.htm`.
    /// - `Both` writes `<stem>.json` and `<stem>.html` next to each other.
    ///
    /// Parent directories are created as needed.
    pub fn write_report(
        report: &ProfileReport,
        path: impl AsRef<Path>,
        format: ReportFormat,
    ) -> Result<Vec<PathBuf>> {
        let path = path.as_ref();
        let mut written = Vec::new();

        let (json_path, html_path) = match format {
            ReportFormat::Json => (Some(path.to_path_buf()), None),
            ReportFormat::Html => (None, Some(html_target(path))),
            ReportFormat::Both => (
                Some(path.with_extension("json")),
                Some(path.with_extension("html")),
            ),
        };

        if let Some(json_path) = json_path {
            write_file(&json_path, &Self::to_json(report)?)?;
            written.push(json_path);
        }

        if let Some(html_path) = html_path {
            write_file(&html_path, &render_html(report))?;
            written.push(html_path);
        }

        Ok(written)
    }
}

fn html_target(path: &Path) -> PathBuf {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("html") | Some("htm") => path.to_path_buf(),
        _ => path.with_extension("html"),
    }
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(EdaError::from)
            .context(format!("Failed to create directory {}", parent.display()))?;
    }

    fs::write(path, contents)
        .map_err(|e| EdaError::ReportGenerationFailed(format!("{}: {}", path.display(), e)))?;

    info!("Report saved: {}", path.display());
    Ok(())
}
