//! Report assembly and rendering.
//!
//! [`ReportGenerator::assemble`] combines a [`DatasetProfile`](crate::types::DatasetProfile)
//! with run metadata into a [`ProfileReport`]. Rendering is kept separate:
//!
//! - JSON via `serde_json` (stdout with `--json`, or a `.json` file)
//! - a self-contained HTML page via [`render_html`]
//!
//! # Example
//!
//! ```rust,ignore
//! use eda_profiler::reporting::{ReportFormat, ReportGenerator};
//!
//! let report = ReportGenerator::assemble(profile, "data/iris.csv", "Iris EDA");
//! let written =
//!     ReportGenerator::write_report(&report, "out/iris_report.json", ReportFormat::Both)?;
//! ```

mod generator;
mod html;

pub use generator::{
    DEFAULT_REPORT_TITLE, ProfileReport, ReportFormat, ReportGenerator, ReportSummary,
};
pub use html::render_html;
