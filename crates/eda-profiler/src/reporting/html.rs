//! Self-contained HTML rendering of a [`ProfileReport`].

use super::generator::ProfileReport;
use crate::types::{Coefficient, ColumnProfile, OutlierReport};

const STYLE: &str = r#"
        body { font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; line-height: 1.6; color: #333; max-width: 1200px; margin: 0 auto; padding: 20px; }
        h1, h2, h3 { color: #2c3e50; border-bottom: 2px solid #eee; padding-bottom: 10px; }
        .section { margin-bottom: 40px; background: #fff; padding: 20px; border-radius: 8px; box-shadow: 0 2px 5px rgba(0,0,0,0.1); }
        .stats-table { width: 100%; border-collapse: collapse; margin: 15px 0; }
        .stats-table th, .stats-table td { padding: 12px; text-align: left; border-bottom: 1px solid #ddd; }
        .stats-table th { background-color: #f8f9fa; font-weight: 600; }
        .metric-card { background: #f8f9fa; padding: 15px; border-radius: 4px; margin-bottom: 10px; }
        .timestamp { color: #666; font-size: 0.9em; margin-bottom: 30px; }
        .undefined { color: #999; }
"#;

const UNDEFINED_CELL: &str = "<td class=\"undefined\">—</td>";

/// Render the report as a single HTML page.
///
/// Sections without content (no missing values, no outliers, fewer than one
/// numeric column) are left out.
pub fn render_html(report: &ProfileReport) -> String {
    let title = escape_html(&report.title);
    let mut html = String::with_capacity(8 * 1024);

    html.push_str(&format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>{}</style>\n</head>\n<body>\n",
        title, STYLE
    ));
    html.push_str(&format!("<h1>{}</h1>\n", title));
    html.push_str(&format!(
        "<p class=\"timestamp\">Generated on: {} | Source: {}</p>\n",
        escape_html(&report.generated_at),
        escape_html(&report.input_file)
    ));

    render_overview(&mut html, report);
    render_descriptive_stats(&mut html, &report.columns);
    render_categorical(&mut html, &report.columns);
    render_missing(&mut html, &report.columns);
    render_outliers(&mut html, &report.columns);
    render_correlations(&mut html, report);

    html.push_str("</body>\n</html>\n");
    html
}

fn render_overview(html: &mut String, report: &ProfileReport) {
    let shape = &report.shape;
    html.push_str("<div class=\"section\">\n<h2>Dataset Overview</h2>\n");
    html.push_str(&format!(
        "<div class=\"metric-card\"><strong>Rows:</strong> {} | <strong>Columns:</strong> {} | <strong>Memory Usage:</strong> {:.2} KB</div>\n",
        shape.rows,
        shape.columns,
        shape.memory_bytes as f64 / 1024.0
    ));
    html.push_str(&format!(
        "<div class=\"metric-card\"><strong>Numeric columns:</strong> {} | <strong>Categorical columns:</strong> {} | <strong>Missing cells:</strong> {} | <strong>Outliers:</strong> {}</div>\n",
        report.summary.numeric_columns,
        report.summary.categorical_columns,
        report.summary.total_missing,
        report.summary.total_outliers
    ));
    html.push_str("</div>\n");
}

fn render_descriptive_stats(html: &mut String, columns: &[ColumnProfile]) {
    let numeric: Vec<_> = columns
        .iter()
        .filter_map(|col| col.numeric.as_ref().map(|n| (col, n)))
        .collect();
    if numeric.is_empty() {
        return;
    }

    html.push_str("<div class=\"section\">\n<h2>Descriptive Statistics</h2>\n");
    html.push_str("<div style=\"overflow-x: auto;\">\n<table class=\"stats-table\">\n");
    html.push_str(
        "<thead><tr><th>Column</th><th>Count</th><th>Mean</th><th>Std</th><th>Min</th><th>25%</th><th>50%</th><th>75%</th><th>Max</th></tr></thead>\n<tbody>\n",
    );

    for (col, numeric) in numeric {
        html.push_str(&format!("<tr><td>{}</td>", escape_html(&col.name)));
        match numeric.stats.as_defined() {
            Some(s) => {
                html.push_str(&format!("<td>{}</td>", s.count));
                for value in [s.mean, s.std, s.min, s.q1, s.median, s.q3, s.max] {
                    html.push_str(&format!("<td>{}</td>", format_float(value)));
                }
            }
            None => {
                html.push_str("<td>0</td>");
                for _ in 0..7 {
                    html.push_str(UNDEFINED_CELL);
                }
            }
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</tbody>\n</table>\n</div>\n</div>\n");
}

fn render_categorical(html: &mut String, columns: &[ColumnProfile]) {
    let categorical: Vec<_> = columns
        .iter()
        .filter_map(|col| col.categorical.as_ref().map(|c| (col, c)))
        .collect();
    if categorical.is_empty() {
        return;
    }

    html.push_str(
        "<div class=\"section\">\n<h2>Categorical Summary</h2>\n<table class=\"stats-table\">\n",
    );
    html.push_str(
        "<thead><tr><th>Column</th><th>Unique Values</th><th>Top Values</th></tr></thead>\n<tbody>\n",
    );

    for (col, summary) in categorical {
        let top = summary
            .top_values
            .iter()
            .map(|f| format!("{} ({})", escape_html(&f.value), f.count))
            .collect::<Vec<_>>()
            .join(", ");
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape_html(&col.name),
            summary.unique_count,
            top
        ));
    }

    html.push_str("</tbody>\n</table>\n</div>\n");
}

fn render_missing(html: &mut String, columns: &[ColumnProfile]) {
    let missing: Vec<_> = columns.iter().filter(|col| col.missing.count > 0).collect();
    if missing.is_empty() {
        return;
    }

    html.push_str(
        "<div class=\"section\">\n<h2>Missing Values Analysis</h2>\n<table class=\"stats-table\">\n",
    );
    html.push_str(
        "<thead><tr><th>Column</th><th>Missing Count</th><th>Percentage</th></tr></thead>\n<tbody>\n",
    );

    for col in missing {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{:.1}%</td></tr>\n",
            escape_html(&col.name),
            col.missing.count,
            col.missing.percentage
        ));
    }

    html.push_str("</tbody>\n</table>\n</div>\n");
}

fn render_outliers(html: &mut String, columns: &[ColumnProfile]) {
    let flagged: Vec<_> = columns
        .iter()
        .filter_map(|col| match &col.numeric.as_ref()?.outliers {
            OutlierReport::Detected {
                lower_bound,
                upper_bound,
                indices,
                ..
            } if !indices.is_empty() => Some((col, indices.len(), *lower_bound, *upper_bound)),
            _ => None,
        })
        .collect();
    if flagged.is_empty() {
        return;
    }

    html.push_str(
        "<div class=\"section\">\n<h2>Outlier Detection (IQR Method)</h2>\n<table class=\"stats-table\">\n",
    );
    html.push_str(
        "<thead><tr><th>Column</th><th>Outlier Count</th><th>Lower Bound</th><th>Upper Bound</th></tr></thead>\n<tbody>\n",
    );

    for (col, count, lower, upper) in flagged {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape_html(&col.name),
            count,
            format_float(lower),
            format_float(upper)
        ));
    }

    html.push_str("</tbody>\n</table>\n</div>\n");
}

fn render_correlations(html: &mut String, report: &ProfileReport) {
    let matrix = &report.correlations;
    if matrix.is_empty() {
        return;
    }

    html.push_str("<div class=\"section\">\n<h2>Correlation Matrix</h2>\n");
    html.push_str(
        "<div style=\"overflow-x: auto;\">\n<table class=\"stats-table\">\n<thead><tr><th></th>",
    );
    for name in &matrix.columns {
        html.push_str(&format!("<th>{}</th>", escape_html(name)));
    }
    html.push_str("</tr></thead>\n<tbody>\n");

    for (name, row) in matrix.columns.iter().zip(&matrix.values) {
        html.push_str(&format!("<tr><th>{}</th>", escape_html(name)));
        for coefficient in row {
            match coefficient {
                Coefficient::Defined(r) => html.push_str(&format!("<td>{}</td>", format_float(*r))),
                Coefficient::Undefined => html.push_str(UNDEFINED_CELL),
            }
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</tbody>\n</table>\n</div>\n</div>\n");
}

fn format_float(value: f64) -> String {
    format!("{:.2}", value)
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
