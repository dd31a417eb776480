//! Markdown and JSON report generation.
//!
//! This module renders a [`DashboardReport`] as a Markdown document or as
//! pretty-printed JSON.

use super::{DashboardReport, ReportMetadata};
use crate::analysis::{
    percentage, AgeBucket, Aggregations, ConditionComparison, DashboardMetric, HealthFactor,
    StatusBucket,
};
use crate::config::ReportConfig;
use crate::models::Person;
use crate::validation::InvalidRecord;
use crate::view::ClientListView;
use anyhow::Result;

/// Rendering knobs for the Markdown report.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Draw text bars next to chart values.
    pub include_charts: bool,
    /// Width of the longest bar.
    pub bar_width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            include_charts: true,
            bar_width: 30,
        }
    }
}

impl From<&ReportConfig> for RenderOptions {
    fn from(config: &ReportConfig) -> Self {
        Self {
            include_charts: config.include_charts,
            bar_width: config.bar_width,
        }
    }
}

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &DashboardReport, options: &RenderOptions) -> String {
    let mut output = String::new();

    // Title
    output.push_str(&format!(
        "# {} Client Dashboard\n\n",
        report.metadata.company_name
    ));

    output.push_str(&generate_metadata_section(&report.metadata));
    output.push_str(&generate_table_of_contents(report));
    output.push_str(&generate_metrics_section(&report.metrics));
    output.push_str(&generate_status_section(
        &report.status,
        &report.aggregations,
        options,
    ));
    output.push_str(&generate_health_section(
        &report.health_factors,
        &report.aggregations,
        options,
    ));
    output.push_str(&generate_age_section(&report.age_distribution, options));
    output.push_str(&generate_comparison_section(&report.condition_comparison));
    output.push_str(&generate_clients_section(&report.query, &report.clients));

    if let Some(ref invalid) = report.invalid_records {
        output.push_str(&generate_quality_section(invalid));
    }

    output.push_str(&generate_footer());

    output
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!("- **Source:** `{}`\n", metadata.source));
    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!("- **Records:** {}\n", metadata.record_count));
    section.push('\n');

    section
}

/// Generate the table of contents.
fn generate_table_of_contents(report: &DashboardReport) -> String {
    let mut toc = String::new();

    toc.push_str("## Table of Contents\n\n");
    toc.push_str("- [Metadata](#metadata)\n");
    toc.push_str("- [Summary](#summary)\n");
    toc.push_str("- [Client Status](#client-status)\n");
    toc.push_str("- [Health Factors](#health-factors)\n");
    toc.push_str("- [Age Distribution](#age-distribution)\n");
    toc.push_str("- [Condition Comparison](#condition-comparison)\n");
    toc.push_str("- [Clients](#clients)\n");

    if report.invalid_records.is_some() {
        toc.push_str("- [Data Quality](#data-quality)\n");
    }

    toc.push('\n');

    toc
}

/// Upper bound on bar width, whatever the config asks for.
const MAX_BAR_WIDTH: usize = 200;

/// Text bar proportional to `value / max`.
fn bar(value: usize, max: usize, options: &RenderOptions) -> String {
    if !options.include_charts || max == 0 {
        return String::new();
    }

    let width = options.bar_width.min(MAX_BAR_WIDTH);
    let length = (value.min(max) as f64 / max as f64 * width as f64).round() as usize;
    "█".repeat(length)
}

/// Escape a value for use inside a Markdown table cell.
fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

/// Escape a value for use inside emphasized inline text.
fn inline(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '*' | '_' | '`' | '|' | '[' | ']' | '<' | '>' | '"' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '\n' | '\r' => escaped.push(' '),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn generate_metrics_section(metrics: &[DashboardMetric]) -> String {
    let mut section = String::new();

    section.push_str("## Summary\n\n");
    section.push_str("| Metric | Value | |\n");
    section.push_str("|:---|:---:|:---|\n");

    for metric in metrics {
        section.push_str(&format!(
            "| {} | **{}** | {} |\n",
            metric.label, metric.value, metric.subtitle
        ));
    }
    section.push('\n');

    section
}

fn generate_status_section(
    status: &[StatusBucket],
    aggregations: &Aggregations,
    options: &RenderOptions,
) -> String {
    let mut section = String::new();
    let max = status.iter().map(|s| s.value).max().unwrap_or(0);

    section.push_str("## Client Status\n\n");
    section.push_str("| Status | Clients | Share | |\n");
    section.push_str("|:---|:---:|:---:|:---|\n");

    for bucket in status {
        section.push_str(&format!(
            "| {} | {} | {}% | {} |\n",
            bucket.label,
            bucket.value,
            percentage(bucket.value, aggregations.total),
            bar(bucket.value, max, options)
        ));
    }
    section.push('\n');

    section
}

fn generate_health_section(
    factors: &[HealthFactor],
    aggregations: &Aggregations,
    options: &RenderOptions,
) -> String {
    let mut section = String::new();
    let max = factors.iter().map(|f| f.value).max().unwrap_or(0);

    section.push_str("## Health Factors\n\n");
    section.push_str("| Factor | Clients | Share | |\n");
    section.push_str("|:---|:---:|:---:|:---|\n");

    for factor in factors {
        section.push_str(&format!(
            "| {} | {} | {}% | {} |\n",
            factor.label,
            factor.value,
            percentage(factor.value, aggregations.total),
            bar(factor.value, max, options)
        ));
    }
    section.push('\n');

    section
}

fn generate_age_section(buckets: &[AgeBucket], options: &RenderOptions) -> String {
    let mut section = String::new();
    let max = buckets.iter().map(|b| b.value).max().unwrap_or(0);

    section.push_str("## Age Distribution\n\n");
    section.push_str("| Age | Clients | |\n");
    section.push_str("|:---|:---:|:---|\n");

    for bucket in buckets {
        section.push_str(&format!(
            "| {} | {} | {} |\n",
            bucket.label,
            bucket.value,
            bar(bucket.value, max, options)
        ));
    }
    section.push('\n');

    section
}

fn generate_comparison_section(comparison: &[ConditionComparison]) -> String {
    let mut section = String::new();

    section.push_str("## Condition Comparison\n\n");
    section.push_str("| Condition | Yes | No |\n");
    section.push_str("|:---|:---:|:---:|\n");

    for item in comparison {
        section.push_str(&format!("| {} | {} | {} |\n", item.label, item.yes, item.no));
    }
    section.push('\n');

    section
}

fn format_age(age: f64) -> String {
    if !age.is_finite() {
        "-".to_string()
    } else if age.fract() == 0.0 {
        format!("{:.0}", age)
    } else {
        age.to_string()
    }
}

fn generate_clients_section(query: &ClientListView, clients: &[Person]) -> String {
    let mut section = String::new();

    section.push_str("## Clients\n\n");

    let search = if query.search_term.is_empty() {
        "-".to_string()
    } else {
        format!("\"{}\"", inline(&query.search_term))
    };
    section.push_str(&format!(
        "*Search: {} | Status: {} | Order: id {}*\n\n",
        search, query.status_filter, query.sort_direction
    ));

    if clients.is_empty() {
        section.push_str("No clients match the current filters.\n\n");
        return section;
    }

    section.push_str("| ID | Name | Identification | Age | Gender | Status | Conditions |\n");
    section.push_str("|:---:|:---|:---|:---:|:---|:---|:---|\n");

    for client in clients {
        let status = if client.active { "Active" } else { "Inactive" };
        let conditions = client.condition_labels().join(", ");

        section.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} | {} |\n",
            client.id,
            cell(&client.full_name),
            cell(&client.identification),
            format_age(client.age),
            client.gender,
            status,
            cell(&conditions)
        ));
    }
    section.push('\n');

    section
}

fn generate_quality_section(invalid: &[InvalidRecord]) -> String {
    let mut section = String::new();

    section.push_str("## Data Quality\n\n");

    if invalid.is_empty() {
        section.push_str("All records pass the client form rules.\n\n");
        return section;
    }

    section.push_str(&format!(
        "{} record(s) would be rejected by the client form:\n\n",
        invalid.len()
    ));

    for record in invalid {
        section.push_str(&format!("- **{}** {}\n", record.id, cell(&record.full_name)));
        for error in &record.errors {
            section.push_str(&format!("  - `{}` {}\n", error.field, error.kind));
        }
    }
    section.push('\n');

    section
}

/// Generate the report footer.
fn generate_footer() -> String {
    let mut footer = String::new();

    footer.push_str("---\n\n");
    footer.push_str(&format!(
        "*Report generated by clientdash v{}*\n",
        env!("CARGO_PKG_VERSION")
    ));

    footer
}

/// Generate a JSON report.
pub fn generate_json_report(report: &DashboardReport) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::parse_persons;
    use crate::models::{SortDirection, StatusFilter};
    use crate::validation::check_records;
    use chrono::Utc;

    const FIXTURE: &str = include_str!("../../fixtures/clients.json");

    fn create_test_report(query: ClientListView, validate: bool) -> DashboardReport {
        let persons = parse_persons(FIXTURE).unwrap();
        let metadata = ReportMetadata {
            company_name: "Ficticia S.A.".to_string(),
            source: "fixtures/clients.json".to_string(),
            generated_at: Utc::now(),
            record_count: persons.len(),
        };
        let invalid = if validate {
            Some(check_records(&persons))
        } else {
            None
        };

        DashboardReport::build(metadata, &persons, &query, true, invalid)
    }

    #[test]
    fn test_generate_markdown_report() {
        let report = create_test_report(ClientListView::default(), false);
        let markdown = generate_markdown_report(&report, &RenderOptions::default());

        assert!(markdown.contains("# Ficticia S.A. Client Dashboard"));
        assert!(markdown.contains("## Metadata"));
        assert!(markdown.contains("## Summary"));
        assert!(markdown.contains("| Total Clients | **5** | Active in the system |"));
        assert!(markdown.contains("| Active | 4 | 80% |"));
        assert!(markdown.contains("| 51-60 | 1 |"));
        assert!(markdown.contains("| Diabetic | 1 | 4 |"));
        assert!(markdown.contains("María García López"));
        assert!(!markdown.contains("## Data Quality"));
    }

    #[test]
    fn test_clients_section_follows_query() {
        let query = ClientListView::new("garcía", StatusFilter::All, SortDirection::Desc);
        let report = create_test_report(query, false);
        let markdown = generate_markdown_report(&report, &RenderOptions::default());

        assert_eq!(report.clients.len(), 1);
        assert!(markdown.contains("*Search: \"garcía\" | Status: All | Order: id descending*"));
        assert!(markdown.contains("| 1 | María García López | 12345678-A | 34 | Female | Active | drives |"));
        assert!(!markdown.contains("Carlos Rodríguez Martín"));
    }

    #[test]
    fn test_empty_client_list() {
        let query = ClientListView::new("nobody", StatusFilter::All, SortDirection::Desc);
        let report = create_test_report(query, false);
        let markdown = generate_markdown_report(&report, &RenderOptions::default());

        assert!(markdown.contains("No clients match the current filters."));
    }

    #[test]
    fn test_quality_section() {
        let report = create_test_report(ClientListView::default(), true);
        let markdown = generate_markdown_report(&report, &RenderOptions::default());

        assert!(markdown.contains("- [Data Quality](#data-quality)"));
        assert!(markdown.contains("All records pass the client form rules."));
    }

    #[test]
    fn test_bar() {
        let options = RenderOptions {
            include_charts: true,
            bar_width: 10,
        };
        assert_eq!(bar(4, 4, &options).chars().count(), 10);
        assert_eq!(bar(1, 4, &options).chars().count(), 3);
        assert_eq!(bar(0, 4, &options), "");
        assert_eq!(bar(3, 0, &options), "");

        let no_charts = RenderOptions {
            include_charts: false,
            bar_width: 10,
        };
        assert_eq!(bar(4, 4, &no_charts), "");
    }

    #[test]
    fn test_bar_width_is_bounded() {
        let options = RenderOptions {
            include_charts: true,
            bar_width: usize::MAX,
        };
        assert_eq!(bar(3, 3, &options).chars().count(), MAX_BAR_WIDTH);
        assert_eq!(bar(usize::MAX, usize::MAX, &options).chars().count(), MAX_BAR_WIDTH);
    }

    #[test]
    fn test_cell_escaping() {
        assert_eq!(cell("a|b\nc"), "a\\|b c");
    }

    #[test]
    fn test_inline_escaping() {
        assert_eq!(inline("a*b_c"), "a\\*b\\_c");
        assert_eq!(inline("one\ntwo"), "one two");
        assert_eq!(inline("garcía"), "garcía");
    }

    #[test]
    fn test_search_term_cannot_break_query_line() {
        let query = ClientListView::new("*x*\n# y", StatusFilter::All, SortDirection::Desc);
        let report = create_test_report(query, false);
        let markdown = generate_markdown_report(&report, &RenderOptions::default());

        assert!(markdown.contains("*Search: \"\\*x\\* # y\" | Status: All | Order: id descending*"));
        assert!(!markdown.contains("\n# y"));
    }

    #[test]
    fn test_format_age() {
        assert_eq!(format_age(34.0), "34");
        assert_eq!(format_age(34.5), "34.5");
        assert_eq!(format_age(f64::NAN), "-");
    }

    #[test]
    fn test_generate_json_report() {
        let report = create_test_report(ClientListView::default(), true);
        let json = generate_json_report(&report).unwrap();

        assert!(json.contains("\"aggregations\""));
        assert!(json.contains("\"age_buckets\""));
        assert!(json.contains("\"fullName\""));
        assert!(json.contains("\"invalid_records\""));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["aggregations"]["total"], 5);
        assert_eq!(value["clients"][0]["id"], 5);
    }
}
