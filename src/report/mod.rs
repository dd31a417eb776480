//! Report model and rendering.

pub mod generator;

pub use generator::{generate_json_report, generate_markdown_report};

use crate::analysis::{
    compute_aggregations, condition_comparison, dashboard_metrics, health_factor_breakdown,
    status_breakdown, AgeBucket, Aggregations, ConditionComparison, DashboardMetric, HealthFactor,
    StatusBucket,
};
use crate::models::Person;
use crate::validation::InvalidRecord;
use crate::view::ClientListView;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Metadata about the report.
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    /// Company the report is produced for.
    pub company_name: String,
    /// Snapshot file the records were read from.
    pub source: String,
    /// Date and time the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Number of records in the snapshot.
    pub record_count: usize,
}

/// Dashboard statistics plus the client list for one snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub metadata: ReportMetadata,
    pub aggregations: Aggregations,
    pub metrics: Vec<DashboardMetric>,
    pub health_factors: Vec<HealthFactor>,
    pub status: Vec<StatusBucket>,
    pub age_distribution: Vec<AgeBucket>,
    pub condition_comparison: Vec<ConditionComparison>,
    /// Query the client list was produced with.
    pub query: ClientListView,
    /// Filtered and sorted clients; empty when the list is left out.
    pub clients: Vec<Person>,
    /// Data-quality findings; `None` when validation did not run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invalid_records: Option<Vec<InvalidRecord>>,
}

impl DashboardReport {
    /// Compute every section of the report from the snapshot.
    pub fn build(
        metadata: ReportMetadata,
        persons: &[Person],
        query: &ClientListView,
        include_clients: bool,
        invalid_records: Option<Vec<InvalidRecord>>,
    ) -> Self {
        let aggregations = compute_aggregations(persons);
        let clients = if include_clients {
            query.visible(persons)
        } else {
            Vec::new()
        };

        Self {
            metadata,
            metrics: dashboard_metrics(&aggregations),
            health_factors: health_factor_breakdown(&aggregations),
            status: status_breakdown(&aggregations),
            age_distribution: aggregations.age_buckets.clone(),
            condition_comparison: condition_comparison(&aggregations),
            aggregations,
            query: query.clone(),
            clients,
            invalid_records,
        }
    }
}
