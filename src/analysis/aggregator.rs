//! Dashboard aggregation and statistics.
//!
//! This module turns a snapshot of person records into the numbers the
//! dashboard shows: counts, percentages, the age histogram and the
//! per-condition yes/no split.

use crate::models::Person;
use serde::{Deserialize, Serialize};

/// Labels of the age histogram, in display order.
pub const AGE_BUCKET_LABELS: [&str; 4] = ["18-30", "31-40", "41-50", "51-60"];

/// One bar of the age histogram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeBucket {
    pub label: String,
    pub value: usize,
}

/// Summary statistics over a person snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aggregations {
    /// Number of records.
    pub total: usize,
    /// Records with `active == true`.
    pub active: usize,
    /// `total - active`.
    pub inactive: usize,
    pub drivers: usize,
    pub glasses: usize,
    pub diabetics: usize,
    /// Records with a non-empty "other disease".
    pub other_diseases: usize,
    /// Age histogram, always four buckets in `AGE_BUCKET_LABELS` order.
    pub age_buckets: Vec<AgeBucket>,
}

impl Default for Aggregations {
    fn default() -> Self {
        Self {
            total: 0,
            active: 0,
            inactive: 0,
            drivers: 0,
            glasses: 0,
            diabetics: 0,
            other_diseases: 0,
            age_buckets: empty_age_buckets(),
        }
    }
}

fn empty_age_buckets() -> Vec<AgeBucket> {
    AGE_BUCKET_LABELS
        .iter()
        .map(|label| AgeBucket {
            label: label.to_string(),
            value: 0,
        })
        .collect()
}

/// Index of the age bucket for `age`, or `None` when the age is not finite.
///
/// Ages under 18 fall into the first bucket and everything above 50 into
/// the last one.
pub fn age_bucket_index(age: f64) -> Option<usize> {
    if !age.is_finite() {
        return None;
    }

    let index = if age <= 30.0 {
        0
    } else if age <= 40.0 {
        1
    } else if age <= 50.0 {
        2
    } else {
        3
    };

    Some(index)
}

/// Compute every dashboard statistic from the full snapshot.
pub fn compute_aggregations(persons: &[Person]) -> Aggregations {
    let mut aggregations = Aggregations {
        total: persons.len(),
        ..Aggregations::default()
    };

    for person in persons {
        if person.active {
            aggregations.active += 1;
        }
        if person.drives {
            aggregations.drivers += 1;
        }
        if person.wears_glasses {
            aggregations.glasses += 1;
        }
        if person.diabetic {
            aggregations.diabetics += 1;
        }
        if person.has_other_disease() {
            aggregations.other_diseases += 1;
        }

        if let Some(index) = age_bucket_index(person.age) {
            aggregations.age_buckets[index].value += 1;
        }
    }

    aggregations.inactive = aggregations.total.saturating_sub(aggregations.active);

    aggregations
}

/// Share of `value` in `total` as a whole percentage, `0` for an empty total.
pub fn percentage(value: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }

    // x.5 rounds up; both operands are non-negative so `round` agrees.
    ((value as f64 / total as f64) * 100.0).round() as u32
}

/// Slice of the health factors pie chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthFactor {
    pub key: String,
    pub label: String,
    pub value: usize,
}

/// Bar of the active/inactive chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusBucket {
    pub key: String,
    pub label: String,
    pub value: usize,
}

/// Yes/no split for one condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionComparison {
    pub key: String,
    pub label: String,
    pub yes: usize,
    pub no: usize,
}

/// Card shown at the top of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardMetric {
    pub id: String,
    pub label: String,
    pub value: usize,
    pub subtitle: String,
}

fn conditions(aggregations: &Aggregations) -> [(&'static str, &'static str, usize); 4] {
    [
        ("drives", "Drives", aggregations.drivers),
        ("wearsGlasses", "Wears glasses", aggregations.glasses),
        ("diabetic", "Diabetic", aggregations.diabetics),
        ("otherDisease", "Other disease", aggregations.other_diseases),
    ]
}

/// Raw counts for the health factors chart.
pub fn health_factor_breakdown(aggregations: &Aggregations) -> Vec<HealthFactor> {
    conditions(aggregations)
        .into_iter()
        .map(|(key, label, value)| HealthFactor {
            key: key.to_string(),
            label: label.to_string(),
            value,
        })
        .collect()
}

/// Active vs inactive counts.
pub fn status_breakdown(aggregations: &Aggregations) -> Vec<StatusBucket> {
    vec![
        StatusBucket {
            key: "active".to_string(),
            label: "Active".to_string(),
            value: aggregations.active,
        },
        StatusBucket {
            key: "inactive".to_string(),
            label: "Inactive".to_string(),
            value: aggregations.inactive,
        },
    ]
}

/// Yes/no split per condition; `no` never goes below zero.
pub fn condition_comparison(aggregations: &Aggregations) -> Vec<ConditionComparison> {
    conditions(aggregations)
        .into_iter()
        .map(|(key, label, yes)| ConditionComparison {
            key: key.to_string(),
            label: label.to_string(),
            yes,
            no: aggregations.total.saturating_sub(yes),
        })
        .collect()
}

/// Summary cards: total clients plus drivers, glasses and diabetics.
pub fn dashboard_metrics(aggregations: &Aggregations) -> Vec<DashboardMetric> {
    let total = aggregations.total;
    let share = |value: usize| format!("{}% of clients", percentage(value, total));

    vec![
        DashboardMetric {
            id: "total".to_string(),
            label: "Total Clients".to_string(),
            value: total,
            subtitle: "Active in the system".to_string(),
        },
        DashboardMetric {
            id: "drivers".to_string(),
            label: "Drivers".to_string(),
            value: aggregations.drivers,
            subtitle: share(aggregations.drivers),
        },
        DashboardMetric {
            id: "glasses".to_string(),
            label: "Wear Glasses".to_string(),
            value: aggregations.glasses,
            subtitle: share(aggregations.glasses),
        },
        DashboardMetric {
            id: "diabetes".to_string(),
            label: "Diabetics".to_string(),
            value: aggregations.diabetics,
            subtitle: share(aggregations.diabetics),
        },
    ]
}

/// Generate a text summary of the dashboard statistics.
pub fn generate_summary_text(aggregations: &Aggregations) -> String {
    let total = aggregations.total;
    let mut lines = Vec::new();

    lines.push(format!("Total clients: {}", total));
    lines.push(format!(
        "- Active: {} ({}%)",
        aggregations.active,
        percentage(aggregations.active, total)
    ));
    lines.push(format!(
        "- Inactive: {} ({}%)",
        aggregations.inactive,
        percentage(aggregations.inactive, total)
    ));

    for (_, label, value) in conditions(aggregations) {
        lines.push(format!(
            "- {}: {} ({}%)",
            label,
            value,
            percentage(value, total)
        ));
    }

    lines.join("\n")
}
