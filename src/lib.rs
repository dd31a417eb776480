//! clientdash - dashboard statistics and client lists from person records.
//!
//! The core is two pure transformations over a snapshot of person records:
//! [`analysis::compute_aggregations`] for the dashboard and
//! [`analysis::filter_and_sort`] for the client list. Around them sit the
//! client form validation rules, snapshot loading and report rendering used
//! by the `clientdash` binary.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod loader;
pub mod models;
pub mod report;
pub mod validation;
pub mod view;

pub use analysis::{compute_aggregations, filter_and_sort, percentage, Aggregations};
pub use models::{Person, RecordId, SortDirection, StatusFilter};
pub use view::ClientListView;
