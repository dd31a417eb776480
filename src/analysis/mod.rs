//! Analysis modules.
//!
//! Pure transformations over a person snapshot: dashboard aggregation and
//! the client list filter.

pub mod aggregator;
pub mod filter;

pub use aggregator::*;
pub use filter::{filter_and_sort, normalize_text};
