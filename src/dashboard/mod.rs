//! Filtering and aggregation over the clean dataset, independent of how the
//! results are presented.

pub mod cache;
pub mod filter;
pub mod summary;
pub mod table;

pub use cache::DatasetCache;
pub use filter::{DashboardFilter, FilterParams};
pub use summary::DashboardSummary;
pub use table::{JobRow, JobTable};
