// Domain data shapes shared by the pipeline and the dashboard

pub mod cell;
pub mod dataset;

pub use cell::Cell;
pub use dataset::Dataset;
