use std::path::PathBuf;

use crate::domain::Dataset;
use crate::error::Result;

/// Where a dataset is read from
pub trait DatasetSourcePort: Send + Sync {
    fn load(&self) -> Result<Dataset>;

    /// Human-readable location for logs and reports
    fn describe(&self) -> String;
}

/// Where a dataset is persisted
pub trait DatasetSinkPort: Send + Sync {
    /// Write the dataset, replacing anything already there. Returns the
    /// resolved location that was written.
    fn write(&self, dataset: &Dataset) -> Result<PathBuf>;
}
