use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use tracing::info;

use super::table::JobTable;
use crate::app::ports::DatasetSourcePort;
use crate::error::Result;
use crate::infra::CsvDatasetReader;
use crate::observability::metrics;

/// Holds the clean dataset for the lifetime of the dashboard process.
/// The file is read on first use and again only after `invalidate`.
pub struct DatasetCache {
    reader: CsvDatasetReader,
    current: RwLock<Option<Arc<JobTable>>>,
}

impl DatasetCache {
    pub fn new(path: impl Into<PathBuf>, delimiter: u8) -> Self {
        Self {
            reader: CsvDatasetReader::new(path).with_delimiter(delimiter),
            current: RwLock::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        self.reader.path()
    }

    pub fn get(&self) -> Result<Arc<JobTable>> {
        if let Some(table) = self
            .current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .as_ref()
        {
            return Ok(Arc::clone(table));
        }

        let mut slot = self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        // Another request may have loaded it while we waited for the lock
        if let Some(table) = slot.as_ref() {
            return Ok(Arc::clone(table));
        }

        let table = Arc::new(JobTable::from_dataset(self.reader.load()?));
        metrics::dashboard::dataset_loaded();
        info!(
            "Loaded {} clean rows from {}",
            table.len(),
            self.reader.describe()
        );
        *slot = Some(Arc::clone(&table));
        Ok(table)
    }

    /// Drop the cached table so the next `get` re-reads the file
    pub fn invalidate(&self) {
        *self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
        info!("Dataset cache invalidated");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::JobMarketError;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_loads_once_until_invalidated() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("clean.csv");
        fs::write(&path, "industry,salary_usd\nTech,90000\n").unwrap();
        let cache = DatasetCache::new(&path, b',');

        let first = cache.get().unwrap();
        fs::write(&path, "industry,salary_usd\nTech,90000\nRetail,60000\n").unwrap();
        let second = cache.get().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.len(), 1);

        cache.invalidate();
        assert_eq!(cache.get().unwrap().len(), 2);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        let cache = DatasetCache::new(dir.path().join("absent.csv"), b',');
        assert!(matches!(
            cache.get().unwrap_err(),
            JobMarketError::InputUnreadable { .. }
        ));
    }
}
