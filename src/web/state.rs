use std::sync::Arc;

use crate::config::DashboardConfig;
use crate::dashboard::DatasetCache;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<DatasetCache>,
    pub config: Arc<DashboardConfig>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        let cache = DatasetCache::new(config.data_path.clone(), config.delimiter_byte());
        Self {
            cache: Arc::new(cache),
            config: Arc::new(config),
        }
    }
}
