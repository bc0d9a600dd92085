//! Metrics for the cleaning pipeline and the dashboard
//!
//! Recording goes through the `metrics` facade. Without an installed recorder
//! (the batch cleaning run) every call is a no-op; the dashboard installs a
//! Prometheus recorder and serves the rendered text on `/metrics`.

use std::fmt;
use std::sync::OnceLock;
use tracing::info;

/// Enum representing all metric names used in the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    // Pipeline metrics
    PipelineRowsRead,
    PipelineRowsDropped,
    PipelineRowsWritten,
    PipelineRunsCompleted,

    // Dashboard metrics
    DashboardRequests,
    DashboardFilteredRows,
    DashboardDatasetLoads,
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::PipelineRowsRead => "job_market_pipeline_rows_read_total",
            MetricName::PipelineRowsDropped => "job_market_pipeline_rows_dropped_total",
            MetricName::PipelineRowsWritten => "job_market_pipeline_rows_written_total",
            MetricName::PipelineRunsCompleted => "job_market_pipeline_runs_completed_total",
            MetricName::DashboardRequests => "job_market_dashboard_requests_total",
            MetricName::DashboardFilteredRows => "job_market_dashboard_filtered_rows",
            MetricName::DashboardDatasetLoads => "job_market_dashboard_dataset_loads_total",
        }
    }

    pub fn all_metrics() -> impl Iterator<Item = MetricName> {
        [
            MetricName::PipelineRowsRead,
            MetricName::PipelineRowsDropped,
            MetricName::PipelineRowsWritten,
            MetricName::PipelineRunsCompleted,
            MetricName::DashboardRequests,
            MetricName::DashboardFilteredRows,
            MetricName::DashboardDatasetLoads,
        ]
        .into_iter()
    }
}

static PROMETHEUS_HANDLE: OnceLock<metrics_exporter_prometheus::PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder. Safe to call more than once; only the
/// first call installs.
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    if PROMETHEUS_HANDLE.get().is_some() {
        return Ok(());
    }
    let handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| format!("Failed to install Prometheus recorder: {}", e))?;
    let _ = PROMETHEUS_HANDLE.set(handle);
    info!("Metrics recorder installed");
    Ok(())
}

/// Prometheus text exposition of everything recorded so far
pub fn render() -> Option<String> {
    PROMETHEUS_HANDLE.get().map(|handle| handle.render())
}

pub mod pipeline {
    use super::MetricName;

    pub fn rows_read(count: usize) {
        ::metrics::counter!(MetricName::PipelineRowsRead.as_str()).increment(count as u64);
    }

    /// Rows removed by a filtering rule (`reason` is e.g. "salary_range")
    pub fn rows_dropped(reason: &'static str, count: usize) {
        ::metrics::counter!(MetricName::PipelineRowsDropped.as_str(), "reason" => reason)
            .increment(count as u64);
    }

    pub fn rows_written(count: usize) {
        ::metrics::counter!(MetricName::PipelineRowsWritten.as_str()).increment(count as u64);
        ::metrics::counter!(MetricName::PipelineRunsCompleted.as_str()).increment(1);
    }
}

pub mod dashboard {
    use super::MetricName;

    pub fn request(route: &'static str) {
        ::metrics::counter!(MetricName::DashboardRequests.as_str(), "route" => route).increment(1);
    }

    pub fn filtered_rows(count: usize) {
        ::metrics::histogram!(MetricName::DashboardFilteredRows.as_str()).record(count as f64);
    }

    pub fn dataset_loaded() {
        ::metrics::counter!(MetricName::DashboardDatasetLoads.as_str()).increment(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_names_are_unique_and_prefixed() {
        let names: Vec<&str> = MetricName::all_metrics().map(|m| m.as_str()).collect();
        let unique: std::collections::HashSet<&str> = names.iter().copied().collect();
        assert_eq!(names.len(), unique.len());
        assert!(names.iter().all(|n| n.starts_with("job_market_")));
    }

    #[test]
    fn test_recording_without_recorder_is_noop() {
        pipeline::rows_read(10);
        pipeline::rows_dropped("duplicate", 2);
        dashboard::request("index");
    }
}
