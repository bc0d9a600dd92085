use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

use crate::app::ports::{DatasetSinkPort, DatasetSourcePort};
use crate::domain::Dataset;
use crate::error::Result;
use crate::observability::metrics;
use crate::pipeline::{CleaningPipeline, StepReport};

/// Summary of one cleaning run
#[derive(Debug, Clone, Serialize)]
pub struct CleanReport {
    pub source: String,
    pub rows_read: usize,
    pub rows_written: usize,
    /// Resolved output location; `None` for a dry run
    pub output_path: Option<PathBuf>,
    pub steps: Vec<StepReport>,
}

impl CleanReport {
    /// Ranked top skills as recorded by the indicator step
    pub fn top_skills(&self) -> Vec<&str> {
        self.steps
            .iter()
            .filter(|s| s.step == "skill_indicators")
            .flat_map(|s| s.result.metadata.iter())
            .map(|(_, v)| v.as_str())
            .collect()
    }
}

/// Use case for turning the raw dataset into the clean artifact
pub struct CleanUseCase {
    source: Box<dyn DatasetSourcePort>,
    sink: Box<dyn DatasetSinkPort>,
    pipeline: CleaningPipeline,
}

impl CleanUseCase {
    pub fn new(
        source: Box<dyn DatasetSourcePort>,
        sink: Box<dyn DatasetSinkPort>,
        pipeline: CleaningPipeline,
    ) -> Self {
        Self {
            source,
            sink,
            pipeline,
        }
    }

    /// Load and clean without persisting
    pub fn clean(&self) -> Result<(Dataset, CleanReport)> {
        let mut dataset = self.source.load()?;
        let rows_read = dataset.len();
        metrics::pipeline::rows_read(rows_read);
        info!("Loaded {} rows from {}", rows_read, self.source.describe());

        let steps = self.pipeline.run(&mut dataset);
        let report = CleanReport {
            source: self.source.describe(),
            rows_read,
            rows_written: 0,
            output_path: None,
            steps,
        };
        Ok((dataset, report))
    }

    /// Load, clean, and persist
    pub fn run(&self) -> Result<CleanReport> {
        let (dataset, mut report) = self.clean()?;

        let output_path = self.sink.write(&dataset)?;
        metrics::pipeline::rows_written(dataset.len());
        info!("Wrote {} rows to {}", dataset.len(), output_path.display());

        report.rows_written = dataset.len();
        report.output_path = Some(output_path);
        Ok(report)
    }
}
