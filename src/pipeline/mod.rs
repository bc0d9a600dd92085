// Cleaning pipeline: column-wise transformations over the in-memory dataset

pub mod categorical;
pub mod dedup;
pub mod ordinal;
pub mod salary;
pub mod schema;
pub mod skills;

use serde::Serialize;
use tracing::{debug, info};

use crate::config::PipelineConfig;
use crate::domain::Dataset;

/// Common trait for all cleaning steps.
///
/// A step is a total function over the dataset: it never fails, and it must
/// leave the dataset untouched when the columns it needs are absent.
pub trait CleaningStep: Send + Sync {
    /// Transform the dataset in place
    fn apply(&self, dataset: &mut Dataset) -> StepResult;

    /// Get the name of this step
    fn step_name(&self) -> &'static str;
}

/// Outcome of one step
#[derive(Debug, Clone, Default, Serialize)]
pub struct StepResult {
    pub message: String,
    /// Ordered key/value details (e.g. ranked skills)
    pub metadata: Vec<(String, String)>,
}

impl StepResult {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            metadata: Vec::new(),
        }
    }

    /// The step did nothing because its input column is absent
    pub fn skipped(column: &str) -> Self {
        Self::new(format!("column '{}' not present, skipped", column))
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.push((key.into(), value.into()));
        self
    }
}

/// Row accounting for one executed step
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub step: &'static str,
    pub rows_before: usize,
    pub rows_after: usize,
    pub result: StepResult,
}

impl StepReport {
    pub fn rows_dropped(&self) -> usize {
        self.rows_before.saturating_sub(self.rows_after)
    }
}

/// An ordered sequence of cleaning steps
pub struct CleaningPipeline {
    steps: Vec<Box<dyn CleaningStep>>,
}

impl CleaningPipeline {
    pub fn new(steps: Vec<Box<dyn CleaningStep>>) -> Self {
        Self { steps }
    }

    /// The standard job-market cleaning sequence
    pub fn standard(config: &PipelineConfig) -> Self {
        Self::new(vec![
            Box::new(schema::NormalizeColumnsStep),
            Box::new(schema::TrimStringsStep),
            Box::new(salary::SalaryFilterStep::new(config.salary_min, config.salary_max)),
            Box::new(categorical::CategoricalStep::standard()),
            Box::new(categorical::LocationFormatStep),
            Box::new(skills::SkillListStep),
            Box::new(skills::SkillIndicatorStep::new(config.top_skill_count)),
            Box::new(ordinal::OrdinalScoreStep::standard()),
            Box::new(salary::SalaryBandStep),
            Box::new(dedup::DeduplicateStep),
        ])
    }

    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|s| s.step_name()).collect()
    }

    /// Run every step in order over the dataset.
    pub fn run(&self, dataset: &mut Dataset) -> Vec<StepReport> {
        let mut reports = Vec::with_capacity(self.steps.len());

        for step in &self.steps {
            let span = tracing::info_span!("cleaning_step", step = step.step_name());
            let _enter = span.enter();

            let rows_before = dataset.len();
            let result = step.apply(dataset);
            let report = StepReport {
                step: step.step_name(),
                rows_before,
                rows_after: dataset.len(),
                result,
            };

            info!(
                rows_before = report.rows_before,
                rows_after = report.rows_after,
                "{}",
                report.result.message
            );
            for (key, value) in &report.result.metadata {
                debug!("{} = {}", key, value);
            }
            reports.push(report);
        }

        reports
    }
}
