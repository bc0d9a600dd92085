use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::app::ports::{DatasetSinkPort, DatasetSourcePort};
use crate::domain::{Cell, Dataset};
use crate::error::{JobMarketError, Result};

/// Reads a delimited file with a header row into a `Dataset`.
/// Every non-empty field becomes text; typing happens in the pipeline.
pub struct CsvDatasetReader {
    path: PathBuf,
    delimiter: u8,
}

impl CsvDatasetReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            delimiter: b',',
        }
    }

    /// Set custom delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse delimited content from any reader
    pub fn parse<R: Read>(&self, input: R) -> std::result::Result<Dataset, csv::Error> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .flexible(true) // Allow rows with different lengths
            .from_reader(input);

        let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let mut dataset = Dataset::new(columns);

        for record in reader.records() {
            let record = record?;
            dataset.push_row(record.iter().map(Cell::from_raw).collect());
        }

        Ok(dataset)
    }
}

impl DatasetSourcePort for CsvDatasetReader {
    fn load(&self) -> Result<Dataset> {
        let file = fs::File::open(&self.path).map_err(|e| JobMarketError::input(&self.path, e))?;
        let dataset = self
            .parse(file)
            .map_err(|e| JobMarketError::input(&self.path, e))?;
        debug!(
            "Parsed {} columns x {} rows from {}",
            dataset.columns().len(),
            dataset.len(),
            self.path.display()
        );
        Ok(dataset)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Writes a `Dataset` as a delimited file with a header row, creating parent
/// directories and truncating any previous file.
pub struct CsvDatasetWriter {
    path: PathBuf,
    delimiter: u8,
}

impl CsvDatasetWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            delimiter: b',',
        }
    }

    /// Set custom delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    fn write_inner(&self, dataset: &Dataset) -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut writer = WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_path(&self.path)?;
        writer.write_record(dataset.columns())?;
        for row in dataset.rows() {
            writer.write_record(row.iter().map(Cell::render))?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl DatasetSinkPort for CsvDatasetWriter {
    fn write(&self, dataset: &Dataset) -> Result<PathBuf> {
        self.write_inner(dataset)
            .map_err(|e| JobMarketError::output(&self.path, e))?;
        let resolved = fs::canonicalize(&self.path).unwrap_or_else(|_| self.path.clone());
        info!("Clean dataset persisted to {}", resolved.display());
        Ok(resolved)
    }
}
