pub mod csv_dataset;

pub use csv_dataset::{CsvDatasetReader, CsvDatasetWriter};
