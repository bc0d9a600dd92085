use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JobMarketError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Cannot read input dataset '{}': {source}", path.display())]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Cannot write output dataset '{}': {source}", path.display())]
    OutputUnwritable {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Template rendering failed: {0}")]
    Template(#[from] askama::Error),
}

impl JobMarketError {
    pub fn input(path: impl Into<PathBuf>, source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        JobMarketError::InputUnreadable {
            path: path.into(),
            source: source.into(),
        }
    }

    pub fn output(path: impl Into<PathBuf>, source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        JobMarketError::OutputUnwritable {
            path: path.into(),
            source: source.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, JobMarketError>;
