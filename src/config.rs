use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::constants;
use crate::error::{JobMarketError, Result};

/// Environment variable naming an alternate config file
pub const CONFIG_ENV: &str = "JOB_MARKET_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub pipeline: PipelineConfig,
    pub dashboard: DashboardConfig,
}

/// Settings for the cleaning run
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    /// Single-byte field delimiter for both input and output
    pub delimiter: char,
    pub salary_min: f64,
    pub salary_max: f64,
    pub top_skill_count: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(constants::RAW_DATASET_PATH),
            output_path: PathBuf::from(constants::CLEAN_DATASET_PATH),
            delimiter: ',',
            salary_min: constants::SALARY_MIN,
            salary_max: constants::SALARY_MAX,
            top_skill_count: constants::TOP_SKILL_COUNT,
        }
    }
}

impl PipelineConfig {
    /// Delimiter as the byte the csv reader and writer expect; checked by `validate`
    pub fn delimiter_byte(&self) -> u8 {
        self.delimiter as u8
    }
}

/// Settings for the dashboard session
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub host: String,
    pub port: u16,
    pub delimiter: char,
    pub default_industry_count: usize,
    pub salary_floor: f64,
    pub salary_ceiling: f64,
    pub default_salary_min: f64,
    pub default_salary_max: f64,
    pub salary_step: f64,
    pub sample_size: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(constants::CLEAN_DATASET_PATH),
            host: "127.0.0.1".to_string(),
            port: 8501,
            delimiter: ',',
            default_industry_count: 5,
            salary_floor: 30_000.0,
            salary_ceiling: 250_000.0,
            default_salary_min: 50_000.0,
            default_salary_max: 200_000.0,
            salary_step: 5_000.0,
            sample_size: 10,
        }
    }
}

impl DashboardConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Delimiter as the byte the csv reader expects; checked by `validate`
    pub fn delimiter_byte(&self) -> u8 {
        self.delimiter as u8
    }
}

impl Config {
    /// Load configuration from an explicit path, `JOB_MARKET_CONFIG`, or
    /// `config.toml` in the working directory. Falls back to defaults when no
    /// file is found; a file that exists but fails to parse is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let candidate = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => env::var(CONFIG_ENV)
                .ok()
                .map(PathBuf::from)
                .or_else(|| {
                    let default = PathBuf::from(DEFAULT_CONFIG_PATH);
                    default.exists().then_some(default)
                }),
        };

        let mut config = match candidate {
            Some(path) => {
                let content = fs::read_to_string(&path).map_err(|e| {
                    JobMarketError::Config(format!(
                        "Failed to read config file '{}': {}",
                        path.display(),
                        e
                    ))
                })?;
                info!("Loaded configuration from {}", path.display());
                Self::from_toml_str(&content)?
            }
            None => {
                debug!("No config file found, using defaults");
                Self::default()
            }
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(host) = env::var("DASHBOARD_HOST") {
            self.dashboard.host = host;
        }
        if let Some(port) = env::var("DASHBOARD_PORT").ok().and_then(|s| s.parse().ok()) {
            self.dashboard.port = port;
        }
    }

    pub fn validate(&self) -> Result<()> {
        let p = &self.pipeline;
        if !p.delimiter.is_ascii() || !self.dashboard.delimiter.is_ascii() {
            return Err(JobMarketError::Config(
                "delimiter must be a single ASCII character".to_string(),
            ));
        }
        if p.salary_min > p.salary_max {
            return Err(JobMarketError::Config(format!(
                "salary_min ({}) exceeds salary_max ({})",
                p.salary_min, p.salary_max
            )));
        }
        let d = &self.dashboard;
        if d.salary_floor > d.salary_ceiling {
            return Err(JobMarketError::Config(format!(
                "salary_floor ({}) exceeds salary_ceiling ({})",
                d.salary_floor, d.salary_ceiling
            )));
        }
        Ok(())
    }
}
