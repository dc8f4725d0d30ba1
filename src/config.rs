//! Configuration loader and validator for the job-listing fetcher.
//!
//! Every field has a default, so an absent or partial YAML file reproduces the
//! stock behaviour: Jobicy with `count=30&tag=remote`, Remotive with
//! `category=software-development&limit=50`, both written to the working
//! directory.
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const JOBICY_ENDPOINT: &str = "https://jobicy.com/api/v2/remote-jobs";
pub const REMOTIVE_ENDPOINT: &str = "https://remotive.com/api/remote-jobs";

/// Jobicy rejects page sizes outside this range.
pub const JOBICY_MAX_COUNT: u32 = 50;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(&'static str),
}

/// Root configuration struct mirroring the YAML schema.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub app: App,
    pub jobicy: Jobicy,
    pub remotive: Remotive,
}

/// Settings shared by every source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct App {
    pub output_dir: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            output_dir: ".".into(),
            timeout_secs: 30,
            user_agent: "remote-job-fetch/0.1".into(),
        }
    }
}

impl App {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Jobicy API settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Jobicy {
    pub enabled: bool,
    pub endpoint: String,
    pub count: u32,
    pub tag: Option<String>,
    pub output_file: String,
}

impl Default for Jobicy {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: JOBICY_ENDPOINT.into(),
            count: 30,
            tag: Some("remote".into()),
            output_file: "jobicy_jobs.json".into(),
        }
    }
}

/// Remotive API settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Remotive {
    pub enabled: bool,
    pub endpoint: String,
    pub category: Option<String>,
    pub limit: Option<u32>,
    pub output_file: String,
}

impl Default for Remotive {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: REMOTIVE_ENDPOINT.into(),
            category: Some("software-development".into()),
            limit: Some(50),
            output_file: "remotive_jobs.json".into(),
        }
    }
}

impl Config {
    /// Ensure the output directory exists.
    pub fn ensure_dirs(&self) -> Result<(), std::io::Error> {
        if self.app.output_dir.trim().is_empty() {
            return Ok(());
        }
        fs::create_dir_all(&self.app.output_dir)
    }

    pub fn output_dir(&self) -> PathBuf {
        let dir = self.app.output_dir.trim();
        if dir.is_empty() {
            PathBuf::from(".")
        } else {
            PathBuf::from(dir)
        }
    }
}

/// Load configuration from a YAML file and validate it.
pub fn load(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path)?;
    let cfg: Config = serde_yaml::from_str(&content)?;
    validate(&cfg)?;
    Ok(cfg)
}

/// Validate a configuration instance.
pub fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.app.timeout_secs == 0 {
        return Err(ConfigError::Invalid("app.timeout_secs must be > 0"));
    }
    if cfg.app.user_agent.trim().is_empty() {
        return Err(ConfigError::Invalid("app.user_agent must be non-empty"));
    }

    if Url::parse(&cfg.jobicy.endpoint).is_err() {
        return Err(ConfigError::Invalid("jobicy.endpoint must be a valid URL"));
    }
    if cfg.jobicy.count == 0 || cfg.jobicy.count > JOBICY_MAX_COUNT {
        return Err(ConfigError::Invalid("jobicy.count must be within 1..=50"));
    }
    if cfg.jobicy.output_file.trim().is_empty() {
        return Err(ConfigError::Invalid("jobicy.output_file must be non-empty"));
    }

    if Url::parse(&cfg.remotive.endpoint).is_err() {
        return Err(ConfigError::Invalid("remotive.endpoint must be a valid URL"));
    }
    if cfg.remotive.limit == Some(0) {
        return Err(ConfigError::Invalid("remotive.limit must be > 0"));
    }
    if cfg.remotive.output_file.trim().is_empty() {
        return Err(ConfigError::Invalid("remotive.output_file must be non-empty"));
    }

    Ok(())
}

/// Sample configuration with every key spelled out.
pub fn example() -> &'static str {
    r#"app:
  output_dir: "."
  timeout_secs: 30
  user_agent: "remote-job-fetch/0.1"

jobicy:
  enabled: true
  endpoint: "https://jobicy.com/api/v2/remote-jobs"
  # 1..=50
  count: 30
  tag: "remote"
  output_file: "jobicy_jobs.json"

remotive:
  enabled: true
  endpoint: "https://remotive.com/api/remote-jobs"
  category: "software-development"
  limit: 50
  output_file: "remotive_jobs.json"
"#
}
