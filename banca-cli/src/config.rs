//! Console settings.
//!
//! Settings come from `config.toml` in the platform config directory (see
//! [`paths::config_file`](crate::paths::config_file)). Any field may be
//! left out; command-line flags and environment variables override the
//! file through [`Overrides`].

use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use log::LevelFilter;
use serde::Deserialize;
use serde::Serialize;

use crate::error::CliError;
use crate::paths;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Backend base URL, without the `/api` prefix.
    pub api_url: String,
    pub timeout_secs: u64,
    /// Initial page size for every table.
    pub page_size: usize,
    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`.
    pub log_level: String,
    /// Where downloaded reports are written.
    pub download_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            page_size: DEFAULT_PAGE_SIZE,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            download_dir: None,
        }
    }
}

/// Values given on the command line, each replacing the file's value.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub page_size: Option<usize>,
    pub log_level: Option<String>,
    pub download_dir: Option<PathBuf>,
}

impl Settings {
    /// Load settings from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        match fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No config file at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn parse(contents: &str) -> Result<Self, CliError> {
        Ok(toml::from_str(contents)?)
    }

    /// Apply command-line overrides and validate the result.
    pub fn merge(mut self, overrides: Overrides) -> Result<Self, CliError> {
        if let Some(url) = overrides.api_url {
            self.api_url = url;
        }
        if let Some(secs) = overrides.timeout_secs {
            self.timeout_secs = secs;
        }
        if let Some(size) = overrides.page_size {
            self.page_size = size;
        }
        if let Some(level) = overrides.log_level {
            self.log_level = level;
        }
        if let Some(dir) = overrides.download_dir {
            self.download_dir = Some(dir);
        }

        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), CliError> {
        if self.api_url.trim().is_empty() {
            return Err(CliError::Config("api_url must not be empty".to_string()));
        }
        if self.page_size == 0 {
            return Err(CliError::Config("page_size must be at least 1".to_string()));
        }
        self.log_level()?;
        Ok(())
    }

    pub fn log_level(&self) -> Result<LevelFilter, CliError> {
        LevelFilter::from_str(self.log_level.trim())
            .map_err(|_| CliError::Config(format!("unknown log level: {}", self.log_level)))
    }

    /// Request timeout. Zero disables it.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    /// Configured download directory, else the platform default, else the
    /// working directory.
    pub fn download_dir(&self) -> PathBuf {
        self.download_dir
            .clone()
            .or_else(paths::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
