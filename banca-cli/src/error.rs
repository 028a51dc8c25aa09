//! Console error type.

use banca_lib::error::ApiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("config error: {0}")]
    Config(String),

    #[error("invalid config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Lib(#[from] banca_lib::error::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A console command that could not be parsed or carried out.
    #[error("{0}")]
    Command(String),
}

impl CliError {
    pub fn command(message: impl Into<String>) -> Self {
        CliError::Command(message.into())
    }

    /// Text shown to the user.
    pub fn message(&self) -> String {
        match self {
            CliError::Api(e) => e.message(),
            CliError::Lib(e) => e.message(),
            other => other.to_string(),
        }
    }
}
