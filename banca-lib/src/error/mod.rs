//! Error types

mod api;

pub use api::*;

/// Errors raised by this crate outside of a single API call.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A remote call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A downloaded file carried invalid base64 content.
    #[error("Invalid file content: {0}")]
    Decode(#[from] base64::DecodeError),

    /// Writing a downloaded file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// A human-readable message suitable for showing to the user.
    pub fn message(&self) -> String {
        match self {
            Error::Api(e) => e.message(),
            other => other.to_string(),
        }
    }
}
