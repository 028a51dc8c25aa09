//! API error types

use std::time::Duration;

use serde::Deserialize;

/// Errors that can occur during API calls.
///
/// Every variant normalizes to a single human-readable string through
/// [`ApiError::message`]; callers show that string and nothing else.
/// No request is ever retried.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP error response from the API.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Normalized error message.
        message: String,
    },

    /// Network error during API call.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Request timed out.
    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse API response.
    #[error("Response parse error: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
        /// Raw response body, if available.
        body: Option<String>,
    },
}

/// Error body returned by the API, e.g. `{"message": "Cliente no encontrado"}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl ApiError {
    /// Creates a new HTTP error.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Builds an HTTP error from a failed response.
    ///
    /// Uses the body's `message` field when present and non-empty, else
    /// `"Error {status}: {reason}"`.
    pub fn from_response(status: u16, reason: &str, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("Error {}: {}", status, reason));
        Self::http(status, message)
    }

    /// Like [`from_response`](Self::from_response), but a plain-text body
    /// becomes the message before the status fallback is used.
    ///
    /// Report endpoints answer some validation failures with text such as
    /// `Formato inválido. Use 'PDF' o 'EXCEL'`.
    pub fn from_text_response(status: u16, reason: &str, body: &str) -> Self {
        let text = body.trim();
        if text.is_empty() || serde_json::from_str::<serde_json::Value>(text).is_ok() {
            return Self::from_response(status, reason, body);
        }
        Self::http(status, text)
    }

    /// Creates a new parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: None,
        }
    }

    /// Creates a new parse error with the raw response body.
    pub fn parse_with_body(message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: Some(body.into()),
        }
    }

    /// Returns the HTTP status code if this is an HTTP error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` for a 404 response.
    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }

    /// The normalized, human-readable message for this failure.
    pub fn message(&self) -> String {
        match self {
            Self::Http { message, .. } => message.clone(),
            Self::Network(e) => format!("Error: {}", e),
            Self::Timeout(after) => format!("Error: tiempo de espera agotado ({}s)", after.as_secs()),
            Self::InvalidUrl(url) => format!("Error: URL inválida {}", url),
            Self::Parse { message, .. } => format!("Error: respuesta inválida ({})", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_from_body() {
        let err = ApiError::from_response(404, "Not Found", r#"{"message":"Cliente no encontrado"}"#);
        assert_eq!(err.status_code(), Some(404));
        assert!(err.is_not_found());
        assert_eq!(err.message(), "Cliente no encontrado");
    }

    #[test]
    fn test_message_falls_back_to_status() {
        let err = ApiError::from_response(500, "Internal Server Error", "<html>oops</html>");
        assert_eq!(err.message(), "Error 500: Internal Server Error");

        let err = ApiError::from_response(400, "Bad Request", r#"{"message":"  "}"#);
        assert_eq!(err.message(), "Error 400: Bad Request");

        let err = ApiError::from_response(409, "Conflict", r#"{"error":"x"}"#);
        assert_eq!(err.message(), "Error 409: Conflict");
    }

    #[test]
    fn test_text_body_message() {
        let err = ApiError::from_text_response(400, "Bad Request", " Formato inválido. Use 'PDF' o 'EXCEL'\n");
        assert_eq!(err.message(), "Formato inválido. Use 'PDF' o 'EXCEL'");

        let err = ApiError::from_text_response(400, "Bad Request", r#"{"message":"Fechas inválidas"}"#);
        assert_eq!(err.message(), "Fechas inválidas");

        let err = ApiError::from_text_response(500, "Internal Server Error", r#"{"error":"x"}"#);
        assert_eq!(err.message(), "Error 500: Internal Server Error");

        let err = ApiError::from_text_response(502, "Bad Gateway", "   ");
        assert_eq!(err.message(), "Error 502: Bad Gateway");
    }

    #[test]
    fn test_timeout_message() {
        let err = ApiError::Timeout(Duration::from_secs(30));
        assert_eq!(err.message(), "Error: tiempo de espera agotado (30s)");
        assert_eq!(err.status_code(), None);
    }
}
