//! Error types for the Portico client.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The HTTP response had a non-2xx status code.
    ///
    /// `message` carries the backend's `{"message": …}` failure reason
    /// when the body had one.
    #[error("API error {status}: {}", message.as_deref().unwrap_or("(no message)"))]
    Api { status: u16, message: Option<String> },

    /// An error from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The configured base URL was rejected.
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),

    /// A generic error string.
    #[error("{0}")]
    Other(String),
}

impl ClientError {
    /// Server-supplied failure reason, when one exists.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Api { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_displays_status_and_message() {
        let err = ClientError::Api { status: 403, message: Some("Not the owner".into()) };
        assert_eq!(err.to_string(), "API error 403: Not the owner");

        let err = ClientError::Api { status: 500, message: None };
        assert_eq!(err.to_string(), "API error 500: (no message)");
    }

    #[test]
    fn server_message_only_for_api_errors() {
        let err = ClientError::Api { status: 400, message: Some("nope".into()) };
        assert_eq!(err.server_message(), Some("nope"));

        let err = ClientError::InvalidUrl("empty".into());
        assert_eq!(err.server_message(), None);
    }
}
