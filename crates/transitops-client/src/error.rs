//! Error types for the console's REST client

use thiserror::Error;
use transitops_core::{OpsError, OpsErrorKind};

/// REST client error
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Server returned a non-2xx response
    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },

    /// Record not found (HTTP 404); distinct from an error at call sites
    /// that map it to `None`
    #[error("Not found: {0}")]
    NotFound(String),

    /// A save was attempted on an indeterminate comparison
    #[error("Comparison indeterminate: {0}")]
    Indeterminate(String),
}

impl ClientError {
    /// The display string surfaced to the user; no failure here is
    /// retried or escalated, it is shown and logged.
    pub fn display_message(&self) -> String {
        match self {
            ClientError::Server { status, message } if !message.is_empty() => {
                format!("Server error {}: {}", status, message)
            }
            ClientError::Server { status, .. } => format!("Server error {}", status),
            other => other.to_string(),
        }
    }
}

impl From<&ClientError> for OpsError {
    fn from(err: &ClientError) -> Self {
        match err {
            ClientError::Http(e) => {
                let kind = if e.is_timeout() {
                    OpsErrorKind::Timeout
                } else {
                    OpsErrorKind::ExternalService
                };
                OpsError::new(kind).with_message(e.to_string())
            }
            ClientError::Json(e) => {
                OpsError::new(OpsErrorKind::Serialization).with_message(e.to_string())
            }
            ClientError::Server { status, message } => {
                let kind = match status {
                    401 => OpsErrorKind::Unauthorised,
                    403 => OpsErrorKind::Forbidden,
                    _ => OpsErrorKind::ExternalService,
                };
                OpsError::new(kind)
                    .with_status(*status)
                    .with_message(message.clone())
            }
            ClientError::NotFound(what) => OpsError::new(OpsErrorKind::NotFound)
                .with_message(format!("Not found: {}", what)),
            ClientError::Indeterminate(message) => {
                OpsError::new(OpsErrorKind::IndeterminateComparison)
                    .with_message(message.clone())
            }
        }
    }
}

impl From<ClientError> for OpsError {
    fn from(err: ClientError) -> Self {
        OpsError::from(&err)
    }
}

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;
