//! Backend client error types.

use conforma_core::ValidationError;

/// Errors from backend calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// Backend returned a non-2xx status.
    #[error("{endpoint} returned {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },
    /// Request rejected locally before it was sent.
    #[error("invalid request: {0}")]
    Validation(#[from] ValidationError),
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),
}

impl ApiError {
    /// HTTP status returned by the backend, if the call got that far.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_display_includes_body() {
        let err = ApiError::Status {
            endpoint: "GET /projetos/1".into(),
            status: 500,
            body: "Erro interno".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("GET /projetos/1"));
        assert!(msg.contains("500"));
        assert!(msg.contains("Erro interno"));
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn validation_error_converts() {
        let err: ApiError = ValidationError::MissingLawSource.into();
        assert!(err.to_string().contains("document or a link"));
        assert_eq!(err.status(), None);
    }
}
