//! Client error types

use authstate_core::ProviderError;
use thiserror::Error;

/// Client error types
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or request error
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error status
    #[error("Server error {status}: {message}")]
    ServerError { status: u16, message: String },

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Bad request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Forbidden
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl ClientError {
    /// Create error from HTTP status code
    pub fn from_status(status: reqwest::StatusCode, message: String) -> Self {
        match status.as_u16() {
            400 => Self::BadRequest(message),
            401 => Self::AuthenticationFailed(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            _ => Self::ServerError {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// Whether the server rejected the session credentials
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::AuthenticationFailed(_) | Self::Forbidden(_))
    }

    /// Convert into a collaborator error, keeping transport failures distinct
    pub fn into_provider_error(self, wrap: impl FnOnce(String) -> ProviderError) -> ProviderError {
        match self {
            Self::Request(err) => ProviderError::transport(err.to_string()),
            other => wrap(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_from_status() {
        assert!(matches!(
            ClientError::from_status(StatusCode::UNAUTHORIZED, "bad jwt".into()),
            ClientError::AuthenticationFailed(_)
        ));
        assert!(matches!(
            ClientError::from_status(StatusCode::NOT_FOUND, "missing".into()),
            ClientError::NotFound(_)
        ));
        assert!(matches!(
            ClientError::from_status(StatusCode::BAD_GATEWAY, "upstream".into()),
            ClientError::ServerError { status: 502, .. }
        ));
    }

    #[test]
    fn test_unauthorized_statuses() {
        assert!(ClientError::from_status(StatusCode::UNAUTHORIZED, String::new()).is_unauthorized());
        assert!(ClientError::from_status(StatusCode::FORBIDDEN, String::new()).is_unauthorized());
        assert!(!ClientError::from_status(StatusCode::INTERNAL_SERVER_ERROR, String::new()).is_unauthorized());
    }

    #[test]
    fn test_into_provider_error() {
        let err = ClientError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "boom".into())
            .into_provider_error(|message| ProviderError::profile(message));
        assert!(matches!(err, ProviderError::Profile { .. }));
        assert!(err.to_string().contains("boom"));
    }
}
