//! Client error types

use campus_core::SessionError;
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

    /// Session store failure
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Token refresh failed; the session has been torn down
    #[error(transparent)]
    Refresh(#[from] RefreshError),
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

    /// Whether this error means the session is no longer usable
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::AuthenticationFailed(_) | Self::Refresh(_))
    }
}

/// Why a token refresh attempt failed. Cloneable because one outcome fans
/// out to every request queued behind the refresh.
#[derive(Debug, Clone, Error)]
pub enum RefreshError {
    /// No refresh token in the session store; teardown without a network call
    #[error("No refresh token available")]
    MissingRefreshToken,

    /// The refresh endpoint rejected the refresh token
    #[error("Token refresh rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The refresh call never produced a usable response
    #[error("Token refresh failed: {0}")]
    Transport(String),

    /// The session store failed while reading or writing tokens
    #[error("Session store failed during refresh: {0}")]
    Store(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_matches_taxonomy() {
        use reqwest::StatusCode;
        assert!(matches!(
            ClientError::from_status(StatusCode::BAD_REQUEST, "x".into()),
            ClientError::BadRequest(_)
        ));
        assert!(matches!(
            ClientError::from_status(StatusCode::UNAUTHORIZED, "x".into()),
            ClientError::AuthenticationFailed(_)
        ));
        assert!(matches!(
            ClientError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "x".into()),
            ClientError::ServerError { status: 500, .. }
        ));
    }

    #[test]
    fn refresh_errors_count_as_expired() {
        let error = ClientError::Refresh(RefreshError::MissingRefreshToken);
        assert!(error.is_auth_expired());
        assert!(!ClientError::Configuration("x".into()).is_auth_expired());
    }
}
