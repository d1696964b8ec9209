//! Common error types shared across crates

use thiserror::Error;

/// Errors raised by a [`crate::session::SessionStore`] backend
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    /// The backing store could not be read or written
    #[error("Session storage failed: {0}")]
    Storage(String),

    /// A stored entry could not be decoded
    #[error("Corrupt session entry: {0}")]
    Corrupt(String),
}

impl SessionError {
    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }
}

impl From<serde_json::Error> for SessionError {
    fn from(err: serde_json::Error) -> Self {
        Self::Corrupt(err.to_string())
    }
}
