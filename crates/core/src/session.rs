//! Session credential storage
//!
//! The client keeps its bearer credentials in a [`SessionStore`]: an access
//! token, the refresh token used to mint new access tokens, the logged-in
//! user's profile, and a session-expired marker that outlives the
//! credentials so other contexts sharing the store can observe a forced
//! logout and clear their own caches.

use crate::error::SessionError;
use crate::types::UserProfile;
use async_trait::async_trait;
use std::sync::RwLock;

/// Persisted key-value storage for session credentials.
///
/// Hosts plug in their own backend (browser storage, keychain, disk); the
/// crate ships [`MemorySessionStore`] for native processes and tests.
/// Entries are written at login, overwritten on every successful token
/// refresh, and removed on logout or unrecoverable refresh failure.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn access_token(&self) -> Result<Option<String>, SessionError>;

    async fn refresh_token(&self) -> Result<Option<String>, SessionError>;

    async fn user(&self) -> Result<Option<UserProfile>, SessionError>;

    /// Store a freshly issued token pair, replacing any previous one.
    async fn store_tokens(&self, access: &str, refresh: &str) -> Result<(), SessionError>;

    async fn store_user(&self, user: &UserProfile) -> Result<(), SessionError>;

    /// Remove access token, refresh token and user profile. The
    /// session-expired marker is left untouched.
    async fn clear_credentials(&self) -> Result<(), SessionError>;

    /// Raise the session-expired marker observed by other contexts.
    async fn mark_session_expired(&self) -> Result<(), SessionError>;

    /// Observe and clear the session-expired marker. Returns whether it was
    /// set. Clearing is per observing context; credentials are not touched.
    async fn take_session_expired(&self) -> Result<bool, SessionError>;
}

/// In-memory [`SessionStore`] backed by a process-local lock
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    inner: RwLock<Entries>,
}

#[derive(Debug, Default)]
struct Entries {
    access_token: Option<String>,
    refresh_token: Option<String>,
    user: Option<UserProfile>,
    session_expired: bool,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Entries>, SessionError> {
        self.inner
            .read()
            .map_err(|_| SessionError::storage("session store lock poisoned"))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Entries>, SessionError> {
        self.inner
            .write()
            .map_err(|_| SessionError::storage("session store lock poisoned"))
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn access_token(&self) -> Result<Option<String>, SessionError> {
        Ok(self.read()?.access_token.clone())
    }

    async fn refresh_token(&self) -> Result<Option<String>, SessionError> {
        Ok(self.read()?.refresh_token.clone())
    }

    async fn user(&self) -> Result<Option<UserProfile>, SessionError> {
        Ok(self.read()?.user.clone())
    }

    async fn store_tokens(&self, access: &str, refresh: &str) -> Result<(), SessionError> {
        let mut entries = self.write()?;
        entries.access_token = Some(access.to_string());
        entries.refresh_token = Some(refresh.to_string());
        Ok(())
    }

    async fn store_user(&self, user: &UserProfile) -> Result<(), SessionError> {
        self.write()?.user = Some(user.clone());
        Ok(())
    }

    async fn clear_credentials(&self) -> Result<(), SessionError> {
        let mut entries = self.write()?;
        entries.access_token = None;
        entries.refresh_token = None;
        entries.user = None;
        Ok(())
    }

    async fn mark_session_expired(&self) -> Result<(), SessionError> {
        self.write()?.session_expired = true;
        Ok(())
    }

    async fn take_session_expired(&self) -> Result<bool, SessionError> {
        let mut entries = self.write()?;
        let was_expired = entries.session_expired;
        entries.session_expired = false;
        Ok(was_expired)
    }
}
