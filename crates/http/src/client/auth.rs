//! Authentication API client methods

use super::request::ApiRequest;
use super::{CampusClient, ClientError};
use crate::types::{MessageResponse, RegisterRequest, RegisterResponse, TokenResponse};
use campus_core::UserProfile;
use tracing::debug;

impl CampusClient {
    /// Register a new account. The account stays pending until an
    /// administrator validates it.
    pub async fn register(&self, request: RegisterRequest) -> Result<RegisterResponse, ClientError> {
        let req = ApiRequest::post("/api/auth/register")
            .public()
            .timeout(self.auth_timeout())
            .json(&request)?;
        self.execute(req).await
    }

    /// Log in with username and password (form-encoded, as the backend's
    /// OAuth2 form flow expects) and persist the issued session.
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenResponse, ClientError> {
        let req = ApiRequest::post("/api/auth/login")
            .public()
            .timeout(self.auth_timeout())
            .form(&[("username", username), ("password", password)]);
        let tokens: TokenResponse = self.execute(req).await?;

        self.session()
            .store_tokens(&tokens.access_token, &tokens.refresh_token)
            .await?;
        if let Some(user) = &tokens.user {
            self.session().store_user(user).await?;
        }
        Ok(tokens)
    }

    /// Get the current authenticated user
    pub async fn me(&self) -> Result<UserProfile, ClientError> {
        let req = ApiRequest::get("/api/auth/me");
        self.execute(req).await
    }

    /// End the session: best-effort server logout, then drop local
    /// credentials. An explicit logout is not an expired session, so no
    /// session-expired event is published.
    pub async fn logout(&self) -> Result<(), ClientError> {
        let req = ApiRequest::post("/api/auth/logout");
        if let Err(error) = self.execute::<MessageResponse>(req).await {
            debug!(%error, "server logout failed, clearing local session anyway");
        }
        self.session().clear_credentials().await?;
        Ok(())
    }
}
