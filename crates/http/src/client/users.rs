//! User administration client methods

use super::request::ApiRequest;
use super::{CampusClient, ClientError};
use crate::types::{MessageResponse, UserUpdate};
use campus_core::UserProfile;

impl CampusClient {
    /// List every account (admin only)
    pub async fn list_users(&self) -> Result<Vec<UserProfile>, ClientError> {
        let req = ApiRequest::get("/api/users/");
        self.execute(req).await
    }

    /// List accounts awaiting validation (admin only)
    pub async fn pending_users(&self) -> Result<Vec<UserProfile>, ClientError> {
        let req = ApiRequest::get("/api/users/pending");
        self.execute(req).await
    }

    /// Validate a pending account (admin only)
    pub async fn validate_user(&self, user_id: i64) -> Result<MessageResponse, ClientError> {
        let req = ApiRequest::patch(format!("/api/users/{user_id}/validate"));
        self.execute(req).await
    }

    /// Update an account's role or status (admin only)
    pub async fn update_user(
        &self,
        user_id: i64,
        update: UserUpdate,
    ) -> Result<MessageResponse, ClientError> {
        let req = ApiRequest::patch(format!("/api/users/{user_id}")).json(&update)?;
        self.execute(req).await
    }
}
