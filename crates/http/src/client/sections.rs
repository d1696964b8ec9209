//! Course section client methods

use super::request::ApiRequest;
use super::{CampusClient, ClientError};
use crate::types::{MessageResponse, SectionCreate};
use campus_core::types::Section;

impl CampusClient {
    /// Create a course section (teacher or admin)
    pub async fn create_section(&self, section: SectionCreate) -> Result<Section, ClientError> {
        let req = ApiRequest::post("/api/sections/").json(&section)?;
        self.execute(req).await
    }

    /// List the sections visible to the current user
    pub async fn list_sections(&self) -> Result<Vec<Section>, ClientError> {
        let req = ApiRequest::get("/api/sections/");
        self.execute(req).await
    }

    /// Get one section
    pub async fn get_section(&self, section_id: i64) -> Result<Section, ClientError> {
        let req = ApiRequest::get(format!("/api/sections/{section_id}"));
        self.execute(req).await
    }

    /// Delete a section and everything attached to it
    pub async fn delete_section(&self, section_id: i64) -> Result<MessageResponse, ClientError> {
        let req = ApiRequest::delete(format!("/api/sections/{section_id}"));
        self.execute(req).await
    }
}
