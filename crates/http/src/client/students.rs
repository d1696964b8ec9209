//! Student activity client methods

use super::request::ApiRequest;
use super::{CampusClient, ClientError};
use crate::types::StudentAnalysis;
use campus_core::types::StudentSummary;

impl CampusClient {
    /// List the students active in a section (teacher only)
    pub async fn section_students(
        &self,
        section_id: i64,
    ) -> Result<Vec<StudentSummary>, ClientError> {
        let req = ApiRequest::get(format!("/api/students/sections/{section_id}/students"));
        self.execute(req).await
    }

    /// Ask the backend for a tutor-style analysis of one student's
    /// submissions and chat history in a section (teacher only)
    pub async fn analyze_student(
        &self,
        section_id: i64,
        student_id: i64,
    ) -> Result<StudentAnalysis, ClientError> {
        let req = ApiRequest::post(format!(
            "/api/students/sections/{section_id}/students/{student_id}/analyze"
        ));
        self.execute(req).await
    }
}
