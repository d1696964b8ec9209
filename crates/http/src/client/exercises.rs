//! Exercise workflow client methods

use super::request::ApiRequest;
use super::{CampusClient, ClientError};
use crate::types::{ExerciseGenerateRequest, ExerciseSubmission, ExerciseValidate, MessageResponse};
use campus_core::types::Exercise;

impl CampusClient {
    /// List a section's exercises
    pub async fn section_exercises(&self, section_id: i64) -> Result<Vec<Exercise>, ClientError> {
        let req = ApiRequest::get(format!("/api/exercises/sections/{section_id}/exercises"));
        self.execute(req).await
    }

    /// Ask the backend to generate an exercise from a section's documents.
    /// Generation runs on the backend's language model and can take a
    /// while; the general client timeout applies.
    pub async fn generate_exercises(
        &self,
        section_id: i64,
        request: ExerciseGenerateRequest,
    ) -> Result<Exercise, ClientError> {
        let req = ApiRequest::post(format!(
            "/api/exercises/sections/{section_id}/exercises/generate"
        ))
        .json(&request)?;
        self.execute(req).await
    }

    /// Approve a generated exercise for publication (teacher only)
    pub async fn validate_exercise(
        &self,
        exercise_id: i64,
        validation: ExerciseValidate,
    ) -> Result<MessageResponse, ClientError> {
        let req = ApiRequest::put(format!("/api/exercises/exercises/{exercise_id}/validate"))
            .json(&validation)?;
        self.execute(req).await
    }

    /// List student submissions for an exercise (teacher only)
    pub async fn exercise_submissions(
        &self,
        exercise_id: i64,
    ) -> Result<Vec<ExerciseSubmission>, ClientError> {
        let req = ApiRequest::get(format!("/api/exercises/exercises/{exercise_id}/submissions"));
        self.execute(req).await
    }
}
