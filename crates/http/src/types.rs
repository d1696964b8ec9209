//! Request and response types for the campus backend API

use campus_core::types::{DifficultyLevel, QuestionType, UserRole, UserStatus};
use campus_core::UserProfile;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Body of the account-registration call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
}

/// Confirmation returned for a freshly registered (still pending) account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: i64,
    pub status: String,
}

/// Token pair issued by login and refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub user: Option<UserProfile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Generic `{"message": ...}` acknowledgement body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Partial user update applied by an administrator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionCreate {
    pub name: String,
    pub description: Option<String>,
}

/// An upload kept as owned bytes so the request can be rebuilt if it has to
/// be replayed after a token refresh
#[derive(Debug, Clone)]
pub struct DocumentUpload {
    pub section_id: i64,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    pub section_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub content: String,
}

/// Both sides of one chat exchange: the stored user message and the
/// retrieval-augmented answer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageResponse {
    pub user_message: campus_core::types::ChatMessage,
    pub system_message: campus_core::types::ChatMessage,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExerciseGenerateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_questions: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<DifficultyLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exercise_type: Option<QuestionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_specific_documents: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temp_content: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExerciseValidate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_notes: Option<String>,
}

/// One student's submitted answers for an exercise
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseSubmission {
    pub id: i64,
    pub student_id: i64,
    pub student_name: Option<String>,
    pub score: Option<f64>,
    pub submitted_at: Option<NaiveDateTime>,
}

/// Tutor-style analysis of one student's activity in a section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentAnalysis {
    pub analysis: String,
}
