use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Role attached to every account, drives which dashboards a user may see
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Student,
    Teacher,
    SuperAdmin,
}

impl Default for UserRole {
    fn default() -> Self {
        Self::Student
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    Pending,
    Active,
    Suspended,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub role: UserRole,
    pub status: UserStatus,
}

impl UserProfile {
    /// Check if the account has been validated and not suspended
    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }

    pub fn is_teacher(&self) -> bool {
        self.role == UserRole::Teacher
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::SuperAdmin
    }
}

/// A course section grouping documents, chat sessions and exercises
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub document_count: i64,
    pub created_at: Option<NaiveDateTime>,
}

/// An uploaded course document, indexed server-side for retrieval
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: i64,
    pub original_filename: String,
    pub file_size: i64,
    pub document_type: String,
    pub status: String,
    pub is_vectorized: bool,
    pub uploaded_at: Option<NaiveDateTime>,
    pub page_count: Option<i64>,
    pub vector_count: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: i64,
    pub title: String,
    pub section_id: i64,
    pub section_name: String,
    pub created_at: Option<NaiveDateTime>,
    pub last_message_at: Option<NaiveDateTime>,
    pub message_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: i64,
    pub content: String,
    pub is_user: bool,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    Mcq,
    OpenEnded,
    TrueFalse,
    FillBlank,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyLevel {
    Easy,
    Medium,
    Hard,
}

impl Default for DifficultyLevel {
    fn default() -> Self {
        Self::Medium
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    pub question_type: QuestionType,
    pub options: Option<Vec<String>>,
    pub correct_answer: Option<String>,
    pub expected_keywords: Option<Vec<String>>,
    pub explanation: Option<String>,
    pub points: Option<i64>,
}

/// A generated exercise awaiting teacher validation or already published
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exercise {
    pub id: i64,
    pub title: String,
    pub status: String,
    pub section_id: i64,
    pub difficulty: Option<DifficultyLevel>,
    pub questions: Option<Vec<Question>>,
    pub created_at: Option<NaiveDateTime>,
    pub validation_notes: Option<String>,
}

/// A student appearing in a section's activity, as seen by its teacher
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentSummary {
    pub id: i64,
    pub full_name: String,
    pub email: String,
}
