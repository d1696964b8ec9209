//! Retrieval-augmented chat client methods

use super::request::ApiRequest;
use super::{CampusClient, ClientError};
use crate::types::{CreateSessionRequest, MessageResponse, SendMessageRequest, SendMessageResponse};
use campus_core::types::{ChatMessage, ChatSession};

impl CampusClient {
    /// List the current user's chat sessions
    pub async fn chat_sessions(&self) -> Result<Vec<ChatSession>, ClientError> {
        let req = ApiRequest::get("/api/chat/sessions");
        self.execute(req).await
    }

    /// Open a chat session against a section's document corpus
    pub async fn create_chat_session(&self, section_id: i64) -> Result<ChatSession, ClientError> {
        let req =
            ApiRequest::post("/api/chat/sessions").json(&CreateSessionRequest { section_id })?;
        self.execute(req).await
    }

    /// Fetch a session's message history
    pub async fn chat_messages(&self, session_id: i64) -> Result<Vec<ChatMessage>, ClientError> {
        let req = ApiRequest::get(format!("/api/chat/sessions/{session_id}/messages"));
        self.execute(req).await
    }

    /// Send a message and wait for the retrieval-augmented answer. Answer
    /// latency is covered by the general client timeout, not the short
    /// credential-call timeout.
    pub async fn send_chat_message(
        &self,
        session_id: i64,
        content: impl Into<String>,
    ) -> Result<SendMessageResponse, ClientError> {
        let req = ApiRequest::post(format!("/api/chat/sessions/{session_id}/messages")).json(
            &SendMessageRequest {
                content: content.into(),
            },
        )?;
        self.execute(req).await
    }

    /// Delete a chat session and its messages
    pub async fn delete_chat_session(
        &self,
        session_id: i64,
    ) -> Result<MessageResponse, ClientError> {
        let req = ApiRequest::delete(format!("/api/chat/sessions/{session_id}"));
        self.execute(req).await
    }
}
