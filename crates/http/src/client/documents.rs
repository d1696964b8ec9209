//! Document management client methods

use super::request::{ApiRequest, MultipartPayload};
use super::{CampusClient, ClientError};
use crate::types::{DocumentUpload, MessageResponse};
use campus_core::types::Document;

impl CampusClient {
    /// List the documents of a section
    pub async fn section_documents(&self, section_id: i64) -> Result<Vec<Document>, ClientError> {
        let req = ApiRequest::get(format!("/api/documents/section/{section_id}"));
        self.execute(req).await
    }

    /// Upload a document into a section. The payload is kept as owned bytes
    /// so the upload survives a mid-flight token refresh.
    pub async fn upload_document(&self, upload: DocumentUpload) -> Result<Document, ClientError> {
        let payload = MultipartPayload {
            file_name: upload.file_name,
            content_type: upload.content_type,
            bytes: upload.bytes,
            fields: vec![("section_id".to_string(), upload.section_id.to_string())],
        };
        let req = ApiRequest::post("/api/documents/upload").multipart(payload);
        self.execute(req).await
    }

    /// Get one document's metadata
    pub async fn get_document(&self, document_id: i64) -> Result<Document, ClientError> {
        let req = ApiRequest::get(format!("/api/documents/{document_id}"));
        self.execute(req).await
    }

    /// Delete a document and its index entries
    pub async fn delete_document(&self, document_id: i64) -> Result<MessageResponse, ClientError> {
        let req = ApiRequest::delete(format!("/api/documents/{document_id}"));
        self.execute(req).await
    }

    /// Download a document's original file
    pub async fn download_document(&self, document_id: i64) -> Result<Vec<u8>, ClientError> {
        let req = ApiRequest::get(format!("/api/documents/download/{document_id}"));
        self.execute_bytes(req).await
    }
}
