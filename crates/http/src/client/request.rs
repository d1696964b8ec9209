//! Replayable request descriptions
//!
//! Requests are kept as owned data rather than consumed builders so the
//! reauth pipeline can re-issue the identical request after a token
//! refresh. The `retried` flag marks a request that has already been
//! replayed once; such a request must never re-enter the refresh path.

use super::error::ClientError;
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde::Serialize;
use std::time::Duration;

pub(crate) struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
    pub timeout: Option<Duration>,
    pub authenticated: bool,
    pub retried: bool,
}

pub(crate) enum RequestBody {
    Empty,
    Json(serde_json::Value),
    Form(Vec<(String, String)>),
    Multipart(MultipartPayload),
}

/// Multipart upload kept as owned bytes so the form can be rebuilt on every
/// dispatch (reqwest forms are consumed by sending)
pub(crate) struct MultipartPayload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    pub fields: Vec<(String, String)>,
}

impl MultipartPayload {
    pub fn form(&self) -> Result<Form, ClientError> {
        let part = Part::bytes(self.bytes.clone())
            .file_name(self.file_name.clone())
            .mime_str(&self.content_type)?;
        let mut form = Form::new().part("file", part);
        for (key, value) in &self.fields {
            form = form.text(key.clone(), value.clone());
        }
        Ok(form)
    }
}

impl ApiRequest {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
            timeout: None,
            authenticated: true,
            retried: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attach a JSON body
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self, ClientError> {
        self.body = RequestBody::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Attach a form-encoded body
    pub fn form(mut self, fields: &[(&str, &str)]) -> Self {
        self.body = RequestBody::Form(
            fields
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        );
        self
    }

    /// Attach a multipart upload
    pub fn multipart(mut self, payload: MultipartPayload) -> Self {
        self.body = RequestBody::Multipart(payload);
        self
    }

    /// Override the per-request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Send without a bearer token (login, register)
    pub fn public(mut self) -> Self {
        self.authenticated = false;
        self
    }

    /// Mark this request as already replayed once
    pub fn into_retry(mut self) -> Self {
        self.retried = true;
        self
    }
}
