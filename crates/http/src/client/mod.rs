//! Campus API client

pub mod auth;
pub mod chat;
pub mod documents;
pub mod error;
pub mod exercises;
mod refresh;
mod request;
pub mod sections;
pub mod students;
pub mod users;

use campus_core::{MemorySessionStore, SessionEvent, SessionEvents, SessionStore};
use error::{ClientError, RefreshError};
use refresh::RefreshCoordinator;
use request::{ApiRequest, RequestBody};
use reqwest::{header, Client, ClientBuilder as HttpBuilder, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Timeout applied to general API calls
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(100);
/// Shorter timeout for the credential endpoints (login, register, refresh)
const DEFAULT_AUTH_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_USER_AGENT: &str = "campus-client/0.1.0";

/// Campus API client
///
/// Cheap to clone; clones share the connection pool, the session store and
/// the refresh coordination state.
#[derive(Clone)]
pub struct CampusClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: Client,
    base_url: String,
    auth_timeout: Duration,
    session: Arc<dyn SessionStore>,
    events: SessionEvents,
    refresh: RefreshCoordinator,
}

impl CampusClient {
    /// Create a new client with default configuration
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::builder().base_url(base_url).build()
    }

    /// Create a new client builder
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// The store holding this client's session credentials
    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.inner.session
    }

    /// Handle for subscribing to session lifecycle events
    pub fn events(&self) -> &SessionEvents {
        &self.inner.events
    }

    pub(crate) fn auth_timeout(&self) -> Duration {
        self.inner.auth_timeout
    }

    /// Execute a request and decode the JSON response
    pub(crate) async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<T, ClientError> {
        let response = self.send_with_reauth(request).await?;
        Ok(response.json().await?)
    }

    /// Execute a request and return the raw response body
    pub(crate) async fn execute_bytes(&self, request: ApiRequest) -> Result<Vec<u8>, ClientError> {
        let response = self.send_with_reauth(request).await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// Send a request, refreshing the access token once if the backend
    /// rejects it. The replay goes back through the same pipeline carrying
    /// the retried marker, so a second rejection falls through to the plain
    /// error mapping instead of re-entering the refresh path.
    async fn send_with_reauth(
        &self,
        mut request: ApiRequest,
    ) -> Result<reqwest::Response, ClientError> {
        let mut token_override = None;
        loop {
            let response = self.dispatch(&request, token_override.as_deref()).await?;
            let status = response.status();

            if status.is_success() {
                return Ok(response);
            }

            if status == StatusCode::UNAUTHORIZED && request.authenticated && !request.retried {
                debug!(path = %request.path, "access token rejected, requesting refresh");
                let token = self.inner.refresh.fresh_access_token(self).await?;
                request = request.into_retry();
                token_override = Some(token);
                continue;
            }

            let message = read_error_body(response).await;
            return Err(ClientError::from_status(status, message));
        }
    }

    /// Build and send one HTTP request. `token_override` carries the
    /// just-issued access token on replays; otherwise the stored token is
    /// attached when present.
    async fn dispatch(
        &self,
        request: &ApiRequest,
        token_override: Option<&str>,
    ) -> Result<reqwest::Response, ClientError> {
        let url = format!("{}{}", self.inner.base_url, request.path);
        let mut builder = self.inner.http.request(request.method.clone(), url);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Form(fields) => builder.form(fields),
            RequestBody::Multipart(payload) => builder.multipart(payload.form()?),
        };
        if request.authenticated {
            let token = match token_override {
                Some(token) => Some(token.to_string()),
                None => self.inner.session.access_token().await?,
            };
            if let Some(token) = token {
                builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
            }
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(builder.send().await?)
    }

    /// Exchange the stored refresh token for a new token pair and persist
    /// it. Called by the refresh coordinator only; this is a plain
    /// unauthenticated POST outside the reauth pipeline.
    pub(crate) async fn request_token_refresh(&self) -> Result<String, RefreshError> {
        let refresh_token = self
            .inner
            .session
            .refresh_token()
            .await
            .map_err(|e| RefreshError::Store(e.to_string()))?;
        let Some(refresh_token) = refresh_token else {
            warn!("no refresh token in session store");
            return Err(RefreshError::MissingRefreshToken);
        };

        let url = format!("{}/api/auth/refresh", self.inner.base_url);
        let response = self
            .inner
            .http
            .post(url)
            .timeout(self.inner.auth_timeout)
            .json(&crate::types::RefreshTokenRequest { refresh_token })
            .send()
            .await
            .map_err(|e| RefreshError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = read_error_body(response).await;
            warn!(status = status.as_u16(), "token refresh rejected");
            return Err(RefreshError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let tokens: crate::types::TokenResponse = response
            .json()
            .await
            .map_err(|e| RefreshError::Transport(e.to_string()))?;
        self.inner
            .session
            .store_tokens(&tokens.access_token, &tokens.refresh_token)
            .await
            .map_err(|e| RefreshError::Store(e.to_string()))?;
        debug!("access token refreshed");
        Ok(tokens.access_token)
    }

    /// Unrecoverable-auth teardown: drop credentials, raise the expired
    /// marker, notify subscribers exactly once.
    pub(crate) async fn teardown_session(&self, reason: &RefreshError) {
        warn!(%reason, "session unrecoverable, clearing credentials");
        if let Err(error) = self.inner.session.clear_credentials().await {
            warn!(%error, "failed to clear session credentials");
        }
        if let Err(error) = self.inner.session.mark_session_expired().await {
            warn!(%error, "failed to raise session-expired marker");
        }
        self.inner.events.publish(SessionEvent::Expired {
            reason: reason.to_string(),
        });
    }
}

async fn read_error_body(response: reqwest::Response) -> String {
    let status = response.status();
    response.text().await.unwrap_or_else(|_| status.to_string())
}

/// Builder for [`CampusClient`]
pub struct ClientBuilder {
    base_url: Option<String>,
    timeout: Duration,
    auth_timeout: Duration,
    user_agent: Option<String>,
    session: Option<Arc<dyn SessionStore>>,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
            auth_timeout: DEFAULT_AUTH_TIMEOUT,
            user_agent: None,
            session: None,
        }
    }
}

impl ClientBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the timeout for general API calls
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the timeout for the credential endpoints
    pub fn auth_timeout(mut self, timeout: Duration) -> Self {
        self.auth_timeout = timeout;
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Use a custom session store instead of the in-memory default
    pub fn session_store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.session = Some(store);
        self
    }

    /// Build the client
    pub fn build(self) -> Result<CampusClient, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;
        let base_url = base_url.trim_end_matches('/').to_string();

        let http = HttpBuilder::new()
            .timeout(self.timeout)
            .user_agent(
                self.user_agent
                    .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            )
            .build()?;

        Ok(CampusClient {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                auth_timeout: self.auth_timeout,
                session: self
                    .session
                    .unwrap_or_else(|| Arc::new(MemorySessionStore::new())),
                events: SessionEvents::new(),
                refresh: RefreshCoordinator::new(),
            }),
        })
    }
}
