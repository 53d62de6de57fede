//! HTTP client for the registration backend
//!
//! Every request goes through two hooks: the outgoing one attaches the stored
//! bearer token, the incoming one reacts to `401 Unauthorized` by forgetting
//! the session and asking the UI to show the login view.

use super::error::ApiError;
use super::traits::RegistrationApi;
use super::types::{decode_lenient, ApiResponse, RegisterRequest, RegisterResponse};
use crate::session::TokenStore;
use crate::state::events::EventSender;
use crate::state::{AppEvent, View};
use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Registration endpoint, relative to the base URL
const REGISTER_PATH: &str = "auth/register";

/// Client for the registration backend
pub struct ApiClient {
    http: reqwest::Client,
    /// Base URL without trailing slash
    base_url: String,
    tokens: Arc<dyn TokenStore>,
    /// Where login redirects are sent; `None` disables them
    events: Option<EventSender>,
}

impl ApiClient {
    /// Create a client for `base_url` with the given per-request timeout
    pub fn new(
        base_url: &str,
        timeout: Duration,
        tokens: Arc<dyn TokenStore>,
    ) -> Result<Self, ApiError> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        Url::parse(&base_url)
            .map_err(|e| ApiError::Request(format!("Invalid API URL '{base_url}': {e}")))?;

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("signup-tui/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url,
            tokens,
            events: None,
        })
    }

    /// Route login redirects triggered by `401` responses to the UI loop
    pub fn with_events(mut self, events: EventSender) -> Self {
        self.events = Some(events);
        self
    }

    #[cfg(test)]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Host part of the base URL, for display
    pub fn host(&self) -> String {
        Url::parse(&self.base_url)
            .ok()
            .and_then(|url| url.host_str().map(str::to_string))
            .unwrap_or_else(|| self.base_url.clone())
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Outgoing hook: attach the bearer token when one is stored
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.tokens.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Incoming hook for `401`: drop credentials and go to login
    fn handle_unauthorized(&self) {
        tracing::warn!("Server rejected credentials, clearing session");
        self.tokens.remove_token();
        self.tokens.remove_user_info();
        if let Some(events) = &self.events {
            // The receiver is gone only when the app is shutting down
            let _ = events.send(AppEvent::Redirect(View::Login));
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = self.authorize(request).send().await?;
        let status = response.status();
        tracing::debug!(%status, url = %response.url(), "Received response");

        if status == StatusCode::UNAUTHORIZED {
            self.handle_unauthorized();
        }

        if status.is_success() {
            Ok(response)
        } else {
            let bytes = response.bytes().await.unwrap_or_default();
            Err(ApiError::Status {
                status,
                body: decode_lenient(&bytes),
            })
        }
    }

    /// POST a JSON body to `path` (relative to the base URL)
    pub async fn post_json<B>(&self, path: &str, body: &B) -> Result<Response, ApiError>
    where
        B: Serialize + ?Sized,
    {
        self.send(self.http.post(self.endpoint(path)).json(body))
            .await
    }
}

#[async_trait]
impl RegistrationApi for ApiClient {
    async fn register(
        &self,
        request: &RegisterRequest,
    ) -> Result<ApiResponse<RegisterResponse>, ApiError> {
        let response = self.post_json(REGISTER_PATH, request).await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        Ok(ApiResponse {
            status,
            body: decode_lenient(&bytes),
        })
    }
}
