//! `reqwest`-backed HTTP client with session-aware authentication.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use filedesk_auth::SessionContext;
use filedesk_core::config::{AdminPrefix, ApiConfig};
use filedesk_core::error::{AppError, ErrorKind, GENERIC_TRANSPORT_MESSAGE};
use filedesk_core::AppResult;

/// Message used when the server rejects the token without saying why.
pub const UNAUTHORIZED_MESSAGE: &str = "Session expired or invalid. Please log in again.";

/// HTTP client for the file-exchange backend.
///
/// Cheap to clone; clones share the connection pool and the session.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    admin_prefix: AdminPrefix,
    session: SessionContext,
    logout_on_unauthorized: bool,
}

impl ApiClient {
    /// Build a client from the `api` config section.
    ///
    /// `logout_on_unauthorized` clears `session` whenever the server
    /// answers 401.
    pub fn new(
        config: &ApiConfig,
        session: SessionContext,
        logout_on_unauthorized: bool,
    ) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    "Failed to create HTTP client",
                    e,
                )
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            admin_prefix: config.admin_prefix,
            session,
            logout_on_unauthorized,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Path of an admin endpoint under the configured prefix.
    pub(crate) fn admin_path(&self, path: &str) -> String {
        format!("{}{}", self.admin_prefix.as_path(), path)
    }

    pub(crate) fn http(&self) -> &Client {
        &self.client
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Attach the bearer token of the active session.
    ///
    /// Fails before any I/O when nobody is logged in.
    pub(crate) async fn authorized(&self, request: RequestBuilder) -> AppResult<RequestBuilder> {
        let session = self.session.require().await?;
        Ok(request.header(reqwest::header::AUTHORIZATION, session.bearer()))
    }

    /// Send an authenticated request and return the successful response.
    pub(crate) async fn send(
        &self,
        request: RequestBuilder,
        fallback: &str,
    ) -> AppResult<Response> {
        let request = self.authorized(request).await?;
        let response = request.send().await.map_err(transport_error)?;
        self.check(response, fallback).await
    }

    /// Authenticated GET, decoding a JSON body.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> AppResult<T> {
        let url = self.build_url(path);
        debug!(method = "GET", %path, "Sending request");

        let mut request = self.client.get(&url);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = self.send(request, GENERIC_TRANSPORT_MESSAGE).await?;
        decode_json(response).await
    }

    /// Map a non-2xx response to an [`AppError`].
    ///
    /// A 401 becomes an `Authorization` error and, when configured, logs the
    /// console out.
    pub(crate) async fn check(&self, response: Response, fallback: &str) -> AppResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let path = response.url().path().to_string();
        let detail = read_detail(response).await;

        match status {
            StatusCode::UNAUTHORIZED => {
                warn!(%path, detail = ?detail, "Server rejected the access token");
                if self.logout_on_unauthorized {
                    if let Err(e) = self.session.clear().await {
                        warn!(error = %e, "Failed to clear session after 401");
                    }
                }
                Err(
                    AppError::authorization(detail.unwrap_or_else(|| UNAUTHORIZED_MESSAGE.into()))
                        .with_status(401),
                )
            }
            StatusCode::NOT_FOUND => Err(AppError::not_found(
                detail.unwrap_or_else(|| "Not found".to_string()),
            )
            .with_status(404)),
            _ => {
                debug!(%path, status = status.as_u16(), "Request failed");
                Err(AppError::from_detail(detail, fallback).with_status(status.as_u16()))
            }
        }
    }
}

/// Decode a successful JSON body.
pub(crate) async fn decode_json<T: DeserializeOwned>(response: Response) -> AppResult<T> {
    let bytes = response.bytes().await.map_err(transport_error)?;
    serde_json::from_slice(&bytes).map_err(|e| {
        AppError::with_source(
            ErrorKind::Serialization,
            format!("Unexpected response from server: {e}"),
            e,
        )
    })
}

/// Extract the human-readable error from a FastAPI-style body.
///
/// `detail` is either a string or a list of validation errors carrying
/// `msg` fields.
pub(crate) async fn read_detail(response: Response) -> Option<String> {
    let body = response.text().await.ok()?;
    detail_from_body(&body)
}

pub(crate) fn detail_from_body(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        serde_json::Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    }
}

pub(crate) fn transport_error(err: reqwest::Error) -> AppError {
    let message = if err.is_timeout() {
        "Request timed out. Please try again.".to_string()
    } else if err.is_connect() {
        "Could not reach the server. Please try again.".to_string()
    } else {
        GENERIC_TRANSPORT_MESSAGE.to_string()
    };
    AppError::with_source(ErrorKind::Transport, message, err)
}
