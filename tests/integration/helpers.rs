//! Shared test helpers for integration tests.

#![allow(dead_code)]

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{Duration, Utc};
use mockito::{Matcher, Mock, ServerGuard};
use tempfile::TempDir;

use filedesk_core::config::{AdminPrefix, ConsoleConfig, RoleSource};
use filedesk_service::ConsoleContext;

/// Test application: a mock backend plus a scratch directory holding the
/// session file and downloads.
pub struct TestApp {
    /// Mock of the file-exchange backend
    pub server: ServerGuard,
    /// Scratch directory, removed on drop
    pub dir: TempDir,
    /// Console configuration pointing at `server`
    pub config: ConsoleConfig,
}

impl TestApp {
    /// Create a new test application
    pub async fn new() -> Self {
        let server = mockito::Server::new_async().await;
        let dir = tempfile::tempdir().expect("Failed to create temp dir");

        let mut config = ConsoleConfig::default();
        config.api.base_url = server.url();
        config.api.timeout_seconds = 5;
        config.session.path = dir
            .path()
            .join("session.json")
            .to_string_lossy()
            .into_owned();
        config.upload.download_dir = dir
            .path()
            .join("downloads")
            .to_string_lossy()
            .into_owned();

        Self {
            server,
            dir,
            config,
        }
    }

    pub fn with_admin_prefix(mut self, prefix: AdminPrefix) -> Self {
        self.config.api.admin_prefix = prefix;
        self
    }

    pub fn with_role_source(mut self, source: RoleSource) -> Self {
        self.config.session.role_source = source;
        self
    }

    /// Build a context the way the binary does, restoring any persisted session.
    pub async fn context(&self) -> ConsoleContext {
        ConsoleContext::from_config(self.config.clone())
            .await
            .expect("Failed to build console context")
    }

    pub fn session_file(&self) -> std::path::PathBuf {
        self.dir.path().join("session.json")
    }

    /// Mock a successful login for `username` that returns `token`.
    pub async fn mock_login(&mut self, username: &str, token: &str) -> Mock {
        self.server
            .mock("POST", "/auth/login")
            .match_body(Matcher::UrlEncoded("username".into(), username.into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(serde_json::json!({"access_token": token, "token_type": "bearer"}).to_string())
            .create_async()
            .await
    }

    /// Log in through the service layer against a mocked backend.
    pub async fn login_as(&mut self, username: &str, role: &str, client_id: Option<i64>) -> ConsoleContext {
        let token = token_for(username, role, client_id);
        let _login = self.mock_login(username, &token).await;
        let ctx = self.context().await;
        ctx.sessions()
            .login(username, "secret")
            .await
            .expect("Login failed");
        ctx
    }

    /// Write a spreadsheet-named file into the scratch directory.
    pub fn spreadsheet(&self, name: &str, bytes: &[u8]) -> std::path::PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, bytes).expect("Failed to write test file");
        path
    }
}

/// Unsigned JWT carrying the backend's claims, valid for two hours.
pub fn token_for(username: &str, role: &str, client_id: Option<i64>) -> String {
    claims_token(serde_json::json!({
        "sub": username,
        "role": role,
        "id": 2,
        "client_id": client_id,
        "exp": (Utc::now() + Duration::hours(2)).timestamp(),
    }))
}

pub fn claims_token(claims: serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header}.{payload}.c2lnbmF0dXJl")
}

/// JSON body for a file listing.
pub fn file_json(id: i64, filename: &str, client_id: i64) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "filename": filename,
        "uploaded_by": 3,
        "client_id": client_id,
        "start_date": "2024-03-01",
        "end_date": "2024-03-31",
        "uploaded_at": "2024-04-02T09:15:00"
    })
}
