//! Backend connection configuration.

use serde::{Deserialize, Serialize};

/// Where the admin endpoints are mounted on the backend.
///
/// Older deployments serve them under `/api`, current ones under `/admin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AdminPrefix {
    /// `/admin/clients`, `/admin/files/client/{id}`
    #[default]
    Admin,
    /// `/api/clients`, `/api/files/client/{id}`
    Api,
}

impl AdminPrefix {
    /// Path prefix including the leading slash.
    pub fn as_path(&self) -> &'static str {
        match self {
            Self::Admin => "/admin",
            Self::Api => "/api",
        }
    }
}

/// HTTP client settings for the file-exchange backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the backend, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Mount point of the admin endpoints.
    #[serde(default)]
    pub admin_prefix: AdminPrefix,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// `User-Agent` header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            admin_prefix: AdminPrefix::default(),
            timeout_seconds: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout() -> u64 {
    60
}

fn default_user_agent() -> String {
    concat!("filedesk/", env!("CARGO_PKG_VERSION")).to_string()
}
