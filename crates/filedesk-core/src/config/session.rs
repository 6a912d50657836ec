//! Session persistence configuration.

use serde::{Deserialize, Serialize};

/// How the console decides which role a freshly logged-in user has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RoleSource {
    /// Read the `role` claim of the server-issued access token.
    #[default]
    TokenClaim,
    /// Legacy mapping from the login name (`admin`, `employee1`, others).
    ///
    /// Only for backends whose tokens carry no role claim.
    Username,
}

impl std::fmt::Display for RoleSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoleSource::TokenClaim => write!(f, "token_claim"),
            RoleSource::Username => write!(f, "username"),
        }
    }
}

/// Session configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// File holding the persisted session.
    #[serde(default = "default_path")]
    pub path: String,
    /// Role resolution strategy.
    #[serde(default)]
    pub role_source: RoleSource,
    /// Drop the session when an authenticated call is answered with 401.
    #[serde(default = "default_true")]
    pub logout_on_unauthorized: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            role_source: RoleSource::default(),
            logout_on_unauthorized: true,
        }
    }
}

fn default_path() -> String {
    "data/session.json".to_string()
}

fn default_true() -> bool {
    true
}
