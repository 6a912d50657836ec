//! Console session model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use filedesk_core::types::{ClientId, UserId};

use crate::user::Role;

/// An established console session.
///
/// A session only exists once login succeeded, so a role is never held
/// without a bearer token. "Logged out" is the absence of a `Session`.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque bearer token sent with every authenticated request.
    pub token: String,
    /// Role the console gates screens and actions by.
    pub role: Role,
    /// Login name as typed (trimmed).
    pub username: String,
    /// Backend user id, when the token carries one.
    #[serde(default)]
    pub user_id: Option<UserId>,
    /// Client organisation the user belongs to, if any.
    #[serde(default)]
    pub client_id: Option<ClientId>,
    /// Token expiry, when the token carries one.
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    /// When the login happened.
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Whether the token is known to have expired at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|exp| exp <= now)
    }

    /// `Authorization` header value.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("username", &self.username)
            .field("role", &self.role)
            .field("user_id", &self.user_id)
            .field("client_id", &self.client_id)
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}
