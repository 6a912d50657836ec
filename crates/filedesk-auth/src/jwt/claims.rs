//! Claims carried by the backend's access token.
//!
//! The console never holds the signing key; the backend verifies the
//! signature on every request. Decoding here only reads what the backend
//! already asserted (role, ids, expiry) so the console can gate its screens.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use filedesk_core::error::AppError;
use filedesk_core::types::{ClientId, UserId};
use filedesk_entity::user::Role;

/// JWT claims payload embedded in every access token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject — the username.
    #[serde(default)]
    pub sub: Option<String>,
    /// Role at the time of issuance.
    #[serde(default)]
    pub role: Option<Role>,
    /// Backend user id.
    #[serde(default)]
    pub id: Option<UserId>,
    /// Client organisation of the user.
    #[serde(default)]
    pub client_id: Option<ClientId>,
    /// Expiration timestamp (seconds since epoch).
    #[serde(default)]
    pub exp: Option<i64>,
}

impl TokenClaims {
    /// Decodes the payload segment of a `header.payload.signature` token.
    pub fn decode(token: &str) -> Result<Self, AppError> {
        let mut parts = token.split('.');
        let payload = match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(_), Some(payload), Some(_), None) => payload,
            _ => return Err(AppError::authentication("Invalid token format")),
        };

        // Some issuers pad the segments; the URL-safe engine wants them bare.
        let bytes = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .map_err(|e| AppError::authentication(format!("Invalid token payload: {e}")))?;

        serde_json::from_slice(&bytes)
            .map_err(|e| AppError::authentication(format!("Invalid token claims: {e}")))
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|exp| DateTime::from_timestamp(exp, 0))
    }

    /// Checks whether this token has expired.
    pub fn is_expired(&self) -> bool {
        self.exp.is_some_and(|exp| Utc::now().timestamp() >= exp)
    }
}
