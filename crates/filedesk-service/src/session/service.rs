//! Login, logout and the current session.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};
use validator::{Validate, ValidationErrors};

use filedesk_auth::{RoleResolver, SessionContext, TokenClaims};
use filedesk_client::ExchangeApi;
use filedesk_core::AppResult;
use filedesk_core::error::AppError;
use filedesk_entity::session::Session;

/// Credentials as entered at the login prompt.
#[derive(Debug, Clone, Validate)]
pub struct Credentials {
    #[validate(length(min = 1, message = "Please enter your username"))]
    pub username: String,
    #[validate(length(min = 1, message = "Please enter your password"))]
    pub password: String,
}

impl Credentials {
    /// Username is trimmed; the password is kept as typed.
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.trim().to_string(),
            password: password.to_string(),
        }
    }
}

/// Establishes and ends console sessions.
#[derive(Clone)]
pub struct SessionService {
    /// Backend API.
    api: Arc<dyn ExchangeApi>,
    /// Shared session.
    session: SessionContext,
    /// Role resolution strategy.
    resolver: RoleResolver,
}

impl std::fmt::Debug for SessionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionService")
            .field("role_source", &self.resolver.source())
            .finish_non_exhaustive()
    }
}

impl SessionService {
    pub fn new(api: Arc<dyn ExchangeApi>, session: SessionContext, resolver: RoleResolver) -> Self {
        Self {
            api,
            session,
            resolver,
        }
    }

    /// Log in and persist the new session.
    ///
    /// On any failure the previous session, if one exists, is left as it was.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<Session> {
        let credentials = Credentials::new(username, password);
        credentials
            .validate()
            .map_err(|e| AppError::validation(first_message(&e, &["username", "password"])))?;

        let token = self
            .api
            .login(&credentials.username, &credentials.password)
            .await?;

        let claims = match TokenClaims::decode(&token.access_token) {
            Ok(claims) => Some(claims),
            Err(e) => {
                debug!(error = %e, "Access token is not a readable JWT");
                None
            }
        };
        let role = self.resolver.resolve(&credentials.username, claims.as_ref())?;

        let session = Session {
            token: token.access_token,
            role,
            username: credentials.username,
            user_id: claims.as_ref().and_then(|c| c.id),
            client_id: claims.as_ref().and_then(|c| c.client_id),
            expires_at: claims.as_ref().and_then(|c| c.expires_at()),
            created_at: Utc::now(),
        };
        self.session.establish(session.clone()).await?;

        info!(username = %session.username, role = %session.role, "Logged in");
        Ok(session)
    }

    /// Drop the session from memory and from disk.
    pub async fn logout(&self) -> AppResult<()> {
        let username = self.session.current().await.map(|s| s.username);
        self.session.clear().await?;
        info!(username = ?username, "Logged out");
        Ok(())
    }

    pub async fn current_session(&self) -> Option<Session> {
        self.session.current().await
    }

    pub fn context(&self) -> &SessionContext {
        &self.session
    }
}

/// The message of the first failing field, in `fields` order.
fn first_message(errors: &ValidationErrors, fields: &[&str]) -> String {
    let by_field = errors.field_errors();
    fields
        .iter()
        .filter_map(|field| by_field.get(*field))
        .flat_map(|errs| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "Invalid credentials".to_string())
}
