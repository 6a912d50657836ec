//! Process-wide session context.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use filedesk_core::error::AppError;
use filedesk_entity::session::Session;
use filedesk_entity::user::Role;

use super::store::SessionStore;

/// The one session the console works with.
///
/// Created once with [`SessionContext::init`] and cloned into every screen
/// and into the API client. Reads never touch the store; `establish` and
/// `clear` write through to it.
#[derive(Clone)]
pub struct SessionContext {
    /// Persistence backend.
    store: Arc<dyn SessionStore>,
    /// The active session, mirrored from the store.
    current: Arc<RwLock<Option<Session>>>,
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext").finish_non_exhaustive()
    }
}

impl SessionContext {
    /// Loads any persisted session. An expired one is discarded and the
    /// store cleared.
    pub async fn init(store: Arc<dyn SessionStore>) -> Result<Self, AppError> {
        let mut loaded = store.load().await?;

        if loaded.as_ref().is_some_and(|s| s.is_expired_at(Utc::now())) {
            info!("Persisted session has expired; starting logged out");
            store.clear().await?;
            loaded = None;
        }

        if let Some(session) = &loaded {
            debug!(username = %session.username, role = %session.role, "Restored session");
        }

        Ok(Self {
            store,
            current: Arc::new(RwLock::new(loaded)),
        })
    }

    /// The active session, if logged in.
    pub async fn current(&self) -> Option<Session> {
        self.current.read().await.clone()
    }

    /// The bearer token of the active session.
    pub async fn token(&self) -> Option<String> {
        self.current.read().await.as_ref().map(|s| s.token.clone())
    }

    /// The role of the active session.
    pub async fn role(&self) -> Option<Role> {
        self.current.read().await.as_ref().map(|s| s.role)
    }

    pub async fn is_authenticated(&self) -> bool {
        self.current.read().await.is_some()
    }

    /// Returns the active session or a `Session` error.
    pub async fn require(&self) -> Result<Session, AppError> {
        self.current()
            .await
            .ok_or_else(|| AppError::session("Not logged in. Run `filedesk login` first."))
    }

    /// Persists and activates `session`, replacing any previous one.
    pub async fn establish(&self, session: Session) -> Result<(), AppError> {
        self.store.save(&session).await?;
        *self.current.write().await = Some(session);
        Ok(())
    }

    /// Drops the session from memory and wipes the store.
    ///
    /// The in-memory session is dropped even when the store fails, so the
    /// console is never left half logged-in.
    pub async fn clear(&self) -> Result<(), AppError> {
        self.current.write().await.take();
        self.store.clear().await
    }
}
