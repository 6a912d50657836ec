//! In-memory session store.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use filedesk_core::error::AppError;
use filedesk_entity::session::Session;

use super::store::SessionStore;

/// Keeps the session in process memory only; nothing survives a restart.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    /// Protected slot.
    slot: Arc<Mutex<Option<Session>>>,
}

impl MemorySessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store already holding `session`.
    pub fn with_session(session: Session) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(session))),
        }
    }

    /// Whether anything is stored.
    pub async fn is_empty(&self) -> bool {
        self.slot.lock().await.is_none()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self) -> Result<Option<Session>, AppError> {
        Ok(self.slot.lock().await.clone())
    }

    async fn save(&self, session: &Session) -> Result<(), AppError> {
        *self.slot.lock().await = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), AppError> {
        *self.slot.lock().await = None;
        Ok(())
    }
}
