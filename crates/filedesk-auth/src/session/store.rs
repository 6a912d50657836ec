//! Session persistence backends.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use filedesk_core::error::AppError;
use filedesk_entity::session::Session;

/// Persists the single console session between runs.
///
/// Two implementations are provided:
/// - [`FileSessionStore`] (JSON file, the default)
/// - [`MemorySessionStore`] (in-process only)
#[async_trait]
pub trait SessionStore: Send + Sync + 'static {
    /// Load the persisted session, if any.
    async fn load(&self) -> Result<Option<Session>, AppError>;

    /// Persist `session`, replacing whatever was stored.
    async fn save(&self, session: &Session) -> Result<(), AppError>;

    /// Remove everything the store holds. Succeeds when already empty.
    async fn clear(&self) -> Result<(), AppError>;
}

/// Stores the session as pretty-printed JSON in a file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    /// Location of the session file.
    path: PathBuf,
}

impl FileSessionStore {
    /// Creates a store backed by `path`. Nothing is touched until first use.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Option<Session>, AppError> {
        let data = match tokio::fs::read_to_string(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(AppError::storage(format!(
                    "Failed to read session file '{}': {e}",
                    self.path.display()
                )));
            }
        };

        match serde_json::from_str(&data) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                // An unreadable file is treated as logged out, never as a session.
                tracing::warn!(path = %self.path.display(), "Discarding corrupt session file: {e}");
                Ok(None)
            }
        }
    }

    async fn save(&self, session: &Session) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                AppError::storage(format!(
                    "Failed to create session directory '{}': {e}",
                    parent.display()
                ))
            })?;
        }

        let data = serde_json::to_string_pretty(session)?;
        tokio::fs::write(&self.path, data).await.map_err(|e| {
            AppError::storage(format!(
                "Failed to write session file '{}': {e}",
                self.path.display()
            ))
        })?;

        debug!(path = %self.path.display(), "Session persisted");
        Ok(())
    }

    async fn clear(&self) -> Result<(), AppError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!(path = %self.path.display(), "Session file removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::storage(format!(
                "Failed to remove session file '{}': {e}",
                self.path.display()
            ))),
        }
    }
}
