//! Admin view of every client's files.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use filedesk_auth::{ConsolePermission, RbacEnforcer, SessionContext};
use filedesk_client::ExchangeApi;
use filedesk_core::AppResult;
use filedesk_core::traits::Confirmer;
use filedesk_core::types::{ClientId, FileId};
use filedesk_entity::client::ClientRecord;
use filedesk_entity::file::FileRecord;

use crate::screen::Loadable;

/// What the browser currently shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BrowserState {
    /// Clients in server order.
    pub clients: Vec<ClientRecord>,
    pub selected: Option<ClientId>,
    /// Files of the selected client.
    pub files: Loadable<Vec<FileRecord>>,
}

/// Client picker plus file list, with download and delete.
///
/// Clones share state. Every selection bumps a generation counter; a file
/// list arriving for an older generation is dropped, so overlapping
/// selections always settle on the last one made.
#[derive(Clone)]
pub struct AdminFileBrowser {
    api: Arc<dyn ExchangeApi>,
    session: SessionContext,
    rbac: RbacEnforcer,
    state: Arc<RwLock<BrowserState>>,
    generation: Arc<AtomicU64>,
}

impl AdminFileBrowser {
    pub fn new(api: Arc<dyn ExchangeApi>, session: SessionContext, rbac: RbacEnforcer) -> Self {
        Self {
            api,
            session,
            rbac,
            state: Arc::new(RwLock::new(BrowserState::default())),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Snapshot of the current state.
    pub async fn state(&self) -> BrowserState {
        self.state.read().await.clone()
    }

    pub async fn selected_client(&self) -> Option<ClientId> {
        self.state.read().await.selected
    }

    async fn require(&self, permission: ConsolePermission) -> AppResult<()> {
        let session = self.session.require().await?;
        self.rbac.require_permission(&session.role, &permission)
    }

    /// Fetch the client list without opening any client.
    pub async fn list_clients(&self) -> AppResult<Vec<ClientRecord>> {
        self.require(ConsolePermission::ClientList).await?;

        let clients = self.api.list_clients().await?;
        debug!(count = clients.len(), "Loaded clients");
        self.state.write().await.clients = clients.clone();
        Ok(clients)
    }

    /// Fetch the client list and open the first client.
    ///
    /// A failure to fetch the first client's files lands in
    /// [`BrowserState::files`]; the client list is still returned.
    pub async fn load_clients(&self) -> AppResult<Vec<ClientRecord>> {
        let clients = self.list_clients().await?;

        match clients.first().map(|c| c.id) {
            Some(id) => self.reload(id).await?,
            None => {
                let mut state = self.state.write().await;
                self.generation.fetch_add(1, Ordering::SeqCst);
                state.selected = None;
                state.files = Loadable::Ready(Vec::new());
            }
        }
        Ok(clients)
    }

    /// Show `client`'s files, always re-fetching.
    ///
    /// Returns `false` when a later selection superseded this one before
    /// its response arrived.
    pub async fn select_client(&self, client: ClientId) -> AppResult<bool> {
        self.require(ConsolePermission::ClientFilesView).await?;

        let generation = {
            let mut state = self.state.write().await;
            state.selected = Some(client);
            state.files = Loadable::Loading;
            self.generation.fetch_add(1, Ordering::SeqCst) + 1
        };

        let result = self.api.client_files(client).await;

        let mut state = self.state.write().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(%client, generation, "Discarding superseded file list");
            return Ok(false);
        }
        state.files = Loadable::from_result(result.clone());
        result.map(|_| true)
    }

    /// Download one of the listed files under its own name.
    pub async fn download(&self, file: FileId, dest_dir: &Path) -> AppResult<PathBuf> {
        self.require(ConsolePermission::FileDownload).await?;
        let name = self.filename_of(file).await;
        self.api.download_file(file, dest_dir, name.as_deref()).await
    }

    /// Delete a file after confirmation, then reload the selected client.
    ///
    /// Returns `false` when the user cancels; nothing is sent in that case.
    pub async fn delete(&self, file: FileId, confirmer: &dyn Confirmer) -> AppResult<bool> {
        self.require(ConsolePermission::FileDelete).await?;

        let label = self
            .filename_of(file)
            .await
            .unwrap_or_else(|| format!("file {file}"));
        if !confirmer.confirm(&format!("Delete {label}? This cannot be undone."))? {
            debug!(%file, "Delete cancelled");
            return Ok(false);
        }

        let message = self.api.delete_file(file).await?;
        info!(%file, %message, "Deleted file");

        if let Some(client) = self.selected_client().await {
            self.reload(client).await?;
        }
        Ok(true)
    }

    /// Select `client` as a follow-up step; only a rejected session is
    /// returned, other failures stay in [`BrowserState::files`].
    async fn reload(&self, client: ClientId) -> AppResult<()> {
        match self.select_client(client).await {
            Ok(_) => Ok(()),
            Err(e) if e.is_unauthorized() => Err(e),
            Err(e) => {
                warn!(%client, error = %e, "Failed to load client files");
                Ok(())
            }
        }
    }

    async fn filename_of(&self, file: FileId) -> Option<String> {
        self.state
            .read()
            .await
            .files
            .ready()
            .and_then(|files| files.iter().find(|f| f.id == file))
            .map(|f| f.filename.clone())
    }
}
