//! The backend operations the console depends on.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use filedesk_core::AppResult;
use filedesk_core::types::{ClientId, DateRange, FileId};
use filedesk_entity::activity::ActivityLogEntry;
use filedesk_entity::client::ClientRecord;
use filedesk_entity::file::{FileRecord, HistoryEntry, SelectedFile, UploadReceipt};
use filedesk_entity::session::AccessToken;

/// A validated upload ready to be sent.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadRequest {
    /// The local file.
    pub file: SelectedFile,
    /// Period the file's data covers.
    pub range: DateRange,
    /// Target client when an admin uploads on a client's behalf.
    pub client_id: Option<ClientId>,
}

/// REST operations of the file-exchange backend.
///
/// Everything except [`login`](ExchangeApi::login) authenticates with the
/// active session's bearer token and fails with a `Session` error when
/// there is none.
#[async_trait]
pub trait ExchangeApi: Send + Sync + 'static {
    /// Exchange credentials for an access token.
    async fn login(&self, username: &str, password: &str) -> AppResult<AccessToken>;

    /// Files visible to the current user.
    async fn list_files(&self) -> AppResult<Vec<FileRecord>>;

    /// Upload one spreadsheet with its date range.
    async fn upload_file(&self, request: &UploadRequest) -> AppResult<UploadReceipt>;

    /// Upload history of the current user, or of `client` for admins.
    async fn upload_history(&self, client: Option<ClientId>) -> AppResult<Vec<HistoryEntry>>;

    /// Stream a file into `dest_dir`, returning the path written.
    ///
    /// `name` overrides the file name the server suggests.
    async fn download_file(
        &self,
        id: FileId,
        dest_dir: &Path,
        name: Option<&str>,
    ) -> AppResult<PathBuf>;

    /// Delete a file, returning the server's confirmation text.
    async fn delete_file(&self, id: FileId) -> AppResult<String>;

    /// All client organisations, in server order.
    async fn list_clients(&self) -> AppResult<Vec<ClientRecord>>;

    /// Files belonging to one client.
    async fn client_files(&self, client: ClientId) -> AppResult<Vec<FileRecord>>;

    /// The activity log, in server order.
    async fn activity_logs(&self) -> AppResult<Vec<ActivityLogEntry>>;
}
