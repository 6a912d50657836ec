//! Upload workflow: pick a file, set its date range, send it.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};

use filedesk_auth::{ConsolePermission, RbacEnforcer, SessionContext};
use filedesk_client::{ExchangeApi, UploadRequest};
use filedesk_core::AppResult;
use filedesk_core::config::UploadConfig;
use filedesk_core::error::AppError;
use filedesk_core::types::{ClientId, DateRange};
use filedesk_entity::file::{HistoryEntry, SelectedFile, UploadReceipt};

pub const WRONG_TYPE_MESSAGE: &str = "Please select an XLS or XLSX file";
pub const NO_FILE_MESSAGE: &str = "Please select a file";
pub const NO_DATES_MESSAGE: &str = "Please select both start and end dates";
pub const NO_CLIENT_MESSAGE: &str = "Please select a client";

/// Where the workflow stands.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum UploadState {
    #[default]
    Idle,
    /// A newly selected file is being checked.
    Validating,
    /// The upload request is in flight.
    Uploading,
    /// The last upload was accepted.
    Success(UploadReceipt),
    /// The last selection or upload was rejected.
    Failed(AppError),
}

/// Client-side file acceptance rules.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    max_size_bytes: u64,
    accepted_mime_types: Vec<String>,
}

impl UploadPolicy {
    pub fn new(max_size_bytes: u64, accepted_mime_types: Vec<String>) -> Self {
        Self {
            max_size_bytes,
            accepted_mime_types,
        }
    }

    pub fn from_config(config: &UploadConfig) -> Self {
        Self::new(config.max_size_bytes, config.accepted_mime_types.clone())
    }

    /// Check type first, then size.
    pub fn check(&self, file: &SelectedFile) -> AppResult<()> {
        if !self
            .accepted_mime_types
            .iter()
            .any(|m| m.eq_ignore_ascii_case(&file.mime_type))
        {
            return Err(AppError::validation(WRONG_TYPE_MESSAGE));
        }
        if file.size > self.max_size_bytes {
            return Err(AppError::validation(format!(
                "File size exceeds {}MB limit",
                self.max_size_bytes / (1024 * 1024)
            )));
        }
        Ok(())
    }
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self::from_config(&UploadConfig::default())
    }
}

/// One upload form and the history shown beside it.
///
/// Nothing is sent until [`submit`](Self::submit) and every precondition is
/// checked locally first, so an invalid form never costs a request.
pub struct UploadWorkflow {
    api: Arc<dyn ExchangeApi>,
    session: SessionContext,
    rbac: RbacEnforcer,
    policy: UploadPolicy,
    file: Option<SelectedFile>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    client: Option<ClientId>,
    state: UploadState,
    history: Vec<HistoryEntry>,
}

impl std::fmt::Debug for UploadWorkflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadWorkflow")
            .field("file", &self.file)
            .field("start", &self.start)
            .field("end", &self.end)
            .field("client", &self.client)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl UploadWorkflow {
    pub fn new(
        api: Arc<dyn ExchangeApi>,
        session: SessionContext,
        rbac: RbacEnforcer,
        policy: UploadPolicy,
    ) -> Self {
        Self {
            api,
            session,
            rbac,
            policy,
            file: None,
            start: None,
            end: None,
            client: None,
            state: UploadState::Idle,
            history: Vec::new(),
        }
    }

    pub fn state(&self) -> &UploadState {
        &self.state
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn selected_client(&self) -> Option<ClientId> {
        self.client
    }

    /// Pick the file to upload.
    ///
    /// A rejected file leaves nothing selected and the state `Failed`.
    pub fn select_file(&mut self, file: SelectedFile) -> AppResult<()> {
        self.state = UploadState::Validating;
        self.file = None;

        match self.policy.check(&file) {
            Ok(()) => {
                self.file = Some(file);
                self.state = UploadState::Idle;
                Ok(())
            }
            Err(err) => {
                warn!(name = %file.name, reason = %err.message, "Rejected file selection");
                self.state = UploadState::Failed(err.clone());
                Err(err)
            }
        }
    }

    pub fn clear_file(&mut self) {
        self.file = None;
    }

    /// Record the date range. Checked on submit.
    pub fn set_date_range(&mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) {
        self.start = start;
        self.end = end;
    }

    /// Target client for admin uploads.
    pub fn select_client(&mut self, client: Option<ClientId>) {
        self.client = client;
    }

    /// Validate the form and send it.
    pub async fn submit(&mut self) -> AppResult<UploadReceipt> {
        let session = self.session.require().await?;
        self.rbac
            .require_permission(&session.role, &ConsolePermission::FileUpload)?;

        let request = self.build_request(session.role.is_admin())?;

        self.state = UploadState::Uploading;
        match self.api.upload_file(&request).await {
            Ok(receipt) => {
                info!(name = %request.file.name, range = %request.range, "Upload complete");
                self.state = UploadState::Success(receipt.clone());
                self.file = None;
                self.start = None;
                self.end = None;
                self.client = None;

                if let Err(e) = self.fetch_history(request.client_id).await {
                    warn!(error = %e, "Failed to refresh upload history");
                }
                Ok(receipt)
            }
            Err(err) => {
                warn!(name = %request.file.name, error = %err, "Upload failed");
                self.state = UploadState::Failed(err.clone());
                Err(err)
            }
        }
    }

    /// Reload the history list.
    pub async fn refresh_history(&mut self) -> AppResult<&[HistoryEntry]> {
        let session = self.session.require().await?;
        self.rbac
            .require_permission(&session.role, &ConsolePermission::HistoryView)?;
        let client = if session.role.is_admin() { self.client } else { None };
        self.fetch_history(client).await?;
        Ok(&self.history)
    }

    async fn fetch_history(&mut self, client: Option<ClientId>) -> AppResult<()> {
        self.history = self.api.upload_history(client).await?;
        Ok(())
    }

    /// Preconditions in the order the user is told about them.
    fn build_request(&self, is_admin: bool) -> AppResult<UploadRequest> {
        let file = self
            .file
            .clone()
            .ok_or_else(|| AppError::validation(NO_FILE_MESSAGE))?;
        let (Some(start), Some(end)) = (self.start, self.end) else {
            return Err(AppError::validation(NO_DATES_MESSAGE));
        };
        let range = DateRange::new(start, end)?;
        if is_admin && self.client.is_none() {
            return Err(AppError::validation(NO_CLIENT_MESSAGE));
        }

        Ok(UploadRequest {
            file,
            range,
            client_id: if is_admin { self.client } else { None },
        })
    }
}
