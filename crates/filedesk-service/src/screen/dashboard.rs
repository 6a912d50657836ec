//! The file list every role starts on.

use std::sync::Arc;

use tracing::debug;

use filedesk_auth::{ConsolePermission, RbacEnforcer, SessionContext};
use filedesk_client::ExchangeApi;
use filedesk_core::AppResult;
use filedesk_entity::file::FileRecord;

use super::loadable::Loadable;

/// Files visible to the logged-in user.
pub struct DashboardScreen {
    api: Arc<dyn ExchangeApi>,
    session: SessionContext,
    rbac: RbacEnforcer,
    files: Loadable<Vec<FileRecord>>,
}

impl DashboardScreen {
    pub fn new(api: Arc<dyn ExchangeApi>, session: SessionContext, rbac: RbacEnforcer) -> Self {
        Self {
            api,
            session,
            rbac,
            files: Loadable::Loading,
        }
    }

    pub fn files(&self) -> &Loadable<Vec<FileRecord>> {
        &self.files
    }

    /// Fetch the list. The screen keeps the outcome either way.
    pub async fn load(&mut self) -> AppResult<Vec<FileRecord>> {
        let session = self.session.require().await?;
        self.rbac
            .require_permission(&session.role, &ConsolePermission::FileList)?;

        self.files = Loadable::Loading;
        let result = self.api.list_files().await;
        if let Ok(files) = &result {
            debug!(count = files.len(), "Loaded dashboard files");
        }
        self.files = Loadable::from_result(result.clone());
        result
    }
}
