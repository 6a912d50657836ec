//! Activity log, admin only.

use std::sync::Arc;

use filedesk_auth::{ConsolePermission, RbacEnforcer, SessionContext};
use filedesk_client::ExchangeApi;
use filedesk_core::AppResult;
use filedesk_entity::activity::ActivityLogEntry;

use super::loadable::Loadable;

/// Activity log entries, exactly as the server returns them.
pub struct AnalyticsScreen {
    api: Arc<dyn ExchangeApi>,
    session: SessionContext,
    rbac: RbacEnforcer,
    entries: Loadable<Vec<ActivityLogEntry>>,
}

impl AnalyticsScreen {
    pub fn new(api: Arc<dyn ExchangeApi>, session: SessionContext, rbac: RbacEnforcer) -> Self {
        Self {
            api,
            session,
            rbac,
            entries: Loadable::Loading,
        }
    }

    pub fn entries(&self) -> &Loadable<Vec<ActivityLogEntry>> {
        &self.entries
    }

    pub async fn load(&mut self) -> AppResult<Vec<ActivityLogEntry>> {
        let session = self.session.require().await?;
        self.rbac
            .require_permission(&session.role, &ConsolePermission::ActivityLogView)?;

        self.entries = Loadable::Loading;
        let result = self.api.activity_logs().await;
        self.entries = Loadable::from_result(result.clone());
        result
    }
}
