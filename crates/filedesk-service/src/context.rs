//! Wiring of the console's shared pieces.

use std::sync::Arc;

use tracing::debug;

use filedesk_auth::{FileSessionStore, RbacEnforcer, RoleResolver, SessionContext, SessionStore};
use filedesk_client::{ApiClient, ExchangeApi};
use filedesk_core::AppResult;
use filedesk_core::config::ConsoleConfig;

use crate::admin::AdminFileBrowser;
use crate::file::{UploadPolicy, UploadWorkflow};
use crate::navigation::NavigationShell;
use crate::screen::{AnalyticsScreen, DashboardScreen};
use crate::session::SessionService;

/// Everything a command needs, built once per process.
///
/// Screens and workflows are created on demand and share the API client
/// and the session.
#[derive(Clone)]
pub struct ConsoleContext {
    pub config: ConsoleConfig,
    pub session: SessionContext,
    pub api: Arc<dyn ExchangeApi>,
    pub rbac: RbacEnforcer,
}

impl std::fmt::Debug for ConsoleContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleContext")
            .field("base_url", &self.config.api.base_url)
            .finish_non_exhaustive()
    }
}

impl ConsoleContext {
    /// Restore the persisted session and build the HTTP client.
    pub async fn from_config(config: ConsoleConfig) -> AppResult<Self> {
        let store: Arc<dyn SessionStore> = Arc::new(FileSessionStore::new(&config.session.path));
        let session = SessionContext::init(store).await?;
        let api = ApiClient::new(
            &config.api,
            session.clone(),
            config.session.logout_on_unauthorized,
        )?;
        debug!(base_url = %config.api.base_url, "Console context ready");

        Ok(Self::with_api(config, session, Arc::new(api)))
    }

    /// Assemble from existing parts.
    pub fn with_api(config: ConsoleConfig, session: SessionContext, api: Arc<dyn ExchangeApi>) -> Self {
        Self {
            config,
            session,
            api,
            rbac: RbacEnforcer::new(),
        }
    }

    pub fn sessions(&self) -> SessionService {
        SessionService::new(
            self.api.clone(),
            self.session.clone(),
            RoleResolver::new(self.config.session.role_source),
        )
    }

    pub async fn shell(&self) -> NavigationShell {
        NavigationShell::from_session(self.rbac.clone(), self.session.current().await.as_ref())
    }

    pub fn upload_workflow(&self) -> UploadWorkflow {
        UploadWorkflow::new(
            self.api.clone(),
            self.session.clone(),
            self.rbac.clone(),
            UploadPolicy::from_config(&self.config.upload),
        )
    }

    pub fn admin_browser(&self) -> AdminFileBrowser {
        AdminFileBrowser::new(self.api.clone(), self.session.clone(), self.rbac.clone())
    }

    pub fn dashboard(&self) -> DashboardScreen {
        DashboardScreen::new(self.api.clone(), self.session.clone(), self.rbac.clone())
    }

    pub fn analytics(&self) -> AnalyticsScreen {
        AnalyticsScreen::new(self.api.clone(), self.session.clone(), self.rbac.clone())
    }
}
