//! Which screen the console shows, gated by role.

use tracing::{debug, info, warn};

use filedesk_auth::{RbacEnforcer, Screen};
use filedesk_core::AppResult;
use filedesk_core::error::AppError;
use filedesk_core::traits::Confirmer;
use filedesk_entity::session::Session;
use filedesk_entity::user::Role;

use crate::session::SessionService;

/// Top-level console state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellState {
    /// Only the login prompt is available.
    Unauthenticated,
    /// Logged in, showing `screen`.
    Authenticated { role: Role, screen: Screen },
}

/// Tracks the active screen and refuses screens the role may not see.
#[derive(Debug, Clone)]
pub struct NavigationShell {
    rbac: RbacEnforcer,
    state: ShellState,
}

impl NavigationShell {
    pub fn new(rbac: RbacEnforcer) -> Self {
        Self {
            rbac,
            state: ShellState::Unauthenticated,
        }
    }

    /// Start from a restored session, if any.
    pub fn from_session(rbac: RbacEnforcer, session: Option<&Session>) -> Self {
        let mut shell = Self::new(rbac);
        if let Some(session) = session {
            shell.on_login(session);
        }
        shell
    }

    pub fn state(&self) -> ShellState {
        self.state
    }

    pub fn role(&self) -> Option<Role> {
        match self.state {
            ShellState::Authenticated { role, .. } => Some(role),
            ShellState::Unauthenticated => None,
        }
    }

    pub fn current_screen(&self) -> Option<Screen> {
        match self.state {
            ShellState::Authenticated { screen, .. } => Some(screen),
            ShellState::Unauthenticated => None,
        }
    }

    /// Enter the authenticated state on the dashboard.
    pub fn on_login(&mut self, session: &Session) {
        self.state = ShellState::Authenticated {
            role: session.role,
            screen: Screen::Dashboard,
        };
        debug!(role = %session.role, "Shell authenticated");
    }

    /// Screens offered in the menu, in order. Empty when logged out.
    pub fn visible_screens(&self) -> Vec<Screen> {
        self.role()
            .map(|role| self.rbac.visible_screens(&role))
            .unwrap_or_default()
    }

    pub fn can_view(&self, screen: Screen) -> bool {
        self.role()
            .is_some_and(|role| self.rbac.policies().can_view(&role, &screen))
    }

    /// Switch screens. A screen the role cannot see is refused and the
    /// current screen is kept.
    pub fn navigate(&mut self, screen: Screen) -> AppResult<Screen> {
        let ShellState::Authenticated { role, screen: current } = self.state else {
            return Err(AppError::session("Not logged in"));
        };

        if let Err(err) = self.rbac.require_screen(&role, &screen) {
            warn!(%role, requested = %screen, %current, "Navigation refused");
            return Err(err);
        }

        self.state = ShellState::Authenticated { role, screen };
        Ok(screen)
    }

    /// Ask for confirmation, then end the session.
    ///
    /// Returns `false` when the user cancels; nothing changes in that case.
    pub async fn logout(
        &mut self,
        sessions: &SessionService,
        confirmer: &dyn Confirmer,
    ) -> AppResult<bool> {
        if !confirmer.confirm("Are you sure you want to log out?")? {
            info!("Logout cancelled");
            return Ok(false);
        }

        self.state = ShellState::Unauthenticated;
        sessions.logout().await?;
        Ok(true)
    }
}
