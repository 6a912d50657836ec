//! RBAC enforcement: rejects screens and actions a role may not use.
//!
//! The backend enforces its own rules; this guard keeps the console from
//! offering, or sending, requests that are bound to be refused.

use filedesk_core::error::AppError;
use filedesk_entity::user::Role;

use super::policies::{ConsolePermission, RbacPolicies, Screen};

/// Enforces role-based access control for console screens and actions.
#[derive(Debug, Clone, Default)]
pub struct RbacEnforcer {
    /// The policy configuration.
    policies: RbacPolicies,
}

impl RbacEnforcer {
    /// Creates a new enforcer with the default policy set.
    pub fn new() -> Self {
        Self {
            policies: RbacPolicies::new(),
        }
    }

    /// Creates an enforcer with custom policies.
    pub fn with_policies(policies: RbacPolicies) -> Self {
        Self { policies }
    }

    /// Checks whether the given role has the required permission.
    pub fn require_permission(
        &self,
        role: &Role,
        permission: &ConsolePermission,
    ) -> Result<(), AppError> {
        if self.policies.has_permission(role, permission) {
            Ok(())
        } else {
            Err(AppError::authorization(format!(
                "Role '{role}' does not have permission '{permission:?}'"
            )))
        }
    }

    /// Checks whether the given role may open `screen`.
    pub fn require_screen(&self, role: &Role, screen: &Screen) -> Result<(), AppError> {
        if self.policies.can_view(role, screen) {
            Ok(())
        } else {
            Err(AppError::authorization(format!(
                "The {screen} screen is not available to role '{role}'"
            )))
        }
    }

    pub fn has_permission(&self, role: &Role, permission: &ConsolePermission) -> bool {
        self.policies.has_permission(role, permission)
    }

    pub fn visible_screens(&self, role: &Role) -> Vec<Screen> {
        self.policies.screens_for_role(role)
    }

    /// Returns a reference to the underlying policies.
    pub fn policies(&self) -> &RbacPolicies {
        &self.policies
    }
}
