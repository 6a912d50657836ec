//! Role-based access control for console screens and actions.

pub mod enforcer;
pub mod policies;

pub use enforcer::RbacEnforcer;
pub use policies::{ConsolePermission, RbacPolicies, Screen};
