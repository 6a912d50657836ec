//! # filedesk-auth
//!
//! Session handling and role gating for the FileDesk console.
//!
//! ## Modules
//!
//! - `jwt` — reading claims out of the backend's access token
//! - `session` — session persistence, the process-wide session context and
//!   role resolution
//! - `rbac` — which screens and actions each role may use

pub mod jwt;
pub mod rbac;
pub mod session;

pub use jwt::TokenClaims;
pub use rbac::{ConsolePermission, RbacEnforcer, RbacPolicies, Screen};
pub use session::{
    FileSessionStore, MemorySessionStore, RoleResolver, SessionContext, SessionStore,
};
