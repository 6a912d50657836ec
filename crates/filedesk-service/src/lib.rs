//! # filedesk-service
//!
//! Console workflows on top of the HTTP client: logging in and out,
//! role-gated navigation, the upload form, the admin file browser and the
//! read-only dashboard and analytics screens.
//!
//! Everything takes its collaborators at construction time; see
//! [`ConsoleContext`] for the standard wiring.

pub mod admin;
pub mod context;
pub mod file;
pub mod navigation;
pub mod screen;
pub mod session;

pub use admin::{AdminFileBrowser, BrowserState};
pub use context::ConsoleContext;
pub use file::{UploadPolicy, UploadState, UploadWorkflow};
pub use navigation::{NavigationShell, ShellState};
pub use screen::{AnalyticsScreen, DashboardScreen, Loadable};
pub use session::{Credentials, SessionService};

#[cfg(test)]
mod testing;
