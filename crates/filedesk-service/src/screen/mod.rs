//! Read-only screens.

pub mod analytics;
pub mod dashboard;
pub mod loadable;

pub use analytics::AnalyticsScreen;
pub use dashboard::DashboardScreen;
pub use loadable::Loadable;
