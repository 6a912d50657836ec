//! Admin-only screens.

pub mod browser;

pub use browser::{AdminFileBrowser, BrowserState};
