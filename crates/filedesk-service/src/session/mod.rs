//! Session lifecycle.

pub mod service;

pub use service::{Credentials, SessionService};
