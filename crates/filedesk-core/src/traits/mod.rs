//! Traits defined in `filedesk-core` and implemented by other crates.

pub mod confirm;

pub use confirm::{AutoConfirm, Confirmer};
