//! # filedesk-core
//!
//! Core crate for the FileDesk console. Contains the unified error system,
//! configuration schemas, typed identifiers, the date-range value type and
//! the small traits shared by the service and CLI layers.
//!
//! This crate has **no** internal dependencies on other FileDesk crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
