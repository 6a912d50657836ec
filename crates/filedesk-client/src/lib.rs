//! # filedesk-client
//!
//! HTTP access to the file-exchange backend. [`ExchangeApi`] describes the
//! operations the console needs; [`ApiClient`] implements them with
//! `reqwest`, reading the bearer token from the shared
//! [`SessionContext`](filedesk_auth::SessionContext).

pub mod api;
pub mod client;
pub mod download;
pub mod endpoints;

pub use api::{ExchangeApi, UploadRequest};
pub use client::ApiClient;
pub use endpoints::{LOGIN_FAILED_MESSAGE, UPLOAD_FAILED_MESSAGE};
