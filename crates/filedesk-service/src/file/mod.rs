//! File upload.

pub mod upload;

pub use upload::{UploadPolicy, UploadState, UploadWorkflow};
