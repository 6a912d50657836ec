//! Upload and download configuration.

use serde::{Deserialize, Serialize};

/// MIME type of legacy `.xls` workbooks.
pub const XLS_MIME: &str = "application/vnd.ms-excel";

/// MIME type of `.xlsx` workbooks.
pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Upload limits. These are client-side checks only; the backend enforces
/// its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Largest file accepted for upload, in bytes.
    #[serde(default = "default_max_size")]
    pub max_size_bytes: u64,
    /// MIME types accepted for upload.
    #[serde(default = "default_mime_types")]
    pub accepted_mime_types: Vec<String>,
    /// Directory downloads are written to when no output is given.
    #[serde(default = "default_download_dir")]
    pub download_dir: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_size_bytes: default_max_size(),
            accepted_mime_types: default_mime_types(),
            download_dir: default_download_dir(),
        }
    }
}

fn default_max_size() -> u64 {
    100 * 1024 * 1024
}

fn default_mime_types() -> Vec<String> {
    vec![XLS_MIME.to_string(), XLSX_MIME.to_string()]
}

fn default_download_dir() -> String {
    "downloads".to_string()
}
