//! A local file picked for upload.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use filedesk_core::error::{AppError, ErrorKind};

/// The file part of a pending upload: where it lives on disk and what the
/// console knows about it before sending it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedFile {
    /// Location on the local filesystem.
    pub path: PathBuf,
    /// File name sent to the server.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Detected MIME type.
    pub mime_type: String,
}

impl SelectedFile {
    /// Describe the file at `path`: size from its metadata, MIME type from
    /// its extension.
    pub fn inspect(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path).map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Cannot read {}", path.display()),
                e,
            )
        })?;
        if !metadata.is_file() {
            return Err(AppError::validation(format!(
                "{} is not a file",
                path.display()
            )));
        }

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();

        let mime_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .to_string();

        Ok(Self {
            path: path.to_path_buf(),
            name,
            size: metadata.len(),
            mime_type,
        })
    }
}
