//! File record model.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use filedesk_core::AppResult;
use filedesk_core::types::{ClientId, DateRange, FileId};

/// An uploaded file as listed by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Unique file identifier.
    pub id: FileId,
    /// Original file name (including extension).
    pub filename: String,
    /// Uploader; the backend sends either a user id or a username.
    #[serde(default, deserialize_with = "crate::wire::text")]
    pub uploaded_by: String,
    /// When the upload happened.
    #[serde(deserialize_with = "crate::wire::datetime")]
    pub uploaded_at: NaiveDateTime,
    /// First day covered by the file's data.
    pub start_date: NaiveDate,
    /// Last day covered by the file's data.
    pub end_date: NaiveDate,
    /// Owning client organisation, if any.
    #[serde(default)]
    pub client_id: Option<ClientId>,
    /// Server-side storage path, when the endpoint exposes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl FileRecord {
    /// The period covered by this file.
    pub fn date_range(&self) -> AppResult<DateRange> {
        DateRange::new(self.start_date, self.end_date)
    }

    /// Get the file extension (lowercase), if any.
    pub fn extension(&self) -> Option<String> {
        self.filename
            .rsplit('.')
            .next()
            .filter(|ext| *ext != self.filename)
            .map(|ext| ext.to_lowercase())
    }
}

/// Reply to `POST /files/upload`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadReceipt {
    /// Confirmation text from the server.
    #[serde(default)]
    pub msg: String,
    /// Id of the newly created record.
    #[serde(default)]
    pub file_id: Option<FileId>,
}
