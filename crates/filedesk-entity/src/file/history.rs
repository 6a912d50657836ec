//! Upload history entry.

use serde::{Deserialize, Serialize};

/// One row of `GET /files/history`.
///
/// The history endpoint uses its own shape, distinct from [`FileRecord`],
/// and older deployments leave fields out, so every field is optional.
///
/// [`FileRecord`]: super::FileRecord
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(default)]
    pub name: Option<String>,
    /// Size in bytes.
    #[serde(default)]
    pub size: Option<u64>,
    /// MIME type as recorded by the server.
    #[serde(default, rename = "type")]
    pub mime_type: Option<String>,
    /// Upload timestamp, as sent.
    #[serde(default)]
    pub date: Option<String>,
    /// Processing status reported by the server.
    #[serde(default)]
    pub status: Option<String>,
}
