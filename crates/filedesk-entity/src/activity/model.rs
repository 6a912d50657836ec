//! Activity log entry model.

use serde::{Deserialize, Serialize};

use filedesk_core::types::FileId;

/// One recorded action (`upload`, `download`, ...). Append-only on the
/// server and shown verbatim by the console.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityLogEntry {
    /// Username that performed the action.
    pub user: String,
    /// The action performed.
    pub action: String,
    /// File the action touched, if any.
    #[serde(default)]
    pub file_id: Option<FileId>,
    /// Server timestamp, kept as sent.
    #[serde(default, deserialize_with = "crate::wire::text")]
    pub timestamp: String,
}
