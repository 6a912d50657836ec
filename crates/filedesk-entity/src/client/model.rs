//! Client organisation record.

use serde::{Deserialize, Serialize};

use filedesk_core::types::ClientId;

/// A client organisation, as listed by the admin endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRecord {
    pub id: ClientId,
    pub name: String,
}
