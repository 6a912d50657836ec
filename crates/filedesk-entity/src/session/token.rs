//! Login reply.

use serde::{Deserialize, Serialize};

/// Body returned by `POST /auth/login`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AccessToken {
    /// The raw bearer token.
    pub access_token: String,
    /// Token scheme, `"bearer"` for this backend.
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("token_type", &self.token_type)
            .finish_non_exhaustive()
    }
}

fn default_token_type() -> String {
    "bearer".to_string()
}
