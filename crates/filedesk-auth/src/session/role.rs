//! Role resolution at login.

use tracing::warn;

use filedesk_core::config::RoleSource;
use filedesk_core::error::AppError;
use filedesk_entity::user::Role;

use crate::jwt::TokenClaims;

/// Decides the role of a user who just logged in.
#[derive(Debug, Clone, Copy)]
pub struct RoleResolver {
    source: RoleSource,
}

impl RoleResolver {
    pub fn new(source: RoleSource) -> Self {
        Self { source }
    }

    pub fn source(&self) -> RoleSource {
        self.source
    }

    /// Resolves the role for `username`, given the decoded token claims
    /// (`None` when the token is opaque).
    pub fn resolve(&self, username: &str, claims: Option<&TokenClaims>) -> Result<Role, AppError> {
        match self.source {
            RoleSource::TokenClaim => claims.and_then(|c| c.role).ok_or_else(|| {
                AppError::authentication(
                    "Access token carries no role claim; set session.role_source = \"username\" for legacy backends",
                )
            }),
            RoleSource::Username => {
                if let Some(claimed) = claims.and_then(|c| c.role) {
                    let guessed = role_from_username(username);
                    if claimed != guessed {
                        warn!(
                            %username,
                            %claimed,
                            %guessed,
                            "Username-derived role disagrees with token claim"
                        );
                    }
                }
                Ok(role_from_username(username))
            }
        }
    }
}

/// Legacy username mapping: `admin` → admin, `employee1` → employee,
/// anything else → client.
pub fn role_from_username(username: &str) -> Role {
    match username {
        "admin" => Role::Admin,
        "employee1" => Role::Employee,
        _ => Role::Client,
    }
}
