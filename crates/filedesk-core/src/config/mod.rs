//! Console configuration schemas.
//!
//! The configuration is merged from TOML files and `FILEDESK__*`
//! environment variables via the `config` crate. Every field has a default,
//! so the console runs with no configuration file at all.

pub mod api;
pub mod logging;
pub mod session;
pub mod upload;

use serde::{Deserialize, Serialize};

pub use self::api::{AdminPrefix, ApiConfig};
pub use self::logging::LoggingConfig;
pub use self::session::{RoleSource, SessionConfig};
pub use self::upload::UploadConfig;

use crate::error::AppError;

/// Root console configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Backend connection settings.
    #[serde(default)]
    pub api: ApiConfig,
    /// Session persistence and role resolution.
    #[serde(default)]
    pub session: SessionConfig,
    /// Upload limits and download location.
    #[serde(default)]
    pub upload: UploadConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ConsoleConfig {
    /// Load configuration.
    ///
    /// Sources, lowest precedence first: the base file `path` (extension
    /// optional), `config/{env}`, then environment variables such as
    /// `FILEDESK__API__BASE_URL`. Missing files are skipped.
    pub fn load(path: &str, env: &str) -> Result<Self, AppError> {
        let base = path.trim_end_matches(".toml");

        let config = config::Config::builder()
            .add_source(config::File::with_name(base).required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("FILEDESK")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let loaded: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        loaded.validate()?;
        Ok(loaded)
    }

    /// Reject values the console cannot work with.
    pub fn validate(&self) -> Result<(), AppError> {
        if !(self.api.base_url.starts_with("http://") || self.api.base_url.starts_with("https://"))
        {
            return Err(AppError::configuration(format!(
                "api.base_url must be an http(s) URL, got '{}'",
                self.api.base_url
            )));
        }
        if self.api.timeout_seconds == 0 {
            return Err(AppError::configuration(
                "api.timeout_seconds must be greater than zero",
            ));
        }
        if self.upload.max_size_bytes == 0 {
            return Err(AppError::configuration(
                "upload.max_size_bytes must be greater than zero",
            ));
        }
        if self.upload.accepted_mime_types.is_empty() {
            return Err(AppError::configuration(
                "upload.accepted_mime_types must list at least one type",
            ));
        }
        Ok(())
    }
}
