//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables with the
//! `config` and `dotenvy` crates. Variables use the `WEBDOCTOR` prefix and
//! nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use webdoctor::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod database;
mod email;
mod error;
mod server;
mod session;

pub use ai::AiConfig;
pub use database::DatabaseConfig;
pub use email::EmailConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, LogFormat, ServerConfig};
pub use session::SessionConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load with [`AppConfig::load()`], then call [`AppConfig::validate()`]
/// before building adapters from it.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    /// OpenAI gateway; the API key is required
    #[serde(default)]
    pub ai: AiConfig,

    /// PostgreSQL; absent means in-memory stores
    pub database: Option<DatabaseConfig>,

    #[serde(default)]
    pub session: SessionConfig,

    /// Resend; absent means reports are only logged
    pub email: Option<EmailConfig>,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// - `WEBDOCTOR__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `WEBDOCTOR__AI__OPENAI_API_KEY=...` -> `ai.openai_api_key = ...`
    /// - `WEBDOCTOR__DATABASE__URL=...` -> `database.url = ...`
    ///
    /// A `.env` file is read first when present.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::with_prefix("WEBDOCTOR")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate()?;
        self.session.validate()?;
        if let Some(database) = &self.database {
            database.validate()?;
        }
        if let Some(email) = &self.email {
            email.validate()?;
        }
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }

    /// Secure flag for the session cookie.
    pub fn secure_cookie(&self) -> bool {
        self.session.secure_cookie(self.is_production())
    }
}
