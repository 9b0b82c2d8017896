//! Chat session cookie configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

const MIN_TTL_SECS: u64 = 60;
const MAX_TTL_SECS: u64 = 30 * 24 * 3600;

/// Session cookie and expiry settings
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Lifetime of an idle conversation in seconds
    #[serde(default = "default_ttl")]
    pub ttl_secs: u64,

    /// Secure cookie flag; unset means "only in production"
    pub secure: Option<bool>,
}

impl SessionConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    /// Resolves the Secure flag against the environment.
    pub fn secure_cookie(&self, is_production: bool) -> bool {
        self.secure.unwrap_or(is_production)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let valid_name = !self.cookie_name.is_empty()
            && self
                .cookie_name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid_name {
            return Err(ValidationError::InvalidCookieName);
        }
        if !(MIN_TTL_SECS..=MAX_TTL_SECS).contains(&self.ttl_secs) {
            return Err(ValidationError::InvalidSessionTtl);
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            ttl_secs: default_ttl(),
            secure: None,
        }
    }
}

fn default_cookie_name() -> String {
    "webdoctor_session".to_string()
}

fn default_ttl() -> u64 {
    3600
}
