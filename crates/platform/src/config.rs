//! Platform configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `LUXE_PLATFORM_URL` - Base URL of the hosted platform project
//! - `LUXE_PLATFORM_ANON_KEY` - Public (anon) API key
//!
//! ## Optional
//! - `LUXE_PLATFORM_SERVICE_KEY` - Privileged service-role key. Only the
//!   CLI utilities need this; it bypasses the platform's row-level access
//!   rules and must never ship with the storefront.
//! - `LUXE_DATA_DIR` - Root directory for client-local durable state
//!   (default: `.luxe`)

use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Errors that can occur while loading [`PlatformConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is missing.
    #[error("missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// The platform URL does not parse.
    #[error("invalid LUXE_PLATFORM_URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Connection settings for the hosted platform.
#[derive(Debug, Clone)]
pub struct PlatformConfig {
    /// Base URL of the platform project.
    pub url: Url,
    /// Public (anon) API key, sent with every unprivileged request.
    pub anon_key: SecretString,
    /// Privileged service-role key, if configured.
    pub service_key: Option<SecretString>,
    /// Root directory for client-local durable state.
    pub data_dir: PathBuf,
}

impl PlatformConfig {
    /// Load configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a required variable is missing or the
    /// platform URL is malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let url = std::env::var("LUXE_PLATFORM_URL")
            .map_err(|_| ConfigError::MissingEnvVar("LUXE_PLATFORM_URL"))?;
        let anon_key = std::env::var("LUXE_PLATFORM_ANON_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("LUXE_PLATFORM_ANON_KEY"))?;
        let service_key = std::env::var("LUXE_PLATFORM_SERVICE_KEY").ok();
        let data_dir = std::env::var("LUXE_DATA_DIR").unwrap_or_else(|_| ".luxe".to_owned());

        Ok(Self {
            url: Url::parse(&url)?,
            anon_key: anon_key.into(),
            service_key: service_key.map(Into::into),
            data_dir: PathBuf::from(data_dir),
        })
    }

    /// Build a config directly, mainly for tests.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if `url` does not parse.
    pub fn new(url: &str, anon_key: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            url: Url::parse(url)?,
            anon_key: anon_key.to_owned().into(),
            service_key: None,
            data_dir: PathBuf::from(".luxe"),
        })
    }

    /// Attach a privileged service-role key.
    #[must_use]
    pub fn with_service_key(mut self, key: &str) -> Self {
        self.service_key = Some(key.to_owned().into());
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_bad_url() {
        assert!(matches!(
            PlatformConfig::new("not a url", "key"),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_with_service_key() {
        let config = PlatformConfig::new("https://proj.example.co", "anon")
            .unwrap()
            .with_service_key("service");
        assert!(config.service_key.is_some());
    }
}
