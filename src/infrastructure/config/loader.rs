use anyhow::{Context, Result};
use figment::providers::{Env, Serialized};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::Config;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid port: 0 is not a usable listen port")]
    InvalidPort,

    #[error("auth.base_url cannot be empty while the auth gate is enabled")]
    EmptyAuthBaseUrl,

    #[error("Invalid URL for {field}: {value}")]
    InvalidUrl { field: &'static str, value: String },

    #[error(
        "cors.trusted_origins is empty while the auth gate is enabled; \
         credentialed requests require an explicit origin allow-list \
         (set TASKDECK_CORS__TRUSTED_ORIGINS or disable the gate)"
    )]
    MissingTrustedOrigins,
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. Environment variables (`TASKDECK_*` prefix, `__` splits sections)
    ///
    /// A validation failure here is fatal at startup; misconfiguration is
    /// never handled per-request.
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Env::prefixed("TASKDECK_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.server.port == 0 {
            return Err(ConfigError::InvalidPort);
        }

        if config.auth.enabled && config.auth.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyAuthBaseUrl);
        }

        for (field, value) in [
            ("auth.base_url", &config.auth.base_url),
            ("metadata.mcp_url", &config.metadata.mcp_url),
            ("metadata.oauth_discovery_url", &config.metadata.oauth_discovery_url),
        ] {
            if !value.starts_with("http://") && !value.starts_with("https://") {
                return Err(ConfigError::InvalidUrl { field, value: value.clone() });
            }
        }

        // Cookies are forwarded cross-origin, so "any origin + credentials"
        // is rejected outright. With the gate disabled the service runs in
        // permissive single-tenant mode and an empty list means allow-all.
        if config.auth.enabled && config.cors.trusted_origins.is_empty() {
            return Err(ConfigError::MissingTrustedOrigins);
        }

        Ok(())
    }
}
