// src/config.rs
use crate::application::services::TokenTtls;
use std::{env, time::Duration};
use thiserror::Error;

const MIN_SECRET_LEN: usize = 32;

#[derive(Clone, Debug)]
pub struct AppConfig {
    listen_addr: String,
    redis_url: String,
    code_signing_secret: String,
    access_signing_secret: String,
    refresh_signing_secret: String,
    token_ttls: TokenTtls,
    session_validator_url: String,
    session_validator_api_key: Option<String>,
    scope_authority_url: String,
    upstream_timeout: Duration,
}

/// Startup-time failures. A missing or weak signing secret is fatal; it is
/// never surfaced as a per-request error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
    #[error("misconfigured secret: {0}")]
    MisconfiguredSecret(String),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

fn default_listen_addr() -> String {
    "127.0.0.1:8080".into()
}

fn default_redis_url() -> String {
    "redis://127.0.0.1:6379/0".into()
}

fn parse_duration_secs(
    name: &str,
    value: Option<String>,
    default_secs: u64,
) -> Result<Duration, ConfigError> {
    let secs = match value {
        Some(raw) => raw
            .parse::<u64>()
            .map_err(|_| ConfigError::Invalid(format!("{name} must be a number of seconds")))?,
        None => default_secs,
    };
    Ok(Duration::from_secs(secs))
}

fn env_duration_secs(name: &str, default_secs: u64) -> Result<Duration, ConfigError> {
    parse_duration_secs(name, env::var(name).ok(), default_secs)
}

fn validated_secret(name: &'static str, value: Option<String>) -> Result<String, ConfigError> {
    let value = value.ok_or(ConfigError::Missing(name))?;
    if value.len() < MIN_SECRET_LEN {
        return Err(ConfigError::MisconfiguredSecret(format!(
            "{name} must be at least {MIN_SECRET_LEN} bytes"
        )));
    }
    Ok(value)
}

// Key separation between code/access/refresh is a hard requirement.
fn ensure_distinct_secrets(code: &str, access: &str, refresh: &str) -> Result<(), ConfigError> {
    if code == access || code == refresh || access == refresh {
        return Err(ConfigError::MisconfiguredSecret(
            "code, access, and refresh signing secrets must be pairwise distinct".into(),
        ));
    }
    Ok(())
}

fn required_secret(name: &'static str) -> Result<String, ConfigError> {
    validated_secret(name, env::var(name).ok())
}

impl AppConfig {
    /// Build configuration from environment variables. Uses sensible defaults
    /// for optional values and validates required keys. This is the only
    /// place the process environment is read; components receive the values
    /// they need through constructors.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Allow dotenv files to populate env vars when present.
        dotenvy::dotenv().ok();

        let listen_addr = env::var("LISTEN_ADDR").unwrap_or_else(|_| default_listen_addr());
        let redis_url = env::var("REDIS_URL").unwrap_or_else(|_| default_redis_url());

        let code_signing_secret = required_secret("OAUTH_CODE_SIGNING_SECRET")?;
        let access_signing_secret = required_secret("OAUTH_ACCESS_SIGNING_SECRET")?;
        let refresh_signing_secret = required_secret("OAUTH_REFRESH_SIGNING_SECRET")?;

        ensure_distinct_secrets(
            &code_signing_secret,
            &access_signing_secret,
            &refresh_signing_secret,
        )?;

        let token_ttls = TokenTtls {
            code: env_duration_secs("AUTH_CODE_TTL_SECONDS", 120)?,
            access: env_duration_secs("ACCESS_TOKEN_TTL_SECONDS", 3600)?,
            refresh: env_duration_secs("REFRESH_TOKEN_TTL_SECONDS", 30 * 24 * 3600)?,
        };

        let session_validator_url = env::var("SESSION_VALIDATOR_URL")
            .map_err(|_| ConfigError::Missing("SESSION_VALIDATOR_URL"))?;
        let session_validator_api_key = env::var("SESSION_VALIDATOR_API_KEY").ok();

        let scope_authority_url = env::var("SCOPE_AUTHORITY_URL")
            .map_err(|_| ConfigError::Missing("SCOPE_AUTHORITY_URL"))?;

        let upstream_timeout = env_duration_secs("UPSTREAM_TIMEOUT_SECONDS", 5)?;

        Ok(Self {
            listen_addr,
            redis_url,
            code_signing_secret,
            access_signing_secret,
            refresh_signing_secret,
            token_ttls,
            session_validator_url,
            session_validator_api_key,
            scope_authority_url,
            upstream_timeout,
        })
    }

    pub fn listen_addr(&self) -> &str {
        &self.listen_addr
    }

    pub fn redis_url(&self) -> &str {
        &self.redis_url
    }

    pub fn code_signing_secret(&self) -> &str {
        &self.code_signing_secret
    }

    pub fn access_signing_secret(&self) -> &str {
        &self.access_signing_secret
    }

    pub fn refresh_signing_secret(&self) -> &str {
        &self.refresh_signing_secret
    }

    pub fn token_ttls(&self) -> TokenTtls {
        self.token_ttls
    }

    pub fn session_validator_url(&self) -> &str {
        &self.session_validator_url
    }

    pub fn session_validator_api_key(&self) -> Option<&str> {
        self.session_validator_api_key.as_deref()
    }

    pub fn scope_authority_url(&self) -> &str {
        &self.scope_authority_url
    }

    /// Request-scoped timeout applied to outbound identity-provider and
    /// scope-authority calls.
    pub fn upstream_timeout(&self) -> Duration {
        self.upstream_timeout
    }
}
