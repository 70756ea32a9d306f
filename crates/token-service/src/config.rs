use secrecy::{ExposeSecret, SecretString};
use std::collections::HashMap;
use std::env;
use thiserror::Error;

/// Default token lifetime when `TOKEN_TTL_SECONDS` is not set (Twilio's own
/// library default).
pub const DEFAULT_TOKEN_TTL_SECONDS: i64 = 3600;

/// Shortest accepted token lifetime. Anything below this produces tokens
/// that expire before a call can be established.
pub const MIN_TOKEN_TTL_SECONDS: i64 = 60;

/// Longest accepted token lifetime (24 hours, the provider's hard ceiling).
pub const MAX_TOKEN_TTL_SECONDS: i64 = 86_400;

/// Expected length of Twilio account and API key SIDs.
const SID_LENGTH: usize = 34;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_address: String,
    /// Twilio account SID (`AC...`), embedded as the token `sub`.
    pub account_sid: String,
    /// Twilio API key SID (`SK...`), embedded as the token `iss`.
    pub api_key_sid: String,
    /// Twilio API key secret, used as the HS256 signing key. Never logged.
    pub api_key_secret: SecretString,
    pub token_ttl_seconds: i64,
    pub allowed_origins: CorsOrigins,
}

/// Origin policy for cross-origin requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    /// `Access-Control-Allow-Origin: *`
    Any,
    /// Exact allow-list of origins.
    List(Vec<String>),
}

impl CorsOrigins {
    /// Parse the `CORS_ALLOWED_ORIGINS` value: `*` means any origin,
    /// otherwise a comma-separated list of exact origins.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let raw = raw.trim();
        if raw == "*" {
            return Ok(CorsOrigins::Any);
        }

        let mut origins = Vec::new();
        for entry in raw.split(',') {
            let origin = entry.trim();
            if origin.is_empty() {
                return Err(ConfigError::InvalidOrigin(
                    "Empty entry in origin allow-list".to_string(),
                ));
            }
            if !(origin.starts_with("http://") || origin.starts_with("https://")) {
                return Err(ConfigError::InvalidOrigin(format!(
                    "Origin must be an http(s) URL: {origin}"
                )));
            }
            origins.push(origin.to_string());
        }

        if origins.is_empty() {
            return Err(ConfigError::InvalidOrigin(
                "Origin allow-list is empty".to_string(),
            ));
        }

        Ok(CorsOrigins::List(origins))
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid signing credential {variable}: {reason}")]
    InvalidCredential { variable: String, reason: String },

    #[error("Invalid token TTL: {0}")]
    InvalidTokenTtl(String),

    #[error("Invalid CORS origin configuration: {0}")]
    InvalidOrigin(String),
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing)
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let bind_address = vars
            .get("BIND_ADDRESS")
            .cloned()
            .unwrap_or_else(|| "0.0.0.0:8080".to_string());

        let account_sid = require_sid(vars, "TWILIO_ACCOUNT_SID", "AC")?;
        let api_key_sid = require_sid(vars, "TWILIO_API_KEY_SID", "SK")?;

        let api_key_secret = vars
            .get("TWILIO_API_KEY_SECRET")
            .ok_or_else(|| ConfigError::MissingEnvVar("TWILIO_API_KEY_SECRET".to_string()))?;

        if api_key_secret.is_empty() {
            return Err(ConfigError::InvalidCredential {
                variable: "TWILIO_API_KEY_SECRET".to_string(),
                reason: "Secret must not be empty".to_string(),
            });
        }

        let token_ttl_seconds = match vars.get("TOKEN_TTL_SECONDS") {
            Some(raw) => raw
                .parse::<i64>()
                .map_err(|e| ConfigError::InvalidTokenTtl(format!("Not an integer: {e}")))?,
            None => DEFAULT_TOKEN_TTL_SECONDS,
        };

        if !(MIN_TOKEN_TTL_SECONDS..=MAX_TOKEN_TTL_SECONDS).contains(&token_ttl_seconds) {
            return Err(ConfigError::InvalidTokenTtl(format!(
                "Expected {MIN_TOKEN_TTL_SECONDS}-{MAX_TOKEN_TTL_SECONDS} seconds, got {token_ttl_seconds}"
            )));
        }

        let allowed_origins = match vars.get("CORS_ALLOWED_ORIGINS") {
            Some(raw) => CorsOrigins::parse(raw)?,
            None => CorsOrigins::Any,
        };

        Ok(Config {
            bind_address,
            account_sid,
            api_key_sid,
            api_key_secret: SecretString::from(api_key_secret.clone()),
            token_ttl_seconds,
            allowed_origins,
        })
    }

    /// The signing key bytes for HS256 token signatures.
    pub fn signing_secret(&self) -> &[u8] {
        self.api_key_secret.expose_secret().as_bytes()
    }
}

fn require_sid(
    vars: &HashMap<String, String>,
    variable: &str,
    prefix: &str,
) -> Result<String, ConfigError> {
    let value = vars
        .get(variable)
        .ok_or_else(|| ConfigError::MissingEnvVar(variable.to_string()))?;

    if !value.starts_with(prefix) {
        return Err(ConfigError::InvalidCredential {
            variable: variable.to_string(),
            reason: format!("Expected prefix {prefix}"),
        });
    }

    if value.len() != SID_LENGTH {
        return Err(ConfigError::InvalidCredential {
            variable: variable.to_string(),
            reason: format!("Expected {SID_LENGTH} characters, got {}", value.len()),
        });
    }

    Ok(value.clone())
}
