use serde::Deserialize;

use cuenta_core::config::Config;

use crate::domain::types::{DEFAULT_OTP_TTL_SECS, DEFAULT_SESSION_TOKEN_TTL_SECS};

/// Identity service configuration, loaded once from environment variables
/// at startup and immutable afterwards. Env var names are the upper-cased
/// field names (`DATABASE_URL`, `OTP_TTL_SECS`, ...).
#[derive(Debug, Deserialize)]
pub struct IdentityConfig {
    /// PostgreSQL connection URL (profile records).
    pub database_url: String,
    /// Redis connection URL (one-time passcode store).
    pub redis_url: String,
    /// HMAC secret for signing session tokens.
    pub jwt_secret: String,
    /// One-time passcode TTL in seconds (default 300).
    #[serde(default = "default_otp_ttl_secs")]
    pub otp_ttl_secs: u64,
    /// Session token validity window in seconds (default 7 days).
    #[serde(default = "default_session_token_ttl_secs")]
    pub session_token_ttl_secs: u64,
    /// Identity provider REST base URL (e.g. "https://graph.example.com/v1.0").
    pub provider_base_url: String,
    /// Identity provider OAuth token endpoint.
    pub provider_token_url: String,
    pub provider_client_id: String,
    pub provider_client_secret: String,
    /// Scope requested on provider grants.
    #[serde(default = "default_provider_scope")]
    pub provider_scope: String,
    /// SMTP relay host for reset mail.
    pub smtp_host: String,
    pub smtp_username: String,
    pub smtp_password: String,
    /// From address for outbound mail (e.g. "Cuenta <no-reply@cuenta.dev>").
    pub smtp_from: String,
    /// TCP port to listen on (default 3114).
    #[serde(default = "default_identity_port")]
    pub identity_port: u16,
}

impl Config for IdentityConfig {}

fn default_otp_ttl_secs() -> u64 {
    DEFAULT_OTP_TTL_SECS
}

fn default_session_token_ttl_secs() -> u64 {
    DEFAULT_SESSION_TOKEN_TTL_SECS
}

fn default_provider_scope() -> String {
    "https://graph.example.com/.default".to_owned()
}

fn default_identity_port() -> u16 {
    3114
}
