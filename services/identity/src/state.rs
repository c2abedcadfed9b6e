use deadpool_redis::Pool as RedisPool;
use sea_orm::DatabaseConnection;

use crate::infra::db::DbProfileRepository;
use crate::infra::email::SmtpMailer;
use crate::infra::otp::RedisOtpStore;
use crate::infra::provider::{HttpCredentialProvider, ProviderSettings};

/// Shared application state passed to every handler via axum `State`.
///
/// Connections are owned here and injected into per-request adapters; no
/// adapter reaches for a global client.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub redis: RedisPool,
    pub http: reqwest::Client,
    pub mailer: SmtpMailer,
    pub provider_settings: ProviderSettings,
    pub jwt_secret: String,
    pub otp_ttl_secs: u64,
    pub session_token_ttl_secs: u64,
}

impl AppState {
    pub fn otp_store(&self) -> RedisOtpStore {
        RedisOtpStore {
            pool: self.redis.clone(),
            ttl_secs: self.otp_ttl_secs,
        }
    }

    pub fn profile_repo(&self) -> DbProfileRepository {
        DbProfileRepository {
            db: self.db.clone(),
        }
    }

    pub fn credential_provider(&self) -> HttpCredentialProvider {
        HttpCredentialProvider {
            http: self.http.clone(),
            settings: self.provider_settings.clone(),
        }
    }

    pub fn mailer(&self) -> SmtpMailer {
        self.mailer.clone()
    }
}
