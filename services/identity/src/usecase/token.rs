use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::IdentityError;

/// JWT claims for a bearer session token. `sub` is the local profile id.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub exp: u64,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

/// Sign a session token for `subject`, expiring `ttl_secs` from now.
///
/// The signing secret is process-wide configuration loaded once at startup;
/// a missing secret is a startup failure, never a per-call error.
pub fn issue_session_token(
    subject: &str,
    secret: &str,
    ttl_secs: u64,
) -> Result<String, IdentityError> {
    let claims = SessionClaims {
        sub: subject.to_owned(),
        exp: now_secs() + ttl_secs,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| IdentityError::Internal(e.into()))
}

/// Validate signature and expiry, returning the embedded subject.
///
/// Expired and malformed tokens are told apart in the logs only; callers
/// see a single `InvalidToken` outcome for both.
pub fn verify_session_token(token: &str, secret: &str) -> Result<String, IdentityError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| {
        match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                tracing::debug!("session token expired");
            }
            _ => tracing::debug!("session token malformed or bad signature"),
        }
        IdentityError::InvalidToken
    })?;

    Ok(data.claims.sub)
}
