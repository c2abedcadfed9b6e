use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

/// Local profile record for one account. `subject_id` is the identity
/// provider's identifier; credentials never touch this service's storage.
#[derive(Debug, Clone)]
pub struct Profile {
    pub id: Uuid,
    pub subject_id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub born_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Account details forwarded to the identity provider on registration.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub born_date: NaiveDate,
}

/// Outcome of a credential check at the identity provider.
#[derive(Debug, Clone)]
pub struct CredentialCheck {
    pub valid: bool,
    /// Provider-issued token, when the provider returns one on success.
    pub token: Option<String>,
}

/// One-time passcode length in characters.
pub const OTP_LEN: usize = 6;

/// Default one-time passcode time-to-live in seconds.
pub const DEFAULT_OTP_TTL_SECS: u64 = 300;

/// Default session token validity window in seconds (7 days).
pub const DEFAULT_SESSION_TOKEN_TTL_SECS: u64 = 7 * 24 * 60 * 60;

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Shallow shape check for email addresses. Anything stricter belongs to
/// the identity provider, which owns the account namespace.
pub fn validate_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace)
}
