#![allow(async_fn_in_trait)]

use uuid::Uuid;

use crate::domain::types::{CredentialCheck, NewAccount, Profile};
use crate::error::IdentityError;

/// Store for one-time reset passcodes. Expiry is the storage engine's job
/// (keys carry a TTL); no application-side sweep exists anywhere.
pub trait OtpStore: Send + Sync {
    /// Generate a fresh code and upsert the record for `email`, replacing
    /// any outstanding code. Returns the plaintext code for delivery.
    async fn issue(&self, email: &str) -> Result<String, IdentityError>;

    /// Resolve the owning email for a submitted code.
    async fn lookup_owner(&self, code: &str) -> Result<Option<String>, IdentityError>;

    /// Atomically delete the record matching `email` + `code`, returning
    /// whether one existed. The find and the delete MUST be a single
    /// storage operation: two callers racing on the same code must never
    /// both observe `true`.
    async fn verify_and_consume(&self, email: &str, code: &str) -> Result<bool, IdentityError>;
}

/// Repository for local profile records.
pub trait ProfileRepository: Send + Sync {
    async fn create(&self, profile: &Profile) -> Result<(), IdentityError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Profile>, IdentityError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>, IdentityError>;

    /// Delete a profile. Returns `true` if deleted, `false` if not found.
    async fn delete(&self, id: Uuid) -> Result<bool, IdentityError>;
}

/// Capability interface to the external identity provider. Every call is a
/// single attempt; retry policy belongs to callers outside this process.
pub trait CredentialProvider: Send + Sync {
    /// Create the provider-side account and return its subject id.
    async fn create_account(&self, account: &NewAccount) -> Result<String, IdentityError>;

    /// Delete the provider-side account. Returns `true` if one existed.
    async fn delete_account(&self, subject_id: &str) -> Result<bool, IdentityError>;

    /// Set a new password for the subject.
    async fn change_password(
        &self,
        subject_id: &str,
        new_password: &str,
    ) -> Result<(), IdentityError>;

    /// Check a credential pair against the provider.
    async fn validate_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<CredentialCheck, IdentityError>;
}

/// Outbound mail delivery for reset codes.
pub trait Mailer: Send + Sync {
    async fn send_reset_code(&self, to: &str, code: &str) -> Result<(), IdentityError>;
}
