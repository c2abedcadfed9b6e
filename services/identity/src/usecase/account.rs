use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::domain::repository::{CredentialProvider, ProfileRepository};
use crate::domain::types::{MIN_PASSWORD_LEN, NewAccount, Profile, validate_email};
use crate::error::IdentityError;
use crate::usecase::token::issue_session_token;

// ── RegisterAccount ──────────────────────────────────────────────────────────

pub struct RegisterAccountInput {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub born_date: NaiveDate,
}

#[derive(Debug)]
pub struct RegisterAccountOutput {
    pub profile_id: Uuid,
    pub token: String,
}

pub struct RegisterAccountUseCase<C, P>
where
    C: CredentialProvider,
    P: ProfileRepository,
{
    pub provider: C,
    pub profiles: P,
    pub jwt_secret: String,
    pub token_ttl_secs: u64,
}

impl<C, P> RegisterAccountUseCase<C, P>
where
    C: CredentialProvider,
    P: ProfileRepository,
{
    pub async fn execute(
        &self,
        input: RegisterAccountInput,
    ) -> Result<RegisterAccountOutput, IdentityError> {
        if !validate_email(&input.email) {
            return Err(IdentityError::InvalidEmail);
        }
        if input.password.len() < MIN_PASSWORD_LEN {
            return Err(IdentityError::WeakPassword);
        }
        if self.profiles.find_by_email(&input.email).await?.is_some() {
            return Err(IdentityError::EmailTaken);
        }

        // Provider first: the local profile row carries the subject id the
        // provider hands back.
        let subject_id = self
            .provider
            .create_account(&NewAccount {
                email: input.email.clone(),
                password: input.password,
                first_name: input.first_name.clone(),
                last_name: input.last_name.clone(),
                born_date: input.born_date,
            })
            .await?;

        let now = Utc::now();
        let profile = Profile {
            id: Uuid::now_v7(),
            subject_id,
            email: input.email,
            first_name: input.first_name,
            last_name: input.last_name,
            born_date: input.born_date,
            created_at: now,
            updated_at: now,
        };
        self.profiles.create(&profile).await?;

        let token =
            issue_session_token(&profile.id.to_string(), &self.jwt_secret, self.token_ttl_secs)?;

        Ok(RegisterAccountOutput {
            profile_id: profile.id,
            token,
        })
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug)]
pub struct LoginOutput {
    pub profile_id: Uuid,
    pub token: String,
}

pub struct LoginUseCase<C, P>
where
    C: CredentialProvider,
    P: ProfileRepository,
{
    pub provider: C,
    pub profiles: P,
    pub jwt_secret: String,
    pub token_ttl_secs: u64,
}

impl<C, P> LoginUseCase<C, P>
where
    C: CredentialProvider,
    P: ProfileRepository,
{
    pub async fn execute(&self, input: LoginInput) -> Result<LoginOutput, IdentityError> {
        let check = self
            .provider
            .validate_credentials(&input.email, &input.password)
            .await?;
        if !check.valid {
            return Err(IdentityError::InvalidCredentials);
        }

        // Session identity is always the local profile. A credential pair
        // the provider accepts but we have no profile for gets the same
        // answer as a wrong password.
        let profile = self
            .profiles
            .find_by_email(&input.email)
            .await?
            .ok_or(IdentityError::InvalidCredentials)?;

        let token =
            issue_session_token(&profile.id.to_string(), &self.jwt_secret, self.token_ttl_secs)?;

        Ok(LoginOutput {
            profile_id: profile.id,
            token,
        })
    }
}

// ── DeleteAccount ────────────────────────────────────────────────────────────

pub struct DeleteAccountUseCase<C, P>
where
    C: CredentialProvider,
    P: ProfileRepository,
{
    pub provider: C,
    pub profiles: P,
}

impl<C, P> DeleteAccountUseCase<C, P>
where
    C: CredentialProvider,
    P: ProfileRepository,
{
    pub async fn execute(&self, profile_id: Uuid) -> Result<(), IdentityError> {
        let profile = self
            .profiles
            .find_by_id(profile_id)
            .await?
            .ok_or(IdentityError::ProfileNotFound)?;

        // Provider account goes first; the local row is removed once the
        // provider no longer knows the subject (including when it already
        // didn't).
        let _ = self.provider.delete_account(&profile.subject_id).await?;
        self.profiles.delete(profile.id).await?;
        Ok(())
    }
}

// ── GetProfile ───────────────────────────────────────────────────────────────

pub struct GetProfileUseCase<P>
where
    P: ProfileRepository,
{
    pub profiles: P,
}

impl<P> GetProfileUseCase<P>
where
    P: ProfileRepository,
{
    pub async fn execute(&self, profile_id: Uuid) -> Result<Profile, IdentityError> {
        self.profiles
            .find_by_id(profile_id)
            .await?
            .ok_or(IdentityError::ProfileNotFound)
    }
}
