use crate::domain::repository::{CredentialProvider, Mailer, OtpStore, ProfileRepository};
use crate::domain::types::validate_email;
use crate::error::IdentityError;

// ── RequestReset ─────────────────────────────────────────────────────────────

pub struct RequestResetInput {
    pub email: String,
}

pub struct RequestResetUseCase<O, M>
where
    O: OtpStore,
    M: Mailer,
{
    pub otp_store: O,
    pub mailer: M,
}

impl<O, M> RequestResetUseCase<O, M>
where
    O: OtpStore,
    M: Mailer,
{
    pub async fn execute(&self, input: RequestResetInput) -> Result<(), IdentityError> {
        if !validate_email(&input.email) {
            return Err(IdentityError::InvalidEmail);
        }

        let code = self.otp_store.issue(&input.email).await?;

        // The issued record stays valid when delivery fails; the client may
        // retry delivery out of band before requesting a fresh code.
        self.mailer.send_reset_code(&input.email, &code).await
    }
}

// ── CompleteReset ────────────────────────────────────────────────────────────

pub struct CompleteResetInput {
    pub code: String,
    pub new_password: String,
}

pub struct CompleteResetUseCase<O, P, C>
where
    O: OtpStore,
    P: ProfileRepository,
    C: CredentialProvider,
{
    pub otp_store: O,
    pub profiles: P,
    pub provider: C,
}

impl<O, P, C> CompleteResetUseCase<O, P, C>
where
    O: OtpStore,
    P: ProfileRepository,
    C: CredentialProvider,
{
    pub async fn execute(&self, input: CompleteResetInput) -> Result<(), IdentityError> {
        // 1. The client submits only the code; resolve the owning email.
        let email = self
            .otp_store
            .lookup_owner(&input.code)
            .await?
            .ok_or(IdentityError::InvalidOtp)?;

        // 2. Atomic consume — the single serialization point for racing
        // attempts on the same code.
        if !self.otp_store.verify_and_consume(&email, &input.code).await? {
            return Err(IdentityError::InvalidOtp);
        }

        // 3. A missing profile surfaces as InvalidOtp as well: the reset
        // endpoints never reveal whether an account exists.
        let profile = self
            .profiles
            .find_by_email(&email)
            .await?
            .ok_or(IdentityError::InvalidOtp)?;

        // 4. The code is already consumed. A provider failure here is
        // terminal for this attempt and nothing re-issues the code; the
        // caller requests a fresh one.
        self.provider
            .change_password(&profile.subject_id, &input.new_password)
            .await
    }
}
