use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;

use crate::error::IdentityError;
use crate::state::AppState;
use crate::usecase::reset::{
    CompleteResetInput, CompleteResetUseCase, RequestResetInput, RequestResetUseCase,
};

// ── POST /auth/password/recover ──────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RecoverPasswordRequest {
    pub email: String,
}

pub async fn recover_password(
    State(state): State<AppState>,
    Json(body): Json<RecoverPasswordRequest>,
) -> Result<StatusCode, IdentityError> {
    let usecase = RequestResetUseCase {
        otp_store: state.otp_store(),
        mailer: state.mailer(),
    };
    usecase
        .execute(RequestResetInput { email: body.email })
        .await?;
    Ok(StatusCode::ACCEPTED)
}

// ── POST /auth/password/reset ────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    pub code: String,
    pub new_password: String,
}

pub async fn reset_password(
    State(state): State<AppState>,
    Json(body): Json<ResetPasswordRequest>,
) -> Result<StatusCode, IdentityError> {
    let usecase = CompleteResetUseCase {
        otp_store: state.otp_store(),
        profiles: state.profile_repo(),
        provider: state.credential_provider(),
    };
    usecase
        .execute(CompleteResetInput {
            code: body.code,
            new_password: body.new_password,
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
