use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::error::IdentityError;
use crate::state::AppState;
use crate::usecase::token::verify_session_token;

// ── POST /auth/token/verify ──────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifyTokenRequest {
    pub token: String,
}

#[derive(Serialize)]
pub struct VerifyTokenResponse {
    pub valid: bool,
    pub id: String,
}

pub async fn verify_token(
    State(state): State<AppState>,
    Json(body): Json<VerifyTokenRequest>,
) -> Result<Json<VerifyTokenResponse>, IdentityError> {
    let subject = verify_session_token(&body.token, &state.jwt_secret)?;
    Ok(Json(VerifyTokenResponse {
        valid: true,
        id: subject,
    }))
}
