use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode, header},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::IdentityError;
use crate::state::AppState;
use crate::usecase::account::{
    DeleteAccountUseCase, GetProfileUseCase, LoginInput, LoginUseCase, RegisterAccountInput,
    RegisterAccountUseCase,
};
use crate::usecase::token::verify_session_token;

/// Extract the profile id from a `Authorization: Bearer <token>` header.
fn authenticated_profile_id(headers: &HeaderMap, secret: &str) -> Result<Uuid, IdentityError> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or(IdentityError::InvalidToken)?;
    let subject = verify_session_token(token, secret)?;
    subject.parse().map_err(|_| IdentityError::InvalidToken)
}

// ── POST /accounts ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterAccountRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub born_date: NaiveDate,
}

#[derive(Serialize)]
pub struct TokenResponse {
    pub token: String,
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterAccountRequest>,
) -> Result<(StatusCode, Json<TokenResponse>), IdentityError> {
    let usecase = RegisterAccountUseCase {
        provider: state.credential_provider(),
        profiles: state.profile_repo(),
        jwt_secret: state.jwt_secret.clone(),
        token_ttl_secs: state.session_token_ttl_secs,
    };
    let out = usecase
        .execute(RegisterAccountInput {
            email: body.email,
            password: body.password,
            first_name: body.first_name,
            last_name: body.last_name,
            born_date: body.born_date,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(TokenResponse { token: out.token })))
}

// ── POST /auth/login ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, IdentityError> {
    let usecase = LoginUseCase {
        provider: state.credential_provider(),
        profiles: state.profile_repo(),
        jwt_secret: state.jwt_secret.clone(),
        token_ttl_secs: state.session_token_ttl_secs,
    };
    let out = usecase
        .execute(LoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok(Json(TokenResponse { token: out.token }))
}

// ── GET /accounts/@me ────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ProfileResponse {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub born_date: NaiveDate,
    #[serde(serialize_with = "cuenta_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "cuenta_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

pub async fn get_me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ProfileResponse>, IdentityError> {
    let profile_id = authenticated_profile_id(&headers, &state.jwt_secret)?;
    let usecase = GetProfileUseCase {
        profiles: state.profile_repo(),
    };
    let profile = usecase.execute(profile_id).await?;
    Ok(Json(ProfileResponse {
        id: profile.id.to_string(),
        email: profile.email,
        first_name: profile.first_name,
        last_name: profile.last_name,
        born_date: profile.born_date,
        created_at: profile.created_at,
        updated_at: profile.updated_at,
    }))
}

// ── DELETE /accounts/@me ─────────────────────────────────────────────────────

pub async fn delete_account(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, IdentityError> {
    let profile_id = authenticated_profile_id(&headers, &state.jwt_secret)?;
    let usecase = DeleteAccountUseCase {
        provider: state.credential_provider(),
        profiles: state.profile_repo(),
    };
    usecase.execute(profile_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
