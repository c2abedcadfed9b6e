use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Identity service domain error variants.
///
/// `InvalidOtp`, `InvalidToken` and `InvalidCredentials` deliberately
/// collapse their underlying causes (missing vs mismatched vs expired) so
/// responses never reveal whether an account exists.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("invalid one-time code")]
    InvalidOtp,
    #[error("invalid token")]
    InvalidToken,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("invalid email")]
    InvalidEmail,
    #[error("password too short")]
    WeakPassword,
    #[error("profile not found")]
    ProfileNotFound,
    #[error("email already registered")]
    EmailTaken,
    #[error("notification delivery failed")]
    Notification(#[source] anyhow::Error),
    #[error("credential update failed")]
    CredentialUpdate(#[source] anyhow::Error),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl IdentityError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidOtp => "INVALID_OTP",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::WeakPassword => "PASSWORD_TOO_SHORT",
            Self::ProfileNotFound => "PROFILE_NOT_FOUND",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::Notification(_) => "NOTIFICATION_FAILED",
            Self::CredentialUpdate(_) => "CREDENTIAL_UPDATE_FAILED",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for IdentityError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidOtp | Self::InvalidToken | Self::InvalidCredentials => {
                StatusCode::UNAUTHORIZED
            }
            Self::InvalidEmail | Self::WeakPassword => StatusCode::BAD_REQUEST,
            Self::ProfileNotFound => StatusCode::NOT_FOUND,
            Self::EmailTaken => StatusCode::CONFLICT,
            Self::Notification(_) | Self::CredentialUpdate(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 5xx only — tower-http TraceLayer already records method/uri/status
        // for all requests, and 4xx are expected client errors. Server-side
        // failures carry an anyhow chain that must reach the log.
        match &self {
            Self::Notification(e) | Self::CredentialUpdate(e) | Self::Internal(e) => {
                tracing::error!(error = %e, kind = self.kind(), "{self}");
            }
            _ => {}
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
