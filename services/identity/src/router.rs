use axum::{
    Router,
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;

use cuenta_core::health::{healthz, readyz};
use cuenta_core::middleware::request_id_layer;

use crate::handlers::{
    account::{delete_account, get_me, login, register},
    reset::{recover_password, reset_password},
    token::verify_token,
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Accounts
        .route("/accounts", post(register))
        .route("/accounts/@me", get(get_me))
        .route("/accounts/@me", delete(delete_account))
        // Session tokens
        .route("/auth/login", post(login))
        .route("/auth/token/verify", post(verify_token))
        // Password reset
        .route("/auth/password/recover", post(recover_password))
        .route("/auth/password/reset", post(reset_password))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
