use lettre::message::Mailbox;
use sea_orm::Database;
use tracing::info;

use cuenta_core::config::Config as _;
use cuenta_core::tracing::init_tracing;

use cuenta_identity::config::IdentityConfig;
use cuenta_identity::infra::email::SmtpMailer;
use cuenta_identity::infra::provider::ProviderSettings;
use cuenta_identity::router::build_router;
use cuenta_identity::state::AppState;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = IdentityConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let redis_cfg = deadpool_redis::Config::from_url(&config.redis_url);
    let redis = redis_cfg
        .create_pool(Some(deadpool_redis::Runtime::Tokio1))
        .expect("failed to create Redis pool");

    let from: Mailbox = config.smtp_from.parse().expect("invalid SMTP_FROM address");
    let mailer = SmtpMailer::new(
        &config.smtp_host,
        config.smtp_username.clone(),
        config.smtp_password.clone(),
        from,
    )
    .expect("failed to build SMTP transport");

    let state = AppState {
        db,
        redis,
        http: reqwest::Client::new(),
        mailer,
        provider_settings: ProviderSettings {
            base_url: config.provider_base_url,
            token_url: config.provider_token_url,
            client_id: config.provider_client_id,
            client_secret: config.provider_client_secret,
            scope: config.provider_scope,
        },
        jwt_secret: config.jwt_secret,
        otp_ttl_secs: config.otp_ttl_secs,
        session_token_ttl_secs: config.session_token_ttl_secs,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.identity_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("identity service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
