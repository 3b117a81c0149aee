use sea_orm::Database;
use tracing::info;

use disha_api::config::ApiConfig;
use disha_api::infra::mail::{HttpMailer, MailTransport};
use disha_api::router::build_router;
use disha_api::state::AppState;
use disha_core::tracing::init_tracing;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = ApiConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let mailer = match config.mail.clone() {
        Some(mail) => MailTransport::Http(HttpMailer::new(mail)),
        None => MailTransport::Log,
    };

    let state = AppState {
        db,
        user_jwt_secret: config.user_jwt_secret,
        admin_jwt_secret: config.admin_jwt_secret,
        user_token_ttl_secs: config.user_token_ttl_secs,
        admin_token_ttl_secs: config.admin_token_ttl_secs,
        cookie_domain: config.cookie_domain,
        otp: config.otp,
        delivery_mode: config.delivery_mode,
        mailer,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.api_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("api service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
