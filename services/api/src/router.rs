use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::trace::TraceLayer;

use disha_core::health::{healthz, readyz};
use disha_core::middleware::request_id_layer;

use crate::handlers::{
    admin,
    auth::{get_me, logout, resend_otp, send_otp, update_profile, verify_otp},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // OTP login
        .route("/api/auth/send-otp", post(send_otp))
        .route("/api/auth/verify-otp", post(verify_otp))
        .route("/api/auth/resend-otp", post(resend_otp))
        // Identity + profile
        .route("/api/auth/me", get(get_me))
        .route("/api/auth/profile", put(update_profile))
        .route("/api/auth/logout", post(logout))
        // Admin
        .route("/api/admin/login", post(admin::login))
        .route("/api/admin/logout", post(admin::logout))
        .route("/api/admin/me", get(admin::me))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
