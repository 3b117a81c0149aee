use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use axum_extra::extract::CookieJar;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use disha_auth_types::bearer::bearer_token;
use disha_auth_types::cookie::{ADMIN_TOKEN, clear_token_cookie, set_admin_token_cookie};
use disha_auth_types::token::{TokenInfo, validate_token};
use disha_core::envelope::Envelope;
use disha_core::serde::to_rfc3339_ms_opt;
use disha_domain::admin::AdminRole;

use crate::domain::types::Admin;
use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::admin::{AdminLoginInput, AdminLoginUseCase, AdminMeUseCase};
use crate::usecase::token::now_secs;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminResponse {
    pub id: Uuid,
    pub email: String,
    pub role: AdminRole,
    #[serde(serialize_with = "to_rfc3339_ms_opt")]
    pub last_login: Option<DateTime<Utc>>,
}

impl From<Admin> for AdminResponse {
    fn from(admin: Admin) -> Self {
        Self {
            id: admin.id,
            email: admin.email,
            role: admin.role,
            last_login: admin.last_login,
        }
    }
}

/// Validate the admin-namespace token. The admin secret is separate from the
/// user secret, so a user token can never pass this check.
fn authenticated_admin(
    state: &AppState,
    headers: &HeaderMap,
    jar: &CookieJar,
) -> Result<TokenInfo, ApiError> {
    let token = bearer_token(headers, jar, ADMIN_TOKEN).ok_or(ApiError::Unauthorized)?;
    validate_token(&token, &state.admin_jwt_secret).map_err(|_| ApiError::Unauthorized)
}

// ── POST /api/admin/login ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct AdminLoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct AdminLoginData {
    pub admin: AdminResponse,
    pub token: String,
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<AdminLoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let usecase = AdminLoginUseCase {
        admins: state.admin_repo(),
        jwt_secret: state.admin_jwt_secret.clone(),
        token_ttl_secs: state.admin_token_ttl_secs,
    };

    let out = usecase
        .execute(AdminLoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;

    let jar = set_admin_token_cookie(
        jar,
        out.token.clone(),
        state.cookie_domain.clone(),
        out.token_exp.saturating_sub(now_secs()),
    );

    Ok((
        StatusCode::OK,
        jar,
        Json(Envelope::ok(AdminLoginData {
            admin: out.admin.into(),
            token: out.token,
        })),
    ))
}

// ── POST /api/admin/logout ────────────────────────────────────────────────────

pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiError> {
    let jar = clear_token_cookie(jar, ADMIN_TOKEN, state.cookie_domain.clone());
    Ok((
        StatusCode::OK,
        jar,
        Json(Envelope::ok_empty("logged out")),
    ))
}

// ── GET /api/admin/me ─────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct AdminMeData {
    pub admin: AdminResponse,
}

pub async fn me(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiError> {
    let info = authenticated_admin(&state, &headers, &jar)?;

    let usecase = AdminMeUseCase {
        admins: state.admin_repo(),
    };
    let admin = usecase.execute(info.subject).await?;

    Ok((
        StatusCode::OK,
        Json(Envelope::ok(AdminMeData {
            admin: admin.into(),
        })),
    ))
}
