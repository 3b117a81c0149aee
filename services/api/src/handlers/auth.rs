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
use disha_auth_types::cookie::{AUTH_TOKEN, clear_token_cookie, set_auth_token_cookie};
use disha_auth_types::token::{TokenInfo, validate_token};
use disha_core::envelope::Envelope;
use disha_core::serde::to_rfc3339_ms;

use crate::domain::types::User;
use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::otp::{
    ResendOtpUseCase, SendOtpInput, SendOtpUseCase, VerifyOtpInput, VerifyOtpUseCase,
};
use crate::usecase::profile::{GetMeUseCase, UpdateProfileInput, UpdateProfileUseCase};
use crate::usecase::token::now_secs;

/// User payload as the web client expects it (camelCase).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub email_verified: bool,
    pub onboarding_completed: bool,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            email_verified: user.email_verified,
            onboarding_completed: user.onboarding_completed,
            created_at: user.created_at,
        }
    }
}

/// Validate the user-namespace token from the Authorization header or the
/// `auth_token` cookie.
fn authenticated_user(
    state: &AppState,
    headers: &HeaderMap,
    jar: &CookieJar,
) -> Result<TokenInfo, ApiError> {
    let token = bearer_token(headers, jar, AUTH_TOKEN).ok_or(ApiError::Unauthorized)?;
    validate_token(&token, &state.user_jwt_secret).map_err(|_| ApiError::Unauthorized)
}

// ── POST /api/auth/send-otp ───────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SendOtpRequest {
    pub email: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendOtpData {
    pub email: String,
    /// Seconds until the code expires.
    pub expires_in: u64,
}

pub async fn send_otp(
    State(state): State<AppState>,
    Json(body): Json<SendOtpRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let usecase = SendOtpUseCase {
        users: state.user_repo(),
        otps: state.otp_repo(),
        mailer: state.mailer.clone(),
        policy: state.otp,
        delivery_mode: state.delivery_mode,
    };

    let email = body.email.trim().to_ascii_lowercase();
    let out = usecase.execute(SendOtpInput { email: body.email }).await?;

    Ok((
        StatusCode::OK,
        Json(Envelope::ok_with_message(
            "verification code sent",
            SendOtpData {
                email,
                expires_in: out.expires_in_secs,
            },
        )),
    ))
}

// ── POST /api/auth/verify-otp ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub code: String,
}

#[derive(Serialize)]
pub struct VerifyOtpData {
    pub user: UserResponse,
    pub token: String,
}

pub async fn verify_otp(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<VerifyOtpRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let usecase = VerifyOtpUseCase {
        users: state.user_repo(),
        otps: state.otp_repo(),
        jwt_secret: state.user_jwt_secret.clone(),
        token_ttl_secs: state.user_token_ttl_secs,
    };

    let out = usecase
        .execute(VerifyOtpInput {
            email: body.email,
            code: body.code,
        })
        .await?;

    // Cookie lifetime tracks the token's embedded expiry, not the configured
    // TTL, so the two can never drift apart.
    let jar = set_auth_token_cookie(
        jar,
        out.token.clone(),
        state.cookie_domain.clone(),
        out.token_exp.saturating_sub(now_secs()),
    );

    Ok((
        StatusCode::OK,
        jar,
        Json(Envelope::ok(VerifyOtpData {
            user: out.user.into(),
            token: out.token,
        })),
    ))
}

// ── POST /api/auth/resend-otp ─────────────────────────────────────────────────

pub async fn resend_otp(
    State(state): State<AppState>,
    Json(body): Json<SendOtpRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let usecase = ResendOtpUseCase {
        users: state.user_repo(),
        otps: state.otp_repo(),
        mailer: state.mailer.clone(),
        policy: state.otp,
        delivery_mode: state.delivery_mode,
    };

    let email = body.email.trim().to_ascii_lowercase();
    let out = usecase.execute(SendOtpInput { email: body.email }).await?;

    Ok((
        StatusCode::OK,
        Json(Envelope::ok_with_message(
            "verification code sent",
            SendOtpData {
                email,
                expires_in: out.expires_in_secs,
            },
        )),
    ))
}

// ── POST /api/auth/logout ─────────────────────────────────────────────────────

/// Tokens are stateless, so logout only clears the cookie; the client drops
/// its own persisted copy.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiError> {
    let jar = clear_token_cookie(jar, AUTH_TOKEN, state.cookie_domain.clone());
    Ok((
        StatusCode::OK,
        jar,
        Json(Envelope::ok_empty("logged out")),
    ))
}

// ── GET /api/auth/me ──────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct MeData {
    pub user: UserResponse,
}

pub async fn get_me(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiError> {
    let info = authenticated_user(&state, &headers, &jar)?;

    let usecase = GetMeUseCase {
        users: state.user_repo(),
    };
    let user = usecase.execute(info.subject).await?;

    Ok((
        StatusCode::OK,
        Json(Envelope::ok(MeData { user: user.into() })),
    ))
}

// ── PUT /api/auth/profile ─────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub onboarding_completed: Option<bool>,
}

pub async fn update_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
    Json(body): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let info = authenticated_user(&state, &headers, &jar)?;

    let usecase = UpdateProfileUseCase {
        users: state.user_repo(),
    };
    let user = usecase
        .execute(
            info.subject,
            UpdateProfileInput {
                name: body.name,
                onboarding_completed: body.onboarding_completed,
            },
        )
        .await?;

    Ok((
        StatusCode::OK,
        Json(Envelope::ok(MeData { user: user.into() })),
    ))
}
