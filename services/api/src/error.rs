use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use disha_core::envelope::{Envelope, FieldError};

/// API service error variants. Every handler failure converts to the JSON
/// envelope with `success:false`; raw errors never reach the client.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("validation failed")]
    Validation(Vec<FieldError>),
    #[error("too many OTP requests, please try again later")]
    RateLimited,
    /// Deliberately unspecific: wrong code, expired, already used and
    /// unknown email all collapse into this, to avoid enumeration signals.
    #[error("invalid or expired code")]
    InvalidOrExpiredOtp,
    #[error("no account found for this email")]
    UserNotFound,
    #[error("unauthorized")]
    Unauthorized,
    /// Strict delivery mode only — the OTP row was persisted but the email
    /// could not be sent.
    #[error("failed to send the verification email")]
    DeliveryFailed,
    #[error("internal server error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn validation(param: &str, msg: &str) -> Self {
        Self::Validation(vec![FieldError::new(param, msg)])
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::InvalidOrExpiredOtp | Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::UserNotFound => StatusCode::NOT_FOUND,
            Self::DeliveryFailed => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only — tower-http TraceLayer already records method/uri/status
        // for all requests; 4xx are expected client errors. Internal errors need
        // the anyhow chain logged so the root cause is traceable.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, "internal error");
        }
        let message = self.to_string();
        let body = match self {
            Self::Validation(errors) => Envelope::fail_with_errors(message, errors),
            _ => Envelope::fail(message),
        };
        (status, axum::Json(body)).into_response()
    }
}
