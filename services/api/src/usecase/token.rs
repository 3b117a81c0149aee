use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{EncodingKey, Header, encode};

use disha_auth_types::token::JwtClaims;

use crate::domain::types::{Admin, User};
use crate::error::ApiError;

pub fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

/// Mint a user-namespace session token. No `role` claim; the user secret is
/// what separates this namespace from admin tokens.
pub fn issue_user_token(user: &User, secret: &str, ttl_secs: u64) -> Result<(String, u64), ApiError> {
    let exp = now_secs() + ttl_secs;
    let claims = JwtClaims {
        sub: user.id.to_string(),
        email: user.email.clone(),
        role: None,
        exp,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(e.into()))?;
    Ok((token, exp))
}

/// Mint an admin-namespace session token, carrying the role claim.
pub fn issue_admin_token(
    admin: &Admin,
    secret: &str,
    ttl_secs: u64,
) -> Result<(String, u64), ApiError> {
    let exp = now_secs() + ttl_secs;
    let claims = JwtClaims {
        sub: admin.id.to_string(),
        email: admin.email.clone(),
        role: Some(admin.role.as_str().to_owned()),
        exp,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(e.into()))?;
    Ok((token, exp))
}
