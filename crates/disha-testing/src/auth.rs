//! Session-token minting for tests.

use http::{HeaderMap, HeaderValue, header::AUTHORIZATION};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use disha_auth_types::token::JwtClaims;

fn now_secs() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

fn mint(sub: Uuid, email: &str, role: Option<&str>, exp: u64, secret: &str) -> String {
    let claims = JwtClaims {
        sub: sub.to_string(),
        email: email.to_owned(),
        role: role.map(str::to_owned),
        exp,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("test token encodes")
}

/// Mint a user token valid for one hour.
pub fn user_token(user_id: Uuid, email: &str, secret: &str) -> String {
    mint(user_id, email, None, now_secs() + 3600, secret)
}

/// Mint an admin token valid for one hour.
pub fn admin_token(admin_id: Uuid, email: &str, role: &str, secret: &str) -> String {
    mint(admin_id, email, Some(role), now_secs() + 3600, secret)
}

/// Mint a user token whose expiry is already in the past (beyond the
/// validator's 60-second leeway).
pub fn expired_user_token(user_id: Uuid, email: &str, secret: &str) -> String {
    mint(user_id, email, None, now_secs().saturating_sub(600), secret)
}

/// Corrupt a token's signature segment, keeping it structurally a JWT.
pub fn tamper(token: &str) -> String {
    let mut tampered = token.to_owned();
    let flipped = if tampered.ends_with('A') { 'B' } else { 'A' };
    tampered.pop();
    tampered.push(flipped);
    tampered
}

/// Headers carrying the token as a Bearer credential.
pub fn bearer_headers(token: &str) -> HeaderMap {
    let mut map = HeaderMap::new();
    map.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {token}")).expect("valid header value"),
    );
    map
}
