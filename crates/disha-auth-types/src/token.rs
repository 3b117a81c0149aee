//! JWT session-token validation.
//!
//! Two independent token namespaces exist — user tokens and admin tokens —
//! distinguished only by the secret they were signed with (and the admin
//! token's extra `role` claim). Validation is stateless: signature + expiry;
//! there is no revocation list, so a token stays valid until its embedded
//! expiry. Endpoints that need fresher truth (admin `is_active`) re-check
//! the account record after validation.

use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::Deserialize;
#[cfg(any(feature = "token-issuer", test))]
use serde::Serialize;
use uuid::Uuid;

/// Identity extracted from a validated session token.
#[derive(Debug, Clone)]
pub struct TokenInfo {
    /// `sub` claim — user id or admin id depending on the namespace.
    pub subject: Uuid,
    pub email: String,
    /// Present on admin tokens only (`"user"` / `"super_admin"`).
    pub role: Option<String>,
    /// Expiration, seconds since UNIX epoch.
    pub exp: u64,
}

/// Errors returned by [`validate_token`].
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
}

/// JWT claims payload shared by token creation (API service) and validation
/// (clients, server-rendered pages).
///
/// [`Deserialize`] is always available — every consumer validates tokens.
/// [`Serialize`] requires the **`token-issuer`** cargo feature; only the API
/// service enables it because it is the sole issuer.
#[derive(Debug, Deserialize)]
#[cfg_attr(any(feature = "token-issuer", test), derive(Serialize))]
pub struct JwtClaims {
    /// Subject id (UUID string) — user id or admin id.
    pub sub: String,
    /// Email the subject authenticated with.
    pub email: String,
    /// Admin role wire string; absent on user tokens.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Expiration timestamp (seconds since UNIX epoch).
    pub exp: u64,
}

/// Decode and validate a session token against the given namespace secret.
///
/// Validation: HS256, exp checked, required claims `exp` + `sub`. The
/// default 60s leeway tolerates clock skew between hosts.
pub fn validate_token(token: &str, secret: &str) -> Result<TokenInfo, AuthError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature
        | jsonwebtoken::errors::ErrorKind::InvalidEcdsaKey
        | jsonwebtoken::errors::ErrorKind::InvalidRsaKey(_) => AuthError::InvalidSignature,
        _ => AuthError::Malformed,
    })?;

    let subject = data
        .claims
        .sub
        .parse::<Uuid>()
        .map_err(|_| AuthError::Malformed)?;

    Ok(TokenInfo {
        subject,
        email: data.claims.email,
        role: data.claims.role,
        exp: data.claims.exp,
    })
}
