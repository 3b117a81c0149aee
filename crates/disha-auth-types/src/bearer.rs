//! Bearer-token extraction.
//!
//! API endpoints accept the session token from the `Authorization: Bearer`
//! header (the browser client attaches it per request) and fall back to the
//! namespace cookie for server-rendered pages.

use axum::http::HeaderMap;
use axum_extra::extract::cookie::CookieJar;

/// Extract the session token for the given cookie namespace.
///
/// Header wins over cookie; an Authorization header with a different scheme
/// is ignored rather than rejected, so the cookie fallback still applies.
pub fn bearer_token(headers: &HeaderMap, jar: &CookieJar, cookie_name: &str) -> Option<String> {
    let from_header = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty());

    from_header.or_else(|| jar.get(cookie_name).map(|c| c.value().to_owned()))
}
