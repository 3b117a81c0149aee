//! Cookie builders for the user and admin session tokens.
//!
//! The API sets these alongside the JSON token so server-rendered pages can
//! do their initial auth check from the cookie; the browser client keeps its
//! own copy in persistent storage under the same names.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

/// Cookie name for the user session token.
pub const AUTH_TOKEN: &str = "auth_token";

/// Cookie name for the admin session token.
pub const ADMIN_TOKEN: &str = "admin_token";

fn session_cookie(name: &'static str, value: String, domain: String, max_age_secs: u64) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .domain(domain)
        .max_age(Duration::seconds(max_age_secs as i64))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Set the user-token cookie on the jar.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use disha_auth_types::cookie::{set_auth_token_cookie, AUTH_TOKEN};
///
/// let jar = CookieJar::new();
/// let jar = set_auth_token_cookie(jar, "token_value".to_string(), "disha.app".to_string(), 604800);
/// let cookie = jar.get(AUTH_TOKEN).unwrap();
/// assert_eq!(cookie.path(), Some("/"));
/// assert_eq!(cookie.domain(), Some("disha.app"));
/// assert_eq!(cookie.max_age(), Some(time::Duration::seconds(604800)));
/// assert!(cookie.http_only().unwrap_or(false));
/// assert!(cookie.secure().unwrap_or(false));
/// ```
pub fn set_auth_token_cookie(
    jar: CookieJar,
    value: String,
    domain: String,
    max_age_secs: u64,
) -> CookieJar {
    jar.add(session_cookie(AUTH_TOKEN, value, domain, max_age_secs))
}

/// Set the admin-token cookie on the jar.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use disha_auth_types::cookie::{set_admin_token_cookie, ADMIN_TOKEN};
///
/// let jar = CookieJar::new();
/// let jar = set_admin_token_cookie(jar, "token_value".to_string(), "disha.app".to_string(), 28800);
/// let cookie = jar.get(ADMIN_TOKEN).unwrap();
/// assert_eq!(cookie.path(), Some("/"));
/// assert_eq!(cookie.max_age(), Some(time::Duration::seconds(28800)));
/// ```
pub fn set_admin_token_cookie(
    jar: CookieJar,
    value: String,
    domain: String,
    max_age_secs: u64,
) -> CookieJar {
    jar.add(session_cookie(ADMIN_TOKEN, value, domain, max_age_secs))
}

/// Clear one of the token cookies by setting Max-Age to 0.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use disha_auth_types::cookie::{clear_token_cookie, set_auth_token_cookie, AUTH_TOKEN};
///
/// let jar = CookieJar::new();
/// let jar = set_auth_token_cookie(jar, "a".to_string(), "disha.app".to_string(), 604800);
/// let jar = clear_token_cookie(jar, AUTH_TOKEN, "disha.app".to_string());
/// let cookie = jar.get(AUTH_TOKEN).unwrap();
/// assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
/// ```
pub fn clear_token_cookie(jar: CookieJar, name: &'static str, domain: String) -> CookieJar {
    let cookie = Cookie::build((name, ""))
        .path("/")
        .domain(domain)
        .max_age(Duration::ZERO)
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}
