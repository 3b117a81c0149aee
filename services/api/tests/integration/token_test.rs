use axum_extra::extract::cookie::CookieJar;
use uuid::Uuid;

use disha_auth_types::bearer::bearer_token;
use disha_auth_types::cookie::AUTH_TOKEN;
use disha_auth_types::token::{AuthError, validate_token};
use disha_testing::auth::{
    admin_token, bearer_headers, expired_user_token, tamper, user_token,
};

use crate::helpers::{ADMIN_SECRET, USER_SECRET};

#[test]
fn should_accept_token_until_expiry() {
    let id = Uuid::new_v4();
    let token = user_token(id, "student@college.edu", USER_SECRET);

    let info = validate_token(&token, USER_SECRET).unwrap();
    assert_eq!(info.subject, id);
}

#[test]
fn should_reject_expired_token() {
    let token = expired_user_token(Uuid::new_v4(), "student@college.edu", USER_SECRET);
    let err = validate_token(&token, USER_SECRET).unwrap_err();
    assert!(matches!(err, AuthError::Expired));
}

#[test]
fn should_reject_tampered_token() {
    let token = user_token(Uuid::new_v4(), "student@college.edu", USER_SECRET);
    assert!(validate_token(&tamper(&token), USER_SECRET).is_err());
}

#[test]
fn should_keep_user_and_admin_namespaces_apart() {
    let user = user_token(Uuid::new_v4(), "student@college.edu", USER_SECRET);
    let admin = admin_token(Uuid::new_v4(), "ops@disha.app", "super_admin", ADMIN_SECRET);

    assert!(validate_token(&user, ADMIN_SECRET).is_err());
    assert!(validate_token(&admin, USER_SECRET).is_err());

    let info = validate_token(&admin, ADMIN_SECRET).unwrap();
    assert_eq!(info.role.as_deref(), Some("super_admin"));
}

#[test]
fn should_extract_bearer_token_from_headers() {
    let token = user_token(Uuid::new_v4(), "student@college.edu", USER_SECRET);
    let headers = bearer_headers(&token);
    let jar = CookieJar::new();

    assert_eq!(bearer_token(&headers, &jar, AUTH_TOKEN), Some(token));
}
