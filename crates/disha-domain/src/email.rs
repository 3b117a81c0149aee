//! Email address shape validation.

/// Check that an email address is well-formed enough to send to.
///
/// Intentionally loose: one `@`, non-empty local part, a domain containing a
/// dot, no whitespace. Ownership is proven by the OTP round-trip, not here.
pub fn validate_email(email: &str) -> bool {
    if email.is_empty() || email.len() > 254 {
        return false;
    }
    if email.chars().any(|c| c.is_whitespace()) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && !tld.is_empty()
}
