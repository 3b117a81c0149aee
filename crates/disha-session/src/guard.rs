//! Route guard decisions.
//!
//! Guards exist to avoid flashing protected UI and to manage redirects; the
//! server enforces auth independently on every endpoint. Decisions are pure
//! functions of session state + current route so they can be unit-tested
//! without any rendering layer.

use crate::context::SessionState;
use crate::storage::{ADMIN_AUTHENTICATED_KEY, ADMIN_TOKEN_KEY, SessionStorage};

pub const LOGIN_ROUTE: &str = "/login";
pub const DASHBOARD_ROUTE: &str = "/dashboard";
pub const ADMIN_LOGIN_ROUTE: &str = "/admin/login";

/// Onboarding steps, in order. The last one doubles as the confirmation
/// screen a just-finished user is allowed to see once more.
pub const ONBOARDING_ROUTES: [&str; 3] = ["/step-1", "/step-2", "/step-3"];
pub const FINAL_ONBOARDING_ROUTE: &str = "/step-3";

/// What the wrapper component should do for the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session still resolving: render a loading placeholder, no redirect.
    Placeholder,
    /// Render the wrapped page content.
    Render,
    /// Navigate away and render nothing further.
    Redirect(&'static str),
}

/// Guard for the protected area (dashboard, profile, …).
///
/// Does not enforce onboarding completion — a layout-level check owns that —
/// only authentication.
pub fn protected_area(state: &SessionState) -> GuardDecision {
    match state {
        SessionState::Uninitialized | SessionState::Loading => GuardDecision::Placeholder,
        SessionState::Unauthenticated => GuardDecision::Redirect(LOGIN_ROUTE),
        SessionState::Authenticated(_) => GuardDecision::Render,
    }
}

/// Guard for the auth area (login, OTP entry, onboarding steps).
pub fn auth_area(state: &SessionState, route: &str) -> GuardDecision {
    let session = match state {
        SessionState::Uninitialized | SessionState::Loading => return GuardDecision::Placeholder,
        SessionState::Unauthenticated => return GuardDecision::Render,
        SessionState::Authenticated(session) => session,
    };

    if !ONBOARDING_ROUTES.contains(&route) {
        // Already signed in on /login etc. — nothing to do here.
        return GuardDecision::Redirect(DASHBOARD_ROUTE);
    }

    // The onboarding flag only counts once the server confirmed it; a value
    // read from client storage alone must not gate onboarding redirects.
    let completed = session.server_verified && session.user.onboarding_completed;
    if completed && route != FINAL_ONBOARDING_ROUTE {
        GuardDecision::Redirect(DASHBOARD_ROUTE)
    } else {
        GuardDecision::Render
    }
}

/// Guard for the admin back office.
///
/// Independent of the user session context: keyed purely on the admin
/// storage namespace. A user token's presence is irrelevant.
pub fn admin_area(storage: &impl SessionStorage) -> GuardDecision {
    let authenticated = storage.get(ADMIN_TOKEN_KEY).is_some()
        && storage.get(ADMIN_AUTHENTICATED_KEY).as_deref() == Some("true");
    if authenticated {
        GuardDecision::Render
    } else {
        GuardDecision::Redirect(ADMIN_LOGIN_ROUTE)
    }
}
