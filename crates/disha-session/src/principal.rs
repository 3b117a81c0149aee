//! Active-principal selection.
//!
//! The client holds up to two tokens (user and admin). Which one a request
//! carries is decided once, here, when the request is constructed — call
//! sites never re-derive the precedence themselves.

use crate::storage::{ADMIN_TOKEN_KEY, AUTH_TOKEN_KEY, SessionStorage};

/// The identity a request will be made as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    Admin(String),
    User(String),
    Anonymous,
}

impl Principal {
    /// The `Authorization` header value for this principal, if any.
    pub fn authorization_header(&self) -> Option<String> {
        match self {
            Self::Admin(token) | Self::User(token) => Some(format!("Bearer {token}")),
            Self::Anonymous => None,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin(_))
    }
}

/// Resolve the principal from persisted storage. Admin wins when both
/// tokens are present.
pub fn active_principal(storage: &impl SessionStorage) -> Principal {
    if let Some(token) = storage.get(ADMIN_TOKEN_KEY) {
        return Principal::Admin(token);
    }
    if let Some(token) = storage.get(AUTH_TOKEN_KEY) {
        return Principal::User(token);
    }
    Principal::Anonymous
}
