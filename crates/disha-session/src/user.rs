//! The user object as the client sees it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User payload returned by `/api/auth/me` and cached under `auth_user`.
///
/// `onboarding_completed` is only trustworthy once the copy came from the
/// server; see [`crate::context::Session::server_verified`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(default)]
    pub onboarding_completed: bool,
}
