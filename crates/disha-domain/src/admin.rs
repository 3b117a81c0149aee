//! Admin domain types.

use serde::{Deserialize, Serialize};

/// Back-office admin permission level.
///
/// Wire format: string (`"user"` or `"super_admin"`), stored as-is in the
/// admins table and carried in the admin token's `role` claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    User,
    SuperAdmin,
}

impl AdminRole {
    /// Parse from the wire string. Returns `None` for unknown values.
    pub fn from_str(v: &str) -> Option<Self> {
        match v {
            "user" => Some(Self::User),
            "super_admin" => Some(Self::SuperAdmin),
            _ => None,
        }
    }

    /// Convert to the wire string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::SuperAdmin => "super_admin",
        }
    }
}

impl PartialOrd for AdminRole {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AdminRole {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        fn rank(r: AdminRole) -> u8 {
            match r {
                AdminRole::User => 0,
                AdminRole::SuperAdmin => 1,
            }
        }
        rank(*self).cmp(&rank(*other))
    }
}
