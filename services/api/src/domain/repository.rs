#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::types::{Admin, Otp, OtpEmail, User};
use crate::error::ApiError;

/// Repository for student accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError>;

    async fn create(&self, user: &User) -> Result<(), ApiError>;

    /// Mark the account verified and stamp last_login, in one update.
    async fn mark_verified_and_logged_in(&self, id: Uuid) -> Result<(), ApiError>;

    /// Apply a partial profile update. `None` fields are left untouched.
    async fn update_profile(
        &self,
        id: Uuid,
        name: Option<&str>,
        onboarding_completed: Option<bool>,
    ) -> Result<User, ApiError>;
}

/// Repository for one-time login codes.
pub trait OtpRepository: Send + Sync {
    /// Count codes issued for an email since `since`, used or not. The rate
    /// limit covers every issuance, so invalidated codes still count.
    async fn count_issued_since(
        &self,
        email: &str,
        since: DateTime<Utc>,
    ) -> Result<u64, ApiError>;

    /// Invalidate all outstanding codes for the email and insert the new one
    /// atomically, so at most one code is redeemable at any time.
    async fn invalidate_and_create(&self, otp: &Otp) -> Result<(), ApiError>;

    /// Find a valid (unused, unexpired) code by email + code string.
    async fn find_valid(&self, email: &str, code: &str) -> Result<Option<Otp>, ApiError>;

    /// Mark a code as used (sets used_at = now).
    async fn mark_used(&self, id: Uuid) -> Result<(), ApiError>;
}

/// Repository for back-office admin accounts.
pub trait AdminRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<Admin>, ApiError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Admin>, ApiError>;

    async fn touch_last_login(&self, id: Uuid) -> Result<(), ApiError>;
}

/// Outbound mail transport.
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OtpEmail) -> Result<(), ApiError>;
}
