use anyhow::Context as _;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::password_hash::rand_core::OsRng;
use argon2::Argon2;
use uuid::Uuid;

use crate::domain::repository::AdminRepository;
use crate::domain::types::Admin;
use crate::error::ApiError;

/// Hash a password with argon2id and a fresh random salt. Used by account
/// provisioning tooling, not by any request path.
pub fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("hash password: {e}"))?;
    Ok(hash.to_string())
}

fn verify_password(hash: &str, password: &str) -> Result<bool, ApiError> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| anyhow::anyhow!("parse password hash: {e}"))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

// ── AdminLogin ────────────────────────────────────────────────────────────────

pub struct AdminLoginInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug)]
pub struct AdminLoginOutput {
    pub admin: Admin,
    pub token: String,
    pub token_exp: u64,
}

pub struct AdminLoginUseCase<A: AdminRepository> {
    pub admins: A,
    pub jwt_secret: String,
    pub token_ttl_secs: u64,
}

impl<A: AdminRepository> AdminLoginUseCase<A> {
    /// Unknown email, wrong password and deactivated account all return the
    /// same unauthorized error.
    pub async fn execute(&self, input: AdminLoginInput) -> Result<AdminLoginOutput, ApiError> {
        if input.email.is_empty() {
            return Err(ApiError::validation("email", "is required"));
        }
        if input.password.is_empty() {
            return Err(ApiError::validation("password", "is required"));
        }
        let email = input.email.trim().to_ascii_lowercase();

        let admin = self
            .admins
            .find_by_email(&email)
            .await?
            .ok_or(ApiError::Unauthorized)?;

        if !admin.is_active {
            return Err(ApiError::Unauthorized);
        }
        if !verify_password(&admin.password_hash, &input.password)? {
            return Err(ApiError::Unauthorized);
        }

        self.admins.touch_last_login(admin.id).await?;

        let (token, token_exp) =
            super::token::issue_admin_token(&admin, &self.jwt_secret, self.token_ttl_secs)?;

        Ok(AdminLoginOutput {
            admin,
            token,
            token_exp,
        })
    }
}

// ── AdminMe ───────────────────────────────────────────────────────────────────

pub struct AdminMeUseCase<A: AdminRepository> {
    pub admins: A,
}

impl<A: AdminRepository> AdminMeUseCase<A> {
    /// Tokens are stateless, so `is_active` is re-checked here: deactivating
    /// an admin locks them out on the next request, not at token expiry.
    pub async fn execute(&self, admin_id: Uuid) -> Result<Admin, ApiError> {
        let admin = self
            .admins
            .find_by_id(admin_id)
            .await?
            .ok_or(ApiError::Unauthorized)?;
        if !admin.is_active {
            return Err(ApiError::Unauthorized);
        }
        Ok(admin)
    }
}
