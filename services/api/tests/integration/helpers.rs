use std::sync::{Arc, Mutex};

use chrono::{Duration, Utc};
use uuid::Uuid;

use disha_api::config::OtpPolicy;
use disha_api::domain::repository::{AdminRepository, Mailer, OtpRepository, UserRepository};
use disha_api::domain::types::{Admin, Otp, OtpEmail, User};
use disha_api::error::ApiError;
use disha_api::usecase::admin::hash_password;
use disha_domain::admin::AdminRole;

pub const USER_SECRET: &str = "user-secret-for-tests";
pub const ADMIN_SECRET: &str = "admin-secret-for-tests";

pub fn test_policy() -> OtpPolicy {
    OtpPolicy {
        length: 6,
        ttl_minutes: 10,
        rate_limit_max: 3,
        rate_limit_window_minutes: 10,
    }
}

pub fn test_user(email: &str) -> User {
    User::new(email.to_owned())
}

pub fn test_admin(email: &str, password: &str, is_active: bool) -> Admin {
    Admin {
        id: Uuid::new_v4(),
        email: email.to_owned(),
        password_hash: hash_password(password).unwrap(),
        role: AdminRole::SuperAdmin,
        is_active,
        last_login: None,
        created_at: Utc::now(),
    }
}

/// A code row issued `age_secs` ago, expiring per the default policy.
pub fn seeded_otp(user: &User, code: &str, age_secs: i64) -> Otp {
    let created_at = Utc::now() - Duration::seconds(age_secs);
    Otp {
        id: Uuid::new_v4(),
        user_id: user.id,
        email: user.email.clone(),
        code: code.to_owned(),
        expires_at: created_at + Duration::minutes(10),
        used_at: None,
        created_at,
    }
}

// ── MockUserRepo ─────────────────────────────────────────────────────────────

pub struct MockUserRepo {
    pub users: Arc<Mutex<Vec<User>>>,
}

impl MockUserRepo {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(Mutex::new(users)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Shared handle to the internal user list for post-execution inspection.
    pub fn handle(&self) -> Arc<Mutex<Vec<User>>> {
        Arc::clone(&self.users)
    }
}

impl UserRepository for MockUserRepo {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    async fn create(&self, user: &User) -> Result<(), ApiError> {
        self.users.lock().unwrap().push(user.clone());
        Ok(())
    }

    async fn mark_verified_and_logged_in(&self, id: Uuid) -> Result<(), ApiError> {
        let mut users = self.users.lock().unwrap();
        if let Some(u) = users.iter_mut().find(|u| u.id == id) {
            u.email_verified = true;
            u.last_login = Some(Utc::now());
        }
        Ok(())
    }

    async fn update_profile(
        &self,
        id: Uuid,
        name: Option<&str>,
        onboarding_completed: Option<bool>,
    ) -> Result<User, ApiError> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| ApiError::Internal(anyhow::anyhow!("no such user")))?;
        if let Some(name) = name {
            user.name = Some(name.to_owned());
        }
        if let Some(completed) = onboarding_completed {
            user.onboarding_completed = completed;
        }
        user.updated_at = Utc::now();
        Ok(user.clone())
    }
}

// ── MockOtpRepo ──────────────────────────────────────────────────────────────

pub struct MockOtpRepo {
    pub otps: Arc<Mutex<Vec<Otp>>>,
}

impl MockOtpRepo {
    pub fn new(otps: Vec<Otp>) -> Self {
        Self {
            otps: Arc::new(Mutex::new(otps)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn handle(&self) -> Arc<Mutex<Vec<Otp>>> {
        Arc::clone(&self.otps)
    }
}

impl OtpRepository for MockOtpRepo {
    async fn count_issued_since(
        &self,
        email: &str,
        since: chrono::DateTime<Utc>,
    ) -> Result<u64, ApiError> {
        Ok(self
            .otps
            .lock()
            .unwrap()
            .iter()
            .filter(|o| o.email == email && o.created_at >= since)
            .count() as u64)
    }

    async fn invalidate_and_create(&self, otp: &Otp) -> Result<(), ApiError> {
        let mut otps = self.otps.lock().unwrap();
        let now = Utc::now();
        for existing in otps.iter_mut() {
            if existing.email == otp.email && existing.used_at.is_none() {
                existing.used_at = Some(now);
            }
        }
        otps.push(otp.clone());
        Ok(())
    }

    async fn find_valid(&self, email: &str, code: &str) -> Result<Option<Otp>, ApiError> {
        Ok(self
            .otps
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.email == email && o.code == code && o.is_valid())
            .cloned())
    }

    async fn mark_used(&self, id: Uuid) -> Result<(), ApiError> {
        let mut otps = self.otps.lock().unwrap();
        if let Some(o) = otps.iter_mut().find(|o| o.id == id) {
            o.used_at = Some(Utc::now());
        }
        Ok(())
    }
}

// ── MockAdminRepo ────────────────────────────────────────────────────────────

pub struct MockAdminRepo {
    pub admins: Arc<Mutex<Vec<Admin>>>,
}

impl MockAdminRepo {
    pub fn new(admins: Vec<Admin>) -> Self {
        Self {
            admins: Arc::new(Mutex::new(admins)),
        }
    }

    pub fn handle(&self) -> Arc<Mutex<Vec<Admin>>> {
        Arc::clone(&self.admins)
    }
}

impl AdminRepository for MockAdminRepo {
    async fn find_by_email(&self, email: &str) -> Result<Option<Admin>, ApiError> {
        Ok(self
            .admins
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Admin>, ApiError> {
        Ok(self
            .admins
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == id)
            .cloned())
    }

    async fn touch_last_login(&self, id: Uuid) -> Result<(), ApiError> {
        let mut admins = self.admins.lock().unwrap();
        if let Some(a) = admins.iter_mut().find(|a| a.id == id) {
            a.last_login = Some(Utc::now());
        }
        Ok(())
    }
}

// ── MockMailer ───────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockMailer {
    pub fail: bool,
    pub sent: Arc<Mutex<Vec<OtpEmail>>>,
}

impl MockMailer {
    pub fn working() -> Self {
        Self {
            fail: false,
            sent: Arc::new(Mutex::new(vec![])),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            sent: Arc::new(Mutex::new(vec![])),
        }
    }

    pub fn sent_handle(&self) -> Arc<Mutex<Vec<OtpEmail>>> {
        Arc::clone(&self.sent)
    }
}

impl Mailer for MockMailer {
    async fn send(&self, email: &OtpEmail) -> Result<(), ApiError> {
        if self.fail {
            return Err(ApiError::DeliveryFailed);
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}
