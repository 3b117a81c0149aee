use chrono::{DateTime, Utc};
use uuid::Uuid;

use disha_domain::admin::AdminRole;

/// Student account. Created lazily on the first OTP send.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub email_verified: bool,
    pub onboarding_completed: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// A fresh, unverified account for this email.
    pub fn new(email: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            email,
            name: None,
            email_verified: false,
            onboarding_completed: false,
            last_login: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Back-office admin account.
#[derive(Debug, Clone)]
pub struct Admin {
    pub id: Uuid,
    pub email: String,
    /// argon2id PHC string.
    pub password_hash: String,
    pub role: AdminRole,
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// One-time code for passwordless login.
#[derive(Debug, Clone)]
pub struct Otp {
    pub id: Uuid,
    pub user_id: Uuid,
    pub email: String,
    pub code: String,
    pub expires_at: DateTime<Utc>,
    pub used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Otp {
    pub fn is_valid(&self) -> bool {
        self.used_at.is_none() && self.expires_at > Utc::now()
    }
}

/// OTP email ready for the mail transport.
#[derive(Debug, Clone)]
pub struct OtpEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Default number of digits in an OTP.
pub const OTP_LENGTH_DEFAULT: usize = 6;

/// Default OTP time-to-live in minutes.
pub const OTP_TTL_MINUTES_DEFAULT: i64 = 10;

/// Default maximum OTPs issued per email within the rate-limit window.
pub const OTP_RATE_LIMIT_MAX_DEFAULT: u64 = 3;

/// Default trailing rate-limit window in minutes.
pub const OTP_RATE_LIMIT_WINDOW_MINUTES_DEFAULT: i64 = 10;
