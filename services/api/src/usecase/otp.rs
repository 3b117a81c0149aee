use chrono::{Duration, Utc};
use rand::RngExt;
use uuid::Uuid;

use disha_domain::email::validate_email;

use crate::config::{DeliveryMode, OtpPolicy};
use crate::domain::repository::{Mailer, OtpRepository, UserRepository};
use crate::domain::types::{Otp, OtpEmail, User};
use crate::error::ApiError;

/// Charset for generated codes. Digits only so the code is easy to type on
/// a phone keypad.
const CHARSET: &[u8] = b"0123456789";

fn generate_code(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

/// Lowercase + trim. One canonical form for lookups, rate limiting and
/// storage, so `A@X.com` and `a@x.com ` are the same account.
fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

fn validated_email(email: &str) -> Result<String, ApiError> {
    let email = normalize_email(email);
    if !validate_email(&email) {
        return Err(ApiError::validation("email", "must be a valid email address"));
    }
    Ok(email)
}

async fn check_rate_limit<O: OtpRepository>(
    otps: &O,
    policy: &OtpPolicy,
    email: &str,
) -> Result<(), ApiError> {
    let since = Utc::now() - Duration::minutes(policy.rate_limit_window_minutes);
    let issued = otps.count_issued_since(email, since).await?;
    if issued >= policy.rate_limit_max {
        return Err(ApiError::RateLimited);
    }
    Ok(())
}

/// Generate a fresh code for the user, invalidate any outstanding ones, and
/// hand the email to the mail transport. In best-effort mode a delivery
/// failure is logged and swallowed; the persisted code stays redeemable.
async fn issue_and_send<O, M>(
    otps: &O,
    mailer: &M,
    policy: &OtpPolicy,
    delivery_mode: DeliveryMode,
    user: &User,
) -> Result<SendOtpOutput, ApiError>
where
    O: OtpRepository,
    M: Mailer,
{
    let code = generate_code(policy.length);
    let now = Utc::now();
    let otp = Otp {
        id: Uuid::new_v4(),
        user_id: user.id,
        email: user.email.clone(),
        code: code.clone(),
        expires_at: now + Duration::minutes(policy.ttl_minutes),
        used_at: None,
        created_at: now,
    };
    otps.invalidate_and_create(&otp).await?;

    let email = OtpEmail {
        to: user.email.clone(),
        subject: format!("{code} is your Disha verification code"),
        body: format!(
            "Your Disha verification code is {code}. It expires in {} minutes. \
             If you didn't request this, you can ignore this email.",
            policy.ttl_minutes
        ),
    };
    if let Err(e) = mailer.send(&email).await {
        match delivery_mode {
            DeliveryMode::Strict => return Err(e),
            DeliveryMode::BestEffort => {
                tracing::warn!(to = %user.email, error = %e, "otp email delivery failed");
            }
        }
    }

    Ok(SendOtpOutput {
        expires_in_secs: (policy.ttl_minutes * 60) as u64,
    })
}

// ── SendOtp ───────────────────────────────────────────────────────────────────

pub struct SendOtpInput {
    pub email: String,
}

#[derive(Debug)]
pub struct SendOtpOutput {
    pub expires_in_secs: u64,
}

pub struct SendOtpUseCase<U, O, M>
where
    U: UserRepository,
    O: OtpRepository,
    M: Mailer,
{
    pub users: U,
    pub otps: O,
    pub mailer: M,
    pub policy: OtpPolicy,
    pub delivery_mode: DeliveryMode,
}

impl<U, O, M> SendOtpUseCase<U, O, M>
where
    U: UserRepository,
    O: OtpRepository,
    M: Mailer,
{
    pub async fn execute(&self, input: SendOtpInput) -> Result<SendOtpOutput, ApiError> {
        let email = validated_email(&input.email)?;

        // Rate limit covers every issuance for the email in the trailing
        // window, redeemed or not. Checked before the lazy account creation
        // so a throttled email never creates a row.
        check_rate_limit(&self.otps, &self.policy, &email).await?;

        let user = match self.users.find_by_email(&email).await? {
            Some(user) => user,
            None => {
                let user = User::new(email);
                self.users.create(&user).await?;
                user
            }
        };

        issue_and_send(&self.otps, &self.mailer, &self.policy, self.delivery_mode, &user).await
    }
}

// ── ResendOtp ─────────────────────────────────────────────────────────────────

pub struct ResendOtpUseCase<U, O, M>
where
    U: UserRepository,
    O: OtpRepository,
    M: Mailer,
{
    pub users: U,
    pub otps: O,
    pub mailer: M,
    pub policy: OtpPolicy,
    pub delivery_mode: DeliveryMode,
}

impl<U, O, M> ResendOtpUseCase<U, O, M>
where
    U: UserRepository,
    O: OtpRepository,
    M: Mailer,
{
    /// Unlike the initial send, resend never creates an account: an unknown
    /// email is a 404 here because the client only offers resend after a
    /// first send succeeded.
    pub async fn execute(&self, input: SendOtpInput) -> Result<SendOtpOutput, ApiError> {
        let email = validated_email(&input.email)?;

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(ApiError::UserNotFound)?;

        check_rate_limit(&self.otps, &self.policy, &email).await?;

        issue_and_send(&self.otps, &self.mailer, &self.policy, self.delivery_mode, &user).await
    }
}

// ── VerifyOtp ─────────────────────────────────────────────────────────────────

pub struct VerifyOtpInput {
    pub email: String,
    pub code: String,
}

#[derive(Debug)]
pub struct VerifyOtpOutput {
    pub user: User,
    pub token: String,
    pub token_exp: u64,
}

pub struct VerifyOtpUseCase<U, O>
where
    U: UserRepository,
    O: OtpRepository,
{
    pub users: U,
    pub otps: O,
    pub jwt_secret: String,
    pub token_ttl_secs: u64,
}

impl<U, O> VerifyOtpUseCase<U, O>
where
    U: UserRepository,
    O: OtpRepository,
{
    /// Every rejection is the same unspecific error: a wrong code, an
    /// expired or already-used one, and an unknown email are
    /// indistinguishable to the caller.
    pub async fn execute(&self, input: VerifyOtpInput) -> Result<VerifyOtpOutput, ApiError> {
        let email = validated_email(&input.email)?;
        if input.code.is_empty() {
            return Err(ApiError::validation("otp", "is required"));
        }

        let otp = self
            .otps
            .find_valid(&email, &input.code)
            .await?
            .ok_or(ApiError::InvalidOrExpiredOtp)?;

        let mut user = self
            .users
            .find_by_id(otp.user_id)
            .await?
            .ok_or(ApiError::InvalidOrExpiredOtp)?;

        self.otps.mark_used(otp.id).await?;
        self.users.mark_verified_and_logged_in(user.id).await?;
        user.email_verified = true;
        user.last_login = Some(Utc::now());

        let (token, token_exp) =
            super::token::issue_user_token(&user, &self.jwt_secret, self.token_ttl_secs)?;

        Ok(VerifyOtpOutput {
            user,
            token,
            token_exp,
        })
    }
}
