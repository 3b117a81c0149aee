use crate::domain::types::{
    OTP_LENGTH_DEFAULT, OTP_RATE_LIMIT_MAX_DEFAULT, OTP_RATE_LIMIT_WINDOW_MINUTES_DEFAULT,
    OTP_TTL_MINUTES_DEFAULT,
};

/// How OTP email delivery failures are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryMode {
    /// Delivery failure propagates to the caller (the OTP row is already
    /// persisted at that point; a later resend invalidates it).
    Strict,
    /// Delivery failure is logged and swallowed; the code stays usable.
    BestEffort,
}

impl DeliveryMode {
    fn parse(v: &str) -> Option<Self> {
        match v {
            "strict" => Some(Self::Strict),
            "best-effort" => Some(Self::BestEffort),
            _ => None,
        }
    }
}

/// Knobs for OTP issuance, grouped so usecases take one value.
#[derive(Debug, Clone, Copy)]
pub struct OtpPolicy {
    /// Number of digits in a generated code.
    pub length: usize,
    /// Minutes until a code expires.
    pub ttl_minutes: i64,
    /// Max codes issued per email within the window.
    pub rate_limit_max: u64,
    /// Trailing window for the rate limit, minutes.
    pub rate_limit_window_minutes: i64,
}

/// HTTP mail API credentials. All three must be set together.
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub api_url: String,
    pub api_key: String,
    pub from: String,
}

/// API service configuration loaded from environment variables.
#[derive(Debug)]
pub struct ApiConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HMAC secret for user session tokens. Env var: `USER_JWT_SECRET`.
    pub user_jwt_secret: String,
    /// HMAC secret for admin session tokens. Env var: `ADMIN_JWT_SECRET`.
    pub admin_jwt_secret: String,
    /// User token lifetime in seconds (default 7 days).
    pub user_token_ttl_secs: u64,
    /// Admin token lifetime in seconds (default 8 hours).
    pub admin_token_ttl_secs: u64,
    /// Cookie domain attribute (e.g. "disha.app").
    pub cookie_domain: String,
    pub otp: OtpPolicy,
    /// Mail transport; `None` when `MAIL_API_URL` is unset.
    pub mail: Option<MailConfig>,
    pub delivery_mode: DeliveryMode,
    /// TCP port to listen on (default 3114). Env var: `API_PORT`.
    pub api_port: u16,
}

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl ApiConfig {
    pub fn from_env() -> Self {
        let mail = std::env::var("MAIL_API_URL").ok().map(|api_url| MailConfig {
            api_url,
            api_key: std::env::var("MAIL_API_KEY").expect("MAIL_API_KEY"),
            from: std::env::var("MAIL_FROM").expect("MAIL_FROM"),
        });

        let delivery_mode = std::env::var("MAIL_DELIVERY_MODE")
            .ok()
            .map(|v| DeliveryMode::parse(&v).expect("MAIL_DELIVERY_MODE must be strict or best-effort"))
            .unwrap_or(DeliveryMode::BestEffort);

        if delivery_mode == DeliveryMode::Strict && mail.is_none() {
            panic!("MAIL_DELIVERY_MODE=strict requires MAIL_API_URL");
        }

        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            user_jwt_secret: std::env::var("USER_JWT_SECRET").expect("USER_JWT_SECRET"),
            admin_jwt_secret: std::env::var("ADMIN_JWT_SECRET").expect("ADMIN_JWT_SECRET"),
            user_token_ttl_secs: env_parse("USER_TOKEN_TTL_SECS", 604_800),
            admin_token_ttl_secs: env_parse("ADMIN_TOKEN_TTL_SECS", 28_800),
            cookie_domain: std::env::var("COOKIE_DOMAIN").expect("COOKIE_DOMAIN"),
            otp: OtpPolicy {
                length: env_parse("OTP_LENGTH", OTP_LENGTH_DEFAULT),
                ttl_minutes: env_parse("OTP_TTL_MINUTES", OTP_TTL_MINUTES_DEFAULT),
                rate_limit_max: env_parse("OTP_RATE_LIMIT_MAX", OTP_RATE_LIMIT_MAX_DEFAULT),
                rate_limit_window_minutes: env_parse(
                    "OTP_RATE_LIMIT_WINDOW_MINUTES",
                    OTP_RATE_LIMIT_WINDOW_MINUTES_DEFAULT,
                ),
            },
            mail,
            delivery_mode,
            api_port: env_parse("API_PORT", 3114),
        }
    }
}
