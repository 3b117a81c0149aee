use sea_orm::DatabaseConnection;

use crate::config::{DeliveryMode, OtpPolicy};
use crate::infra::db::{DbAdminRepository, DbOtpRepository, DbUserRepository};
use crate::infra::mail::MailTransport;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub user_jwt_secret: String,
    pub admin_jwt_secret: String,
    pub user_token_ttl_secs: u64,
    pub admin_token_ttl_secs: u64,
    pub cookie_domain: String,
    pub otp: OtpPolicy,
    pub delivery_mode: DeliveryMode,
    pub mailer: MailTransport,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn otp_repo(&self) -> DbOtpRepository {
        DbOtpRepository {
            db: self.db.clone(),
        }
    }

    pub fn admin_repo(&self) -> DbAdminRepository {
        DbAdminRepository {
            db: self.db.clone(),
        }
    }
}
