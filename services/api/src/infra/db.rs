use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, PaginatorTrait, QueryFilter, TransactionTrait,
};
use uuid::Uuid;

use disha_api_schema::{admins, otps, users};
use disha_domain::admin::AdminRole;

use crate::domain::repository::{AdminRepository, OtpRepository, UserRepository};
use crate::domain::types::{Admin, Otp, User};
use crate::error::ApiError;

// ── User repository ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn create(&self, user: &User) -> Result<(), ApiError> {
        users::ActiveModel {
            id: Set(user.id),
            email: Set(user.email.clone()),
            name: Set(user.name.clone()),
            email_verified: Set(user.email_verified),
            onboarding_completed: Set(user.onboarding_completed),
            last_login: Set(user.last_login),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create user")?;
        Ok(())
    }

    async fn mark_verified_and_logged_in(&self, id: Uuid) -> Result<(), ApiError> {
        let now = Utc::now();
        users::ActiveModel {
            id: Set(id),
            email_verified: Set(true),
            last_login: Set(Some(now)),
            updated_at: Set(now),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("mark user verified")?;
        Ok(())
    }

    async fn update_profile(
        &self,
        id: Uuid,
        name: Option<&str>,
        onboarding_completed: Option<bool>,
    ) -> Result<User, ApiError> {
        let mut active = users::ActiveModel {
            id: Set(id),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        if let Some(name) = name {
            active.name = Set(Some(name.to_owned()));
        }
        if let Some(completed) = onboarding_completed {
            active.onboarding_completed = Set(completed);
        }
        let model = active.update(&self.db).await.context("update profile")?;
        Ok(user_from_model(model))
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        email: model.email,
        name: model.name,
        email_verified: model.email_verified,
        onboarding_completed: model.onboarding_completed,
        last_login: model.last_login,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── OTP repository ────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbOtpRepository {
    pub db: DatabaseConnection,
}

impl OtpRepository for DbOtpRepository {
    async fn count_issued_since(
        &self,
        email: &str,
        since: DateTime<Utc>,
    ) -> Result<u64, ApiError> {
        let count = otps::Entity::find()
            .filter(otps::Column::Email.eq(email))
            .filter(otps::Column::CreatedAt.gte(since))
            .count(&self.db)
            .await
            .context("count issued otps")?;
        Ok(count)
    }

    async fn invalidate_and_create(&self, otp: &Otp) -> Result<(), ApiError> {
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                let otp = otp.clone();
                Box::pin(async move {
                    invalidate_outstanding(txn, &otp.email).await?;
                    insert_otp(txn, &otp).await?;
                    Ok(())
                })
            })
            .await
            .context("invalidate and create otp")?;
        Ok(())
    }

    async fn find_valid(&self, email: &str, code: &str) -> Result<Option<Otp>, ApiError> {
        let now = Utc::now();
        let model = otps::Entity::find()
            .filter(otps::Column::Email.eq(email))
            .filter(otps::Column::Code.eq(code))
            .filter(otps::Column::UsedAt.is_null())
            .filter(otps::Column::ExpiresAt.gt(now))
            .one(&self.db)
            .await
            .context("find valid otp")?;
        Ok(model.map(otp_from_model))
    }

    async fn mark_used(&self, id: Uuid) -> Result<(), ApiError> {
        let now = Utc::now();
        otps::ActiveModel {
            id: Set(id),
            used_at: Set(Some(now)),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("mark otp used")?;
        Ok(())
    }
}

async fn invalidate_outstanding(
    txn: &DatabaseTransaction,
    email: &str,
) -> Result<(), sea_orm::DbErr> {
    use sea_orm::sea_query::Expr;
    let now = Utc::now();
    otps::Entity::update_many()
        .col_expr(otps::Column::UsedAt, Expr::value(Some(now)))
        .filter(otps::Column::Email.eq(email))
        .filter(otps::Column::UsedAt.is_null())
        .exec(txn)
        .await?;
    Ok(())
}

async fn insert_otp(txn: &DatabaseTransaction, otp: &Otp) -> Result<(), sea_orm::DbErr> {
    otps::ActiveModel {
        id: Set(otp.id),
        user_id: Set(otp.user_id),
        email: Set(otp.email.clone()),
        code: Set(otp.code.clone()),
        expires_at: Set(otp.expires_at),
        used_at: Set(None),
        created_at: Set(otp.created_at),
    }
    .insert(txn)
    .await?;
    Ok(())
}

fn otp_from_model(model: otps::Model) -> Otp {
    Otp {
        id: model.id,
        user_id: model.user_id,
        email: model.email,
        code: model.code,
        expires_at: model.expires_at,
        used_at: model.used_at,
        created_at: model.created_at,
    }
}

// ── Admin repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAdminRepository {
    pub db: DatabaseConnection,
}

impl AdminRepository for DbAdminRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Admin>, ApiError> {
        let model = admins::Entity::find()
            .filter(admins::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find admin by email")?;
        model.map(admin_from_model).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Admin>, ApiError> {
        let model = admins::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find admin by id")?;
        model.map(admin_from_model).transpose()
    }

    async fn touch_last_login(&self, id: Uuid) -> Result<(), ApiError> {
        admins::ActiveModel {
            id: Set(id),
            last_login: Set(Some(Utc::now())),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("touch admin last_login")?;
        Ok(())
    }
}

fn admin_from_model(model: admins::Model) -> Result<Admin, ApiError> {
    let role = AdminRole::from_str(&model.role)
        .ok_or_else(|| anyhow::anyhow!("unknown admin role in db: {}", model.role))?;
    Ok(Admin {
        id: model.id,
        email: model.email,
        password_hash: model.password_hash,
        role,
        is_active: model.is_active,
        last_login: model.last_login,
        created_at: model.created_at,
    })
}
