use sea_orm::entity::prelude::*;

/// Student account. Created lazily on the first OTP send for an email;
/// `name` stays null until the profile step of onboarding fills it in.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub name: Option<String>,
    pub email_verified: bool,
    pub onboarding_completed: bool,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::otps::Entity")]
    Otps,
}

impl Related<super::otps::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Otps.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
