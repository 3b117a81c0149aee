use uuid::Uuid;

use crate::domain::repository::UserRepository;
use crate::domain::types::User;
use crate::error::ApiError;

// ── GetMe ─────────────────────────────────────────────────────────────────────

pub struct GetMeUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> GetMeUseCase<U> {
    /// A valid token whose account has since disappeared is treated as
    /// unauthorized, so clients drop the stale session.
    pub async fn execute(&self, user_id: Uuid) -> Result<User, ApiError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(ApiError::Unauthorized)
    }
}

// ── UpdateProfile ─────────────────────────────────────────────────────────────

pub struct UpdateProfileInput {
    pub name: Option<String>,
    pub onboarding_completed: Option<bool>,
}

pub struct UpdateProfileUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> UpdateProfileUseCase<U> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        input: UpdateProfileInput,
    ) -> Result<User, ApiError> {
        let name = match input.name.as_deref().map(str::trim) {
            Some("") => return Err(ApiError::validation("name", "must not be empty")),
            Some(name) if name.len() > 120 => {
                return Err(ApiError::validation("name", "must be at most 120 characters"));
            }
            other => other,
        };

        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(ApiError::Unauthorized)?;

        self.users
            .update_profile(user_id, name, input.onboarding_completed)
            .await
    }
}
