use uuid::Uuid;

use disha_api::error::ApiError;
use disha_api::usecase::profile::{GetMeUseCase, UpdateProfileInput, UpdateProfileUseCase};

use crate::helpers::{MockUserRepo, test_user};

#[tokio::test]
async fn should_return_current_user() {
    let user = test_user("student@college.edu");
    let uc = GetMeUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
    };

    let found = uc.execute(user.id).await.unwrap();
    assert_eq!(found.id, user.id);
    assert_eq!(found.email, user.email);
}

#[tokio::test]
async fn should_reject_token_for_missing_account() {
    let uc = GetMeUseCase {
        users: MockUserRepo::empty(),
    };

    let result = uc.execute(Uuid::new_v4()).await;
    assert!(matches!(result, Err(ApiError::Unauthorized)));
}

#[tokio::test]
async fn should_update_name() {
    let user = test_user("student@college.edu");
    let uc = UpdateProfileUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
    };

    let updated = uc
        .execute(
            user.id,
            UpdateProfileInput {
                name: Some("  Asha Rao  ".to_owned()),
                onboarding_completed: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name.as_deref(), Some("Asha Rao"));
    assert!(!updated.onboarding_completed);
}

#[tokio::test]
async fn should_reject_blank_name() {
    let user = test_user("student@college.edu");
    let uc = UpdateProfileUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
    };

    let result = uc
        .execute(
            user.id,
            UpdateProfileInput {
                name: Some("   ".to_owned()),
                onboarding_completed: None,
            },
        )
        .await;

    assert!(matches!(result, Err(ApiError::Validation(_))));
}

#[tokio::test]
async fn should_mark_onboarding_complete() {
    let user = test_user("student@college.edu");
    let users = MockUserRepo::new(vec![user.clone()]);
    let users_handle = users.handle();

    let uc = UpdateProfileUseCase { users };
    let updated = uc
        .execute(
            user.id,
            UpdateProfileInput {
                name: None,
                onboarding_completed: Some(true),
            },
        )
        .await
        .unwrap();

    assert!(updated.onboarding_completed);
    assert!(users_handle.lock().unwrap()[0].onboarding_completed);
}
