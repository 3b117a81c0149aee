use disha_api::error::ApiError;
use disha_api::usecase::admin::{AdminLoginInput, AdminLoginUseCase, AdminMeUseCase};
use disha_auth_types::token::validate_token;
use disha_domain::admin::AdminRole;

use crate::helpers::{ADMIN_SECRET, MockAdminRepo, test_admin};

fn login_usecase(admins: MockAdminRepo) -> AdminLoginUseCase<MockAdminRepo> {
    AdminLoginUseCase {
        admins,
        jwt_secret: ADMIN_SECRET.to_owned(),
        token_ttl_secs: 3600,
    }
}

#[tokio::test]
async fn should_login_admin_with_correct_password() {
    let admin = test_admin("ops@disha.app", "hunter2hunter2", true);
    let admins = MockAdminRepo::new(vec![admin.clone()]);
    let admins_handle = admins.handle();

    let uc = login_usecase(admins);
    let out = uc
        .execute(AdminLoginInput {
            email: "ops@disha.app".to_owned(),
            password: "hunter2hunter2".to_owned(),
        })
        .await
        .unwrap();

    assert_eq!(out.admin.id, admin.id);
    assert_eq!(out.admin.role, AdminRole::SuperAdmin);

    let info = validate_token(&out.token, ADMIN_SECRET).unwrap();
    assert_eq!(info.subject, admin.id);
    assert_eq!(info.role.as_deref(), Some("super_admin"));
    assert_eq!(info.exp, out.token_exp, "reported expiry matches the token");

    assert!(
        admins_handle.lock().unwrap()[0].last_login.is_some(),
        "login must stamp last_login"
    );
}

#[tokio::test]
async fn should_reject_wrong_password() {
    let admin = test_admin("ops@disha.app", "hunter2hunter2", true);

    let uc = login_usecase(MockAdminRepo::new(vec![admin]));
    let result = uc
        .execute(AdminLoginInput {
            email: "ops@disha.app".to_owned(),
            password: "wrong".to_owned(),
        })
        .await;

    assert!(matches!(result, Err(ApiError::Unauthorized)));
}

#[tokio::test]
async fn should_reject_unknown_admin_with_the_same_error() {
    let uc = login_usecase(MockAdminRepo::new(vec![]));
    let result = uc
        .execute(AdminLoginInput {
            email: "nobody@disha.app".to_owned(),
            password: "hunter2hunter2".to_owned(),
        })
        .await;

    assert!(matches!(result, Err(ApiError::Unauthorized)));
}

#[tokio::test]
async fn should_reject_deactivated_admin() {
    let admin = test_admin("ops@disha.app", "hunter2hunter2", false);

    let uc = login_usecase(MockAdminRepo::new(vec![admin]));
    let result = uc
        .execute(AdminLoginInput {
            email: "ops@disha.app".to_owned(),
            password: "hunter2hunter2".to_owned(),
        })
        .await;

    assert!(matches!(result, Err(ApiError::Unauthorized)));
}

#[tokio::test]
async fn should_recheck_is_active_on_admin_me() {
    let admin = test_admin("ops@disha.app", "hunter2hunter2", true);
    let admins = MockAdminRepo::new(vec![admin.clone()]);
    let admins_handle = admins.handle();

    let uc = AdminMeUseCase { admins };
    assert!(uc.execute(admin.id).await.is_ok());

    // Deactivate after token issuance; the next me call must fail.
    admins_handle.lock().unwrap()[0].is_active = false;
    let uc = AdminMeUseCase {
        admins: MockAdminRepo {
            admins: admins_handle,
        },
    };
    let result = uc.execute(admin.id).await;
    assert!(matches!(result, Err(ApiError::Unauthorized)));
}
