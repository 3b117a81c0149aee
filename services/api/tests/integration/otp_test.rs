use disha_api::config::DeliveryMode;
use disha_api::error::ApiError;
use disha_api::usecase::otp::{
    ResendOtpUseCase, SendOtpInput, SendOtpUseCase, VerifyOtpInput, VerifyOtpUseCase,
};
use disha_auth_types::token::validate_token;

use crate::helpers::{
    MockMailer, MockOtpRepo, MockUserRepo, USER_SECRET, seeded_otp, test_policy, test_user,
};

fn send_usecase(
    users: MockUserRepo,
    otps: MockOtpRepo,
    mailer: MockMailer,
    delivery_mode: DeliveryMode,
) -> SendOtpUseCase<MockUserRepo, MockOtpRepo, MockMailer> {
    SendOtpUseCase {
        users,
        otps,
        mailer,
        policy: test_policy(),
        delivery_mode,
    }
}

// ── sendOTP ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_send_otp_and_create_account_lazily() {
    let users = MockUserRepo::empty();
    let otps = MockOtpRepo::empty();
    let mailer = MockMailer::working();

    let users_handle = users.handle();
    let otps_handle = otps.handle();
    let sent_handle = mailer.sent_handle();

    let uc = send_usecase(users, otps, mailer, DeliveryMode::BestEffort);
    let out = uc
        .execute(SendOtpInput {
            email: "student@college.edu".to_owned(),
        })
        .await
        .unwrap();

    assert_eq!(out.expires_in_secs, 600);

    let users = users_handle.lock().unwrap();
    assert_eq!(users.len(), 1, "expected lazy account creation");
    assert_eq!(users[0].email, "student@college.edu");
    assert!(!users[0].email_verified);

    let otps = otps_handle.lock().unwrap();
    assert_eq!(otps.len(), 1);
    assert_eq!(otps[0].code.len(), 6);
    assert!(otps[0].code.chars().all(|c| c.is_ascii_digit()));
    assert!(otps[0].used_at.is_none());
    assert!(otps[0].expires_at > chrono::Utc::now());

    let sent = sent_handle.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "student@college.edu");
    assert!(sent[0].body.contains(&otps[0].code));
}

#[tokio::test]
async fn should_reuse_existing_account_on_send() {
    let user = test_user("student@college.edu");
    let users = MockUserRepo::new(vec![user]);
    let users_handle = users.handle();

    let uc = send_usecase(
        users,
        MockOtpRepo::empty(),
        MockMailer::working(),
        DeliveryMode::BestEffort,
    );
    uc.execute(SendOtpInput {
        email: "student@college.edu".to_owned(),
    })
    .await
    .unwrap();

    assert_eq!(users_handle.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_rate_limit_fourth_send_within_window() {
    let user = test_user("student@college.edu");
    let otps = MockOtpRepo::new(vec![
        seeded_otp(&user, "111111", 60),
        seeded_otp(&user, "222222", 120),
        seeded_otp(&user, "333333", 180),
    ]);

    let uc = send_usecase(
        MockUserRepo::new(vec![user.clone()]),
        otps,
        MockMailer::working(),
        DeliveryMode::BestEffort,
    );
    let result = uc
        .execute(SendOtpInput {
            email: user.email.clone(),
        })
        .await;

    assert!(
        matches!(result, Err(ApiError::RateLimited)),
        "expected RateLimited, got {result:?}"
    );
}

#[tokio::test]
async fn should_count_invalidated_codes_toward_rate_limit() {
    let user = test_user("student@college.edu");
    let mut old = seeded_otp(&user, "111111", 60);
    old.used_at = Some(chrono::Utc::now());
    let mut older = seeded_otp(&user, "222222", 120);
    older.used_at = Some(chrono::Utc::now());

    let otps = MockOtpRepo::new(vec![old, older, seeded_otp(&user, "333333", 180)]);

    let uc = send_usecase(
        MockUserRepo::new(vec![user.clone()]),
        otps,
        MockMailer::working(),
        DeliveryMode::BestEffort,
    );
    let result = uc
        .execute(SendOtpInput {
            email: user.email.clone(),
        })
        .await;

    assert!(matches!(result, Err(ApiError::RateLimited)));
}

#[tokio::test]
async fn should_not_count_sends_outside_the_window() {
    let user = test_user("student@college.edu");
    // All three are older than the 10 minute window.
    let otps = MockOtpRepo::new(vec![
        seeded_otp(&user, "111111", 700),
        seeded_otp(&user, "222222", 800),
        seeded_otp(&user, "333333", 900),
    ]);

    let uc = send_usecase(
        MockUserRepo::new(vec![user.clone()]),
        otps,
        MockMailer::working(),
        DeliveryMode::BestEffort,
    );
    assert!(
        uc.execute(SendOtpInput {
            email: user.email.clone(),
        })
        .await
        .is_ok()
    );
}

#[tokio::test]
async fn should_invalidate_prior_codes_on_new_send() {
    let user = test_user("student@college.edu");
    let otps = MockOtpRepo::new(vec![seeded_otp(&user, "111111", 60)]);
    let otps_handle = otps.handle();

    let uc = send_usecase(
        MockUserRepo::new(vec![user.clone()]),
        otps,
        MockMailer::working(),
        DeliveryMode::BestEffort,
    );
    uc.execute(SendOtpInput {
        email: user.email.clone(),
    })
    .await
    .unwrap();

    let otps = otps_handle.lock().unwrap();
    assert_eq!(otps.len(), 2);
    let valid: Vec<_> = otps.iter().filter(|o| o.is_valid()).collect();
    assert_eq!(valid.len(), 1, "only the newest code may be redeemable");
    assert_ne!(valid[0].code, "111111");
}

#[tokio::test]
async fn should_reject_malformed_email_on_send() {
    let uc = send_usecase(
        MockUserRepo::empty(),
        MockOtpRepo::empty(),
        MockMailer::working(),
        DeliveryMode::BestEffort,
    );
    let result = uc
        .execute(SendOtpInput {
            email: "not-an-email".to_owned(),
        })
        .await;

    assert!(matches!(result, Err(ApiError::Validation(_))));
}

#[tokio::test]
async fn should_fail_send_in_strict_mode_when_delivery_fails() {
    let otps = MockOtpRepo::empty();
    let otps_handle = otps.handle();

    let uc = send_usecase(
        MockUserRepo::empty(),
        otps,
        MockMailer::failing(),
        DeliveryMode::Strict,
    );
    let result = uc
        .execute(SendOtpInput {
            email: "student@college.edu".to_owned(),
        })
        .await;

    assert!(matches!(result, Err(ApiError::DeliveryFailed)));
    // The row was persisted before the delivery attempt.
    assert_eq!(otps_handle.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_swallow_delivery_failure_in_best_effort_mode() {
    let uc = send_usecase(
        MockUserRepo::empty(),
        MockOtpRepo::empty(),
        MockMailer::failing(),
        DeliveryMode::BestEffort,
    );
    let result = uc
        .execute(SendOtpInput {
            email: "student@college.edu".to_owned(),
        })
        .await;

    assert!(result.is_ok(), "best-effort delivery must not fail the call");
}

// ── resendOTP ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_fail_resend_for_unknown_email() {
    let uc = ResendOtpUseCase {
        users: MockUserRepo::empty(),
        otps: MockOtpRepo::empty(),
        mailer: MockMailer::working(),
        policy: test_policy(),
        delivery_mode: DeliveryMode::BestEffort,
    };
    let result = uc
        .execute(SendOtpInput {
            email: "nobody@college.edu".to_owned(),
        })
        .await;

    assert!(
        matches!(result, Err(ApiError::UserNotFound)),
        "expected UserNotFound, got {result:?}"
    );
}

#[tokio::test]
async fn should_resend_with_same_invalidation_as_send() {
    let user = test_user("student@college.edu");
    let otps = MockOtpRepo::new(vec![seeded_otp(&user, "111111", 60)]);
    let otps_handle = otps.handle();

    let uc = ResendOtpUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
        otps,
        mailer: MockMailer::working(),
        policy: test_policy(),
        delivery_mode: DeliveryMode::BestEffort,
    };
    uc.execute(SendOtpInput {
        email: user.email.clone(),
    })
    .await
    .unwrap();

    let otps = otps_handle.lock().unwrap();
    assert_eq!(otps.iter().filter(|o| o.is_valid()).count(), 1);
}

// ── verifyOTP ────────────────────────────────────────────────────────────────

fn verify_usecase(
    users: MockUserRepo,
    otps: MockOtpRepo,
) -> VerifyOtpUseCase<MockUserRepo, MockOtpRepo> {
    VerifyOtpUseCase {
        users,
        otps,
        jwt_secret: USER_SECRET.to_owned(),
        token_ttl_secs: 3600,
    }
}

#[tokio::test]
async fn should_verify_otp_and_mint_token() {
    let user = test_user("student@college.edu");
    let otp = seeded_otp(&user, "482913", 30);
    let users = MockUserRepo::new(vec![user.clone()]);
    let users_handle = users.handle();

    let uc = verify_usecase(users, MockOtpRepo::new(vec![otp]));
    let out = uc
        .execute(VerifyOtpInput {
            email: user.email.clone(),
            code: "482913".to_owned(),
        })
        .await
        .unwrap();

    assert!(out.user.email_verified);
    assert!(out.user.last_login.is_some());

    let info = validate_token(&out.token, USER_SECRET).unwrap();
    assert_eq!(info.subject, user.id);
    assert_eq!(info.email, user.email);
    assert!(info.role.is_none());
    assert_eq!(info.exp, out.token_exp, "reported expiry matches the token");

    // The repository copy was updated too.
    let users = users_handle.lock().unwrap();
    assert!(users[0].email_verified);
    assert!(users[0].last_login.is_some());
}

#[tokio::test]
async fn should_verify_each_otp_exactly_once() {
    let user = test_user("student@college.edu");
    let otp = seeded_otp(&user, "482913", 30);

    let users = MockUserRepo::new(vec![user.clone()]);
    let otps = MockOtpRepo::new(vec![otp]);
    let users_handle = users.handle();
    let otps_handle = otps.handle();

    let uc = verify_usecase(users, otps);
    uc.execute(VerifyOtpInput {
        email: user.email.clone(),
        code: "482913".to_owned(),
    })
    .await
    .unwrap();

    let uc = verify_usecase(
        MockUserRepo {
            users: users_handle,
        },
        MockOtpRepo { otps: otps_handle },
    );
    let result = uc
        .execute(VerifyOtpInput {
            email: user.email.clone(),
            code: "482913".to_owned(),
        })
        .await;

    assert!(matches!(result, Err(ApiError::InvalidOrExpiredOtp)));
}

#[tokio::test]
async fn should_reject_superseded_code_through_verify() {
    let user = test_user("student@college.edu");
    let users = MockUserRepo::new(vec![user.clone()]);
    let otps = MockOtpRepo::new(vec![seeded_otp(&user, "111111", 60)]);
    let users_handle = users.handle();
    let otps_handle = otps.handle();

    // Issuing a new code supersedes the old one.
    let uc = send_usecase(users, otps, MockMailer::working(), DeliveryMode::BestEffort);
    uc.execute(SendOtpInput {
        email: user.email.clone(),
    })
    .await
    .unwrap();

    let uc = verify_usecase(
        MockUserRepo {
            users: users_handle,
        },
        MockOtpRepo { otps: otps_handle },
    );
    let result = uc
        .execute(VerifyOtpInput {
            email: user.email.clone(),
            code: "111111".to_owned(),
        })
        .await;

    assert!(
        matches!(result, Err(ApiError::InvalidOrExpiredOtp)),
        "the old code must no longer verify, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_wrong_code() {
    let user = test_user("student@college.edu");
    let otp = seeded_otp(&user, "482913", 30);

    let uc = verify_usecase(
        MockUserRepo::new(vec![user.clone()]),
        MockOtpRepo::new(vec![otp]),
    );
    let result = uc
        .execute(VerifyOtpInput {
            email: user.email.clone(),
            code: "000000".to_owned(),
        })
        .await;

    assert!(matches!(result, Err(ApiError::InvalidOrExpiredOtp)));
}

#[tokio::test]
async fn should_reject_expired_code_with_the_same_error() {
    let user = test_user("student@college.edu");
    // Issued 11 minutes ago, past the 10 minute expiry.
    let otp = seeded_otp(&user, "482913", 660);

    let uc = verify_usecase(
        MockUserRepo::new(vec![user.clone()]),
        MockOtpRepo::new(vec![otp]),
    );
    let result = uc
        .execute(VerifyOtpInput {
            email: user.email.clone(),
            code: "482913".to_owned(),
        })
        .await;

    assert!(matches!(result, Err(ApiError::InvalidOrExpiredOtp)));
}

#[tokio::test]
async fn should_reject_unknown_email_with_the_same_error() {
    let uc = verify_usecase(MockUserRepo::empty(), MockOtpRepo::empty());
    let result = uc
        .execute(VerifyOtpInput {
            email: "nobody@college.edu".to_owned(),
            code: "482913".to_owned(),
        })
        .await;

    assert!(matches!(result, Err(ApiError::InvalidOrExpiredOtp)));
}
