use std::sync::Arc;

use cuenta_identity::domain::repository::OtpStore;
use cuenta_identity::error::IdentityError;
use cuenta_identity::usecase::reset::{
    CompleteResetInput, CompleteResetUseCase, RequestResetInput, RequestResetUseCase,
};

use crate::helpers::{
    MockCredentialProvider, MockMailer, MockOtpStore, MockProfileRepo, test_profile,
};

#[tokio::test]
async fn should_issue_code_and_send_mail() {
    let otp_store = MockOtpStore::empty();
    let records = otp_store.records_handle();
    let mailer = MockMailer::new();
    let sent = mailer.sent_handle();

    let uc = RequestResetUseCase { otp_store, mailer };
    uc.execute(RequestResetInput {
        email: "alice@example.com".to_owned(),
    })
    .await
    .unwrap();

    let sent = sent.lock().unwrap();
    assert_eq!(sent.len(), 1, "expected exactly one mail");
    let (to, mailed_code) = &sent[0];
    assert_eq!(to, "alice@example.com");

    let records = records.lock().unwrap();
    assert_eq!(
        records.get("alice@example.com"),
        Some(mailed_code),
        "mailed code should match the stored record"
    );
}

#[tokio::test]
async fn should_keep_code_valid_when_mail_fails() {
    let otp_store = MockOtpStore::empty();
    let records = otp_store.records_handle();

    let uc = RequestResetUseCase {
        otp_store,
        mailer: MockMailer::failing(),
    };
    let result = uc
        .execute(RequestResetInput {
            email: "alice@example.com".to_owned(),
        })
        .await;

    assert!(
        matches!(result, Err(IdentityError::Notification(_))),
        "expected Notification, got {result:?}"
    );
    // The record is not rolled back on delivery failure.
    assert!(records.lock().unwrap().contains_key("alice@example.com"));
}

#[tokio::test]
async fn should_reject_malformed_email_on_request() {
    let uc = RequestResetUseCase {
        otp_store: MockOtpStore::empty(),
        mailer: MockMailer::new(),
    };
    let result = uc
        .execute(RequestResetInput {
            email: "not-an-email".to_owned(),
        })
        .await;
    assert!(matches!(result, Err(IdentityError::InvalidEmail)));
}

#[tokio::test]
async fn should_reset_password_with_valid_code() {
    let profile = test_profile();
    let provider = MockCredentialProvider::new(&profile.subject_id);
    let calls = provider.change_password_calls_handle();

    let uc = CompleteResetUseCase {
        otp_store: MockOtpStore::with_record(&profile.email, "123456"),
        profiles: MockProfileRepo::new(vec![profile.clone()]),
        provider,
    };
    uc.execute(CompleteResetInput {
        code: "123456".to_owned(),
        new_password: "NewPass1!".to_owned(),
    })
    .await
    .unwrap();

    let calls = calls.lock().unwrap();
    assert_eq!(
        *calls,
        vec![(profile.subject_id.clone(), "NewPass1!".to_owned())],
        "expected exactly one credential-change call"
    );
}

#[tokio::test]
async fn should_return_invalid_otp_for_unknown_code() {
    let provider = MockCredentialProvider::new("subject-0001");
    let calls = provider.change_password_calls_handle();

    let uc = CompleteResetUseCase {
        otp_store: MockOtpStore::empty(),
        profiles: MockProfileRepo::new(vec![test_profile()]),
        provider,
    };
    let result = uc
        .execute(CompleteResetInput {
            code: "000000".to_owned(),
            new_password: "x".to_owned(),
        })
        .await;

    assert!(
        matches!(result, Err(IdentityError::InvalidOtp)),
        "expected InvalidOtp, got {result:?}"
    );
    assert!(
        calls.lock().unwrap().is_empty(),
        "no credential-change call may happen for an unknown code"
    );
}

#[tokio::test]
async fn should_return_invalid_otp_when_profile_missing() {
    // Consumption succeeded but no local profile exists — the response must
    // not differ from a bad code.
    let uc = CompleteResetUseCase {
        otp_store: MockOtpStore::with_record("ghost@example.com", "123456"),
        profiles: MockProfileRepo::empty(),
        provider: MockCredentialProvider::new("subject-0001"),
    };
    let result = uc
        .execute(CompleteResetInput {
            code: "123456".to_owned(),
            new_password: "NewPass1!".to_owned(),
        })
        .await;
    assert!(matches!(result, Err(IdentityError::InvalidOtp)));
}

#[tokio::test]
async fn reissue_replaces_the_outstanding_code() {
    let store = MockOtpStore::empty();
    let first = store.issue("alice@example.com").await.unwrap();
    let second = store.issue("alice@example.com").await.unwrap();
    assert_ne!(first, second);

    assert!(
        !store
            .verify_and_consume("alice@example.com", &first)
            .await
            .unwrap(),
        "first code must be invalid after reissue"
    );
    assert!(
        store
            .verify_and_consume("alice@example.com", &second)
            .await
            .unwrap(),
        "second code must consume"
    );
}

#[tokio::test]
async fn consume_is_idempotent_false_after_first_success() {
    let store = MockOtpStore::with_record("alice@example.com", "123456");
    assert!(
        store
            .verify_and_consume("alice@example.com", "123456")
            .await
            .unwrap()
    );
    assert!(
        !store
            .verify_and_consume("alice@example.com", "123456")
            .await
            .unwrap()
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_resets_consume_exactly_once() {
    const ATTEMPTS: usize = 16;

    let profile = test_profile();
    let provider = MockCredentialProvider::new(&profile.subject_id);
    let calls = provider.change_password_calls_handle();

    let uc = Arc::new(CompleteResetUseCase {
        otp_store: MockOtpStore::with_record(&profile.email, "123456"),
        profiles: MockProfileRepo::new(vec![profile]),
        provider,
    });

    let barrier = Arc::new(tokio::sync::Barrier::new(ATTEMPTS));
    let mut handles = Vec::with_capacity(ATTEMPTS);
    for _ in 0..ATTEMPTS {
        let uc = Arc::clone(&uc);
        let barrier = Arc::clone(&barrier);
        handles.push(tokio::spawn(async move {
            barrier.wait().await;
            uc.execute(CompleteResetInput {
                code: "123456".to_owned(),
                new_password: "NewPass1!".to_owned(),
            })
            .await
        }));
    }

    let mut successes = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(()) => successes += 1,
            Err(IdentityError::InvalidOtp) => {}
            Err(other) => panic!("unexpected error under race: {other:?}"),
        }
    }

    assert_eq!(successes, 1, "exactly one attempt may consume the code");
    assert_eq!(
        calls.lock().unwrap().len(),
        1,
        "exactly one credential-change call may happen"
    );
}

#[tokio::test]
async fn provider_failure_after_consumption_is_terminal() {
    let profile = test_profile();

    let uc = CompleteResetUseCase {
        otp_store: MockOtpStore::with_record(&profile.email, "123456"),
        profiles: MockProfileRepo::new(vec![profile.clone()]),
        provider: MockCredentialProvider::failing_change_password(&profile.subject_id),
    };

    let result = uc
        .execute(CompleteResetInput {
            code: "123456".to_owned(),
            new_password: "NewPass1!".to_owned(),
        })
        .await;
    assert!(
        matches!(result, Err(IdentityError::CredentialUpdate(_))),
        "expected CredentialUpdate, got {result:?}"
    );

    // The consumed code is gone; a retry with the same code is InvalidOtp.
    let retry = uc
        .execute(CompleteResetInput {
            code: "123456".to_owned(),
            new_password: "NewPass1!".to_owned(),
        })
        .await;
    assert!(matches!(retry, Err(IdentityError::InvalidOtp)));
}
