use chrono::NaiveDate;
use uuid::Uuid;

use cuenta_identity::error::IdentityError;
use cuenta_identity::usecase::account::{
    DeleteAccountUseCase, LoginInput, LoginUseCase, RegisterAccountInput, RegisterAccountUseCase,
};
use cuenta_identity::usecase::token::verify_session_token;

use crate::helpers::{MockCredentialProvider, MockProfileRepo, TEST_JWT_SECRET, test_profile};

const WEEK_SECS: u64 = 7 * 24 * 60 * 60;

fn register_input(email: &str) -> RegisterAccountInput {
    RegisterAccountInput {
        email: email.to_owned(),
        password: "Sup3rSecret!".to_owned(),
        first_name: "Alice".to_owned(),
        last_name: "Example".to_owned(),
        born_date: NaiveDate::from_ymd_opt(1990, 4, 12).unwrap(),
    }
}

#[tokio::test]
async fn should_register_account_and_mint_token() {
    let provider = MockCredentialProvider::new("subject-0042");
    let created = std::sync::Arc::clone(&provider.created_accounts);
    let profiles = MockProfileRepo::empty();
    let profiles_handle = profiles.profiles_handle();

    let uc = RegisterAccountUseCase {
        provider,
        profiles,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
        token_ttl_secs: WEEK_SECS,
    };
    let out = uc.execute(register_input("alice@example.com")).await.unwrap();

    // Exactly one provider-side account was created.
    let created = created.lock().unwrap();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].email, "alice@example.com");

    // The local profile carries the subject id the provider handed back.
    let profiles = profiles_handle.lock().unwrap();
    assert_eq!(profiles.len(), 1);
    assert_eq!(profiles[0].subject_id, "subject-0042");
    assert_eq!(profiles[0].email, "alice@example.com");
    assert_eq!(profiles[0].id, out.profile_id);

    // The returned token verifies to the new profile id.
    let subject = verify_session_token(&out.token, TEST_JWT_SECRET).unwrap();
    assert_eq!(subject, out.profile_id.to_string());
}

#[tokio::test]
async fn should_reject_duplicate_email_on_register() {
    let uc = RegisterAccountUseCase {
        provider: MockCredentialProvider::new("subject-0042"),
        profiles: MockProfileRepo::new(vec![test_profile()]),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
        token_ttl_secs: WEEK_SECS,
    };
    let result = uc.execute(register_input("alice@example.com")).await;
    assert!(matches!(result, Err(IdentityError::EmailTaken)));
}

#[tokio::test]
async fn should_reject_short_password_on_register() {
    let uc = RegisterAccountUseCase {
        provider: MockCredentialProvider::new("subject-0042"),
        profiles: MockProfileRepo::empty(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
        token_ttl_secs: WEEK_SECS,
    };
    let mut input = register_input("alice@example.com");
    input.password = "short".to_owned();
    let result = uc.execute(input).await;
    assert!(matches!(result, Err(IdentityError::WeakPassword)));
}

#[tokio::test]
async fn should_login_with_valid_credentials() {
    let profile = test_profile();
    let uc = LoginUseCase {
        provider: MockCredentialProvider::accepting_password(&profile.subject_id, "Sup3rSecret!"),
        profiles: MockProfileRepo::new(vec![profile.clone()]),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
        token_ttl_secs: WEEK_SECS,
    };
    let out = uc
        .execute(LoginInput {
            email: profile.email.clone(),
            password: "Sup3rSecret!".to_owned(),
        })
        .await
        .unwrap();

    assert_eq!(out.profile_id, profile.id);
    let subject = verify_session_token(&out.token, TEST_JWT_SECRET).unwrap();
    assert_eq!(subject, profile.id.to_string());
}

#[tokio::test]
async fn should_reject_wrong_password_on_login() {
    let profile = test_profile();
    let uc = LoginUseCase {
        provider: MockCredentialProvider::accepting_password(&profile.subject_id, "Sup3rSecret!"),
        profiles: MockProfileRepo::new(vec![profile.clone()]),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
        token_ttl_secs: WEEK_SECS,
    };
    let result = uc
        .execute(LoginInput {
            email: profile.email,
            password: "WrongPass1!".to_owned(),
        })
        .await;
    assert!(matches!(result, Err(IdentityError::InvalidCredentials)));
}

#[tokio::test]
async fn should_not_reveal_missing_profile_on_login() {
    // Provider accepts the pair but no local profile exists — same answer
    // as a wrong password.
    let uc = LoginUseCase {
        provider: MockCredentialProvider::accepting_password("subject-0042", "Sup3rSecret!"),
        profiles: MockProfileRepo::empty(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
        token_ttl_secs: WEEK_SECS,
    };
    let result = uc
        .execute(LoginInput {
            email: "ghost@example.com".to_owned(),
            password: "Sup3rSecret!".to_owned(),
        })
        .await;
    assert!(matches!(result, Err(IdentityError::InvalidCredentials)));
}

#[tokio::test]
async fn should_delete_provider_account_and_profile() {
    let profile = test_profile();
    let provider = MockCredentialProvider::new(&profile.subject_id);
    let deleted = std::sync::Arc::clone(&provider.deleted_subjects);
    let profiles = MockProfileRepo::new(vec![profile.clone()]);
    let profiles_handle = profiles.profiles_handle();

    let uc = DeleteAccountUseCase { provider, profiles };
    uc.execute(profile.id).await.unwrap();

    assert_eq!(*deleted.lock().unwrap(), vec![profile.subject_id]);
    assert!(profiles_handle.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_return_not_found_for_unknown_profile_on_delete() {
    let uc = DeleteAccountUseCase {
        provider: MockCredentialProvider::new("subject-0042"),
        profiles: MockProfileRepo::empty(),
    };
    let result = uc.execute(Uuid::now_v7()).await;
    assert!(matches!(result, Err(IdentityError::ProfileNotFound)));
}
