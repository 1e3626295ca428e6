//! End-to-end authentication flows against an in-memory directory

#![allow(clippy::unwrap_used)]

use keygate_server::auth::TokenCodec;
use keygate_server::directory::{AccountDirectory, MemoryDirectory};
use keygate_server::{ApiError, AuthService};
use time::Duration;

const SECRET: &str = "integration-test-secret-32-characters!!";

fn service_with(directory: MemoryDirectory) -> AuthService<MemoryDirectory> {
    AuthService::new(directory, TokenCodec::new(SECRET, Duration::hours(1)))
}

#[tokio::test]
async fn register_then_identify_returns_same_view() {
    let service = service_with(MemoryDirectory::new());

    let registered = service
        .register("Ann", "ann@x.com", "secret1")
        .await
        .unwrap();
    assert_eq!(registered.user.name, "Ann");
    assert_eq!(registered.user.email, "ann@x.com");

    let view = service.identify(&registered.token).await.unwrap();
    assert_eq!(view, registered.user);
}

#[tokio::test]
async fn wrong_then_right_password() {
    let service = service_with(MemoryDirectory::new());
    let registered = service
        .register("Ann", "ann@x.com", "secret1")
        .await
        .unwrap();

    let wrong = service.login("ann@x.com", "wrong").await;
    assert!(matches!(wrong, Err(ApiError::InvalidCredentials)));

    let login = service.login("ann@x.com", "secret1").await.unwrap();
    assert_eq!(login.user, registered.user);
    // A fresh token is issued per login; either one resolves the identity
    assert_eq!(service.identify(&login.token).await.unwrap(), login.user);
}

#[tokio::test]
async fn duplicate_registration_leaves_one_account() {
    let directory = MemoryDirectory::new();
    let service = service_with(directory.clone());

    service
        .register("Ann", "ann@x.com", "secret1")
        .await
        .unwrap();
    let second = service.register("Impostor", "ANN@x.com", "secret2").await;

    assert!(matches!(second, Err(ApiError::DuplicateAccount)));
    assert_eq!(directory.len(), 1);
}

#[tokio::test]
async fn expired_token_is_unauthenticated() {
    let directory = MemoryDirectory::new();
    // Issue with a negative lifetime so the token is already expired
    let expired_issuer = AuthService::new(
        directory.clone(),
        TokenCodec::new(SECRET, Duration::seconds(-1)),
    );
    let registered = expired_issuer
        .register("Ann", "ann@x.com", "secret1")
        .await
        .unwrap();

    let service = service_with(directory);
    let result = service.identify(&registered.token).await;
    assert!(matches!(result, Err(ApiError::Unauthenticated)));
}

#[tokio::test]
async fn stored_hash_is_not_the_plaintext() {
    let directory = MemoryDirectory::new();
    let service = service_with(directory.clone());
    service
        .register("Ann", "ann@x.com", "secret1")
        .await
        .unwrap();

    let account = directory.find_by_email("ann@x.com").await.unwrap().unwrap();
    assert_ne!(account.password_hash, "secret1");
    assert!(account.password_hash.starts_with("$argon2"));
}
