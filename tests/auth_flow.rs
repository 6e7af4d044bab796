//! Authentication flow integration tests
//!
//! Runs the register/login/delete scenario end to end against the wired
//! services.

mod common;

use campusdir::auth::service::AuthError;
use campusdir::directory::service::DirectoryError;
use common::{registration, services};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn test_register_login_delete_scenario() {
    let ctx = services();

    // Register alice.
    let alice = ctx
        .auth
        .register(registration("alice", "Secr3t!pass"))
        .await
        .unwrap();
    assert!(!alice.id.is_nil());
    assert_ne!(alice.password_hash, "Secr3t!pass");

    // Login with the right password yields a verifiable token.
    let outcome = ctx.auth.login("alice", "Secr3t!pass").await.unwrap();
    let claims = ctx.tokens.verify(&outcome.token).unwrap();
    assert_eq!(claims.sub, alice.id.to_string());
    assert_eq!(claims.username, "alice");

    // Login with the wrong password fails.
    let wrong = ctx.auth.login("alice", "wrong").await;
    assert!(matches!(wrong, Err(AuthError::InvalidCredentials)));

    // Delete alice, then the directory lookup misses.
    ctx.directory.delete(alice.id).await.unwrap();
    let lookup = ctx.directory.get_by_id(alice.id).await;
    assert!(matches!(lookup, Err(DirectoryError::UserNotFound(_))));
}

#[tokio::test]
async fn test_unknown_user_and_wrong_password_fail_alike() {
    let ctx = services();
    ctx.auth
        .register(registration("alice", "Secr3t!pass"))
        .await
        .unwrap();

    let unknown = ctx.auth.login("nobody", "whatever1").await;
    let wrong = ctx.auth.login("alice", "whatever1").await;

    // Same variant both ways; the caller learns nothing about which part
    // of the credential pair was bad.
    assert!(matches!(unknown, Err(AuthError::InvalidCredentials)));
    assert!(matches!(wrong, Err(AuthError::InvalidCredentials)));
}

#[tokio::test]
async fn test_duplicate_registration_leaves_first_intact() {
    let ctx = services();

    let first = ctx
        .auth
        .register(registration("alice", "Secr3t!pass"))
        .await
        .unwrap();

    let second = ctx
        .auth
        .register(registration("alice", "DifferentPass1"))
        .await;
    assert!(matches!(second, Err(AuthError::UserAlreadyExists(_))));

    // The original credential still works and only one record exists.
    let outcome = ctx.auth.login("alice", "Secr3t!pass").await.unwrap();
    assert_eq!(outcome.username, first.username);
    assert_eq!(ctx.store.len().await, 1);
}

#[tokio::test]
async fn test_login_after_delete_fails() {
    let ctx = services();
    let alice = ctx
        .auth
        .register(registration("alice", "Secr3t!pass"))
        .await
        .unwrap();

    ctx.directory.delete(alice.id).await.unwrap();

    // The username lookup is active-only, so the credential no longer
    // authenticates.
    let result = ctx.auth.login("alice", "Secr3t!pass").await;
    assert!(matches!(result, Err(AuthError::InvalidCredentials)));
}

#[tokio::test]
async fn test_deleted_username_stays_reserved() {
    let ctx = services();
    let alice = ctx
        .auth
        .register(registration("alice", "Secr3t!pass"))
        .await
        .unwrap();
    ctx.directory.delete(alice.id).await.unwrap();

    // Soft-deleted records keep their username and email reserved.
    let reregister = ctx.auth.register(registration("alice", "NewPass123")).await;
    assert!(matches!(reregister, Err(AuthError::UserAlreadyExists(_))));
}
