//! User directory integration tests
//!
//! CRUD, search, and cache-coherence behavior of the directory service
//! over the in-memory store.

mod common;

use campusdir::directory::service::{DirectoryError, UserChanges};
use campusdir::users::model::NewUser;
use campusdir::users::store::UserStore;
use common::{registration, services};
use pretty_assertions::assert_eq;

fn new_user(username: &str) -> NewUser {
    NewUser {
        name: format!("{} Example", username),
        username: username.to_string(),
        email: format!("{}@example.com", username),
        password_hash: "$2b$12$integrationhash".to_string(),
        age: 25,
        university: "University of Colombo".to_string(),
        school: "School of Computing".to_string(),
        work: "".to_string(),
    }
}

#[tokio::test]
async fn test_listing_reflects_create_despite_caching() {
    let ctx = services();

    ctx.directory.create(new_user("alice")).await.unwrap();
    let first = ctx.directory.get_all().await.unwrap();
    assert_eq!(first.len(), 1);

    // The previous listing is cached with a five-minute TTL; the create
    // must invalidate it rather than leave it stale.
    ctx.directory.create(new_user("bob")).await.unwrap();
    let second = ctx.directory.get_all().await.unwrap();
    assert_eq!(second.len(), 2);
}

#[tokio::test]
async fn test_update_preserves_creation_timestamp() {
    let ctx = services();
    let created = ctx.directory.create(new_user("alice")).await.unwrap();

    let updated = ctx
        .directory
        .update(
            created.id,
            UserChanges {
                name: "Alice Renamed".to_string(),
                username: "alice".to_string(),
                email: "alice@example.com".to_string(),
                password_hash: None,
                age: 26,
                university: "University of Peradeniya".to_string(),
                school: "School of Computing".to_string(),
                work: "Acme".to_string(),
                active: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.created_at, created.created_at);
    assert_eq!(updated.name, "Alice Renamed");
    assert!(updated.updated_at >= created.updated_at);

    // The cached per-id entry was invalidated along with the listing.
    let fetched = ctx.directory.get_by_id(created.id).await.unwrap();
    assert_eq!(fetched.name, "Alice Renamed");
}

#[tokio::test]
async fn test_delete_excludes_from_all_reads() {
    let ctx = services();
    let alice = ctx.directory.create(new_user("alice")).await.unwrap();
    ctx.directory.create(new_user("bob")).await.unwrap();

    ctx.directory.delete(alice.id).await.unwrap();

    let listed = ctx.directory.get_all().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].username, "bob");

    let lookup = ctx.directory.get_by_id(alice.id).await;
    assert!(matches!(lookup, Err(DirectoryError::UserNotFound(_))));

    let search = ctx.directory.search_by_name("alice").await.unwrap();
    assert!(search.is_empty());
}

#[tokio::test]
async fn test_store_soft_delete_is_idempotent() {
    let ctx = services();
    let alice = ctx.directory.create(new_user("alice")).await.unwrap();

    ctx.store.soft_delete(alice.id).await.unwrap();
    ctx.store.soft_delete(alice.id).await.unwrap();

    assert!(ctx.store.find_by_id(alice.id).await.unwrap().is_none());
    assert_eq!(ctx.store.len().await, 1);
}

#[tokio::test]
async fn test_second_delete_through_service_misses() {
    let ctx = services();
    let alice = ctx.directory.create(new_user("alice")).await.unwrap();

    ctx.directory.delete(alice.id).await.unwrap();

    // The service checks existence through the active-only read path, so a
    // repeated delete reports the user as gone.
    let again = ctx.directory.delete(alice.id).await;
    assert!(matches!(again, Err(DirectoryError::UserNotFound(_))));
}

#[tokio::test]
async fn test_search_and_filters() {
    let ctx = services();

    let mut young = new_user("young_alice");
    young.age = 20;
    let mut old = new_user("old_bob");
    old.name = "Bob Senior".to_string();
    old.age = 45;
    old.university = "University of Peradeniya".to_string();

    ctx.directory.create(young).await.unwrap();
    ctx.directory.create(old).await.unwrap();

    let by_name = ctx.directory.search_by_name("senior").await.unwrap();
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].username, "old_bob");

    let by_university = ctx
        .directory
        .get_by_university("University of Peradeniya")
        .await
        .unwrap();
    assert_eq!(by_university.len(), 1);

    let in_range = ctx.directory.get_by_age_range(20, 45).await.unwrap();
    assert_eq!(in_range.len(), 2);
    let out_of_range = ctx.directory.get_by_age_range(21, 44).await.unwrap();
    assert!(out_of_range.is_empty());
}

#[tokio::test]
async fn test_registered_user_appears_in_directory() {
    let ctx = services();

    let registered = ctx
        .auth
        .register(registration("alice", "Secr3t!pass"))
        .await
        .unwrap();

    let listed = ctx.directory.get_all().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, registered.id);
}
