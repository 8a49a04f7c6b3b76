use std::collections::HashSet;
use std::sync::Arc;

use users::contract::model::{NewUser, UserUpdate};
use users::domain::error::DomainError;
use users::domain::registry::UserRegistry;

fn new_user(username: &str, email: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        email: email.to_string(),
    }
}

#[test]
fn test_create_then_get_returns_equal_record() {
    let registry = UserRegistry::new();

    let created = registry
        .create_user(new_user("alice", "a@x.com"))
        .expect("create should succeed");

    assert_eq!(created.username, "alice");
    assert_eq!(created.email, "a@x.com");
    assert!(created.created_at <= created.updated_at);

    let fetched = registry.get_user(&created.id).expect("get should succeed");
    assert_eq!(fetched, created);
}

#[test]
fn test_unknown_id_fails_with_not_found() {
    let registry = UserRegistry::new();

    let err = registry.get_user("u999").unwrap_err();
    assert_eq!(err, DomainError::user_not_found("u999"));

    let err = registry
        .update_user("u999", UserUpdate {
            username: "bob".to_string(),
            email: "b@x.com".to_string(),
        })
        .unwrap_err();
    assert_eq!(err, DomainError::user_not_found("u999"));

    let err = registry.delete_user("u999").unwrap_err();
    assert_eq!(err, DomainError::user_not_found("u999"));
}

#[test]
fn test_delete_is_permanent_and_repeat_reports_not_found() {
    let registry = UserRegistry::new();
    let user = registry.create_user(new_user("alice", "a@x.com")).unwrap();

    registry.delete_user(&user.id).expect("first delete succeeds");

    let err = registry.delete_user(&user.id).unwrap_err();
    assert_eq!(err, DomainError::user_not_found(user.id.clone()));

    let err = registry.get_user(&user.id).unwrap_err();
    assert_eq!(err, DomainError::user_not_found(user.id));
}

#[test]
fn test_update_preserves_identity_and_advances_updated_at() {
    let registry = UserRegistry::new();
    let created = registry.create_user(new_user("alice", "a@x.com")).unwrap();

    let updated = registry
        .update_user(&created.id, UserUpdate {
            username: "alice2".to_string(),
            email: "a2@x.com".to_string(),
        })
        .expect("update should succeed");

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.created_at, created.created_at);
    assert_eq!(updated.username, "alice2");
    assert_eq!(updated.email, "a2@x.com");
    assert!(updated.updated_at >= created.updated_at);
    assert!(updated.created_at <= updated.updated_at);

    let fetched = registry.get_user(&created.id).unwrap();
    assert_eq!(fetched, updated);
}

#[test]
fn test_empty_fields_are_rejected() {
    let registry = UserRegistry::new();

    let err = registry.create_user(new_user("", "a@x.com")).unwrap_err();
    assert_eq!(err, DomainError::empty_username());

    let err = registry.create_user(new_user("alice", "")).unwrap_err();
    assert_eq!(err, DomainError::empty_email());

    let user = registry.create_user(new_user("alice", "a@x.com")).unwrap();

    let err = registry
        .update_user(&user.id, UserUpdate {
            username: String::new(),
            email: "a@x.com".to_string(),
        })
        .unwrap_err();
    assert_eq!(err, DomainError::empty_username());

    let err = registry
        .update_user(&user.id, UserUpdate {
            username: "alice".to_string(),
            email: String::new(),
        })
        .unwrap_err();
    assert_eq!(err, DomainError::empty_email());

    // A rejected update leaves the record untouched
    let fetched = registry.get_user(&user.id).unwrap();
    assert_eq!(fetched, user);
}

#[test]
fn test_ids_are_not_reused_after_deletion() {
    let registry = UserRegistry::new();

    let first = registry.create_user(new_user("alice", "a@x.com")).unwrap();
    registry.delete_user(&first.id).unwrap();

    let second = registry.create_user(new_user("bob", "b@x.com")).unwrap();
    assert_ne!(second.id, first.id);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_concurrent_creates_yield_distinct_ids() {
    let registry = Arc::new(UserRegistry::new());

    let mut handles = Vec::new();
    for i in 0..100 {
        let registry = registry.clone();
        handles.push(tokio::spawn(async move {
            registry
                .create_user(NewUser {
                    username: format!("user{}", i),
                    email: format!("user{}@example.com", i),
                })
                .expect("create should succeed")
                .id
        }));
    }

    let mut ids = HashSet::new();
    for handle in handles {
        let id = handle.await.expect("task should not panic");
        assert!(ids.insert(id), "duplicate id assigned under concurrency");
    }

    assert_eq!(ids.len(), 100);
    assert_eq!(registry.user_count(), 100);
}

#[test]
fn test_full_lifecycle_scenario() {
    let registry = UserRegistry::new();

    let created = registry.create_user(new_user("alice", "a@x.com")).unwrap();
    assert_eq!(created.id, "u1");

    let fetched = registry.get_user("u1").unwrap();
    assert_eq!(fetched, created);

    let updated = registry
        .update_user("u1", UserUpdate {
            username: "alice2".to_string(),
            email: "a2@x.com".to_string(),
        })
        .unwrap();
    assert_eq!(updated.id, "u1");
    assert_eq!(updated.username, "alice2");
    assert_eq!(updated.email, "a2@x.com");

    registry.delete_user("u1").unwrap();

    let err = registry.get_user("u1").unwrap_err();
    assert_eq!(err, DomainError::user_not_found("u1"));
}
