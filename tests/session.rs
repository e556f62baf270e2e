mod common;

use common::{SharedStore, unreachable_api};
use ems_client::api::auth::RegisterProfile;
use ems_client::auth::access::can_access;
use ems_client::auth::session::SessionStore;
use ems_client::model::user::{ProfileUpdate, Role};
use ems_client::store::{KvStore, TOKEN_KEY, USER_KEY};

fn offline_session(store: &SharedStore) -> SessionStore {
    SessionStore::new(unreachable_api(), Box::new(store.clone()))
}

#[tokio::test]
async fn offline_login_falls_back_to_canned_profile_per_role() {
    for role in [Role::Admin, Role::Employee] {
        let store = SharedStore::new();
        let mut session = offline_session(&store);

        let identity = session.login("someone@corp.example", role).await;
        assert_eq!(identity.role, role);
        assert_eq!(identity.email, "someone@corp.example");
        // Name is derived from the local part when the email differs from
        // the template default.
        assert_eq!(identity.name, "someone");
        assert_eq!(session.token(), Some("mock-jwt-token-123"));
    }
}

#[tokio::test]
async fn template_email_keeps_template_name() {
    let store = SharedStore::new();
    let mut session = offline_session(&store);

    let identity = session.login("john@ems.com", Role::Employee).await;
    assert_eq!(identity.name, "John Doe");
    assert_eq!(identity.xp, 2450);
    assert_eq!(identity.level, 5);
}

#[tokio::test]
async fn session_survives_restart_via_store() {
    let store = SharedStore::new();
    let mut session = offline_session(&store);
    session.login("sarah@corp.example", Role::Admin).await;
    drop(session);

    // A fresh store over the same backing data restores the identity and
    // credential without re-validation.
    let restored = offline_session(&store);
    let identity = restored.current().expect("identity restored");
    assert_eq!(identity.email, "sarah@corp.example");
    assert_eq!(identity.role, Role::Admin);
    assert_eq!(restored.token(), Some("mock-jwt-token-123"));
}

#[tokio::test]
async fn logout_clears_session_and_denies_access() {
    let store = SharedStore::new();
    let mut session = offline_session(&store);
    session.login("sarah@corp.example", Role::Admin).await;
    assert!(can_access(session.current(), Some(&[Role::Admin])));

    session.logout().await;

    assert!(!session.is_authenticated());
    assert!(!can_access(session.current(), None));
    assert!(!can_access(session.current(), Some(&[Role::Admin])));
    assert!(store.get(USER_KEY).is_none());
    assert!(store.get(TOKEN_KEY).is_none());
}

#[tokio::test]
async fn register_always_ends_authenticated() {
    let store = SharedStore::new();
    let mut session = offline_session(&store);

    let ok = session
        .register(RegisterProfile {
            name: Some("Ada Lovelace".to_string()),
            email: Some("ada@corp.example".to_string()),
            ..Default::default()
        })
        .await;

    assert!(ok);
    let identity = session.current().expect("registration authenticates");
    assert_eq!(identity.name, "Ada Lovelace");
    assert_eq!(identity.role, Role::Employee);
    assert_eq!(identity.department, "General");
    assert_eq!(identity.xp, 0);
    assert_eq!(identity.level, 1);
    assert!(identity.avatar_url.as_deref().unwrap().contains("Ada Lovelace"));
    assert_eq!(session.token(), Some("mock-jwt-token-new-user"));
}

#[tokio::test]
async fn update_profile_without_session_fails_and_writes_nothing() {
    let store = SharedStore::new();
    let mut session = offline_session(&store);

    let ok = session
        .update_profile(ProfileUpdate {
            name: Some("Nobody".to_string()),
            ..Default::default()
        })
        .await;

    assert!(!ok);
    assert_eq!(store.len(), 0);
}

#[tokio::test]
async fn update_profile_merges_and_persists_despite_remote_failure() {
    let store = SharedStore::new();
    let mut session = offline_session(&store);
    session.login("john@ems.com", Role::Employee).await;

    let ok = session
        .update_profile(ProfileUpdate {
            department: Some("Platform".to_string()),
            age: Some(29),
            ..Default::default()
        })
        .await;

    assert!(ok);
    let identity = session.current().unwrap();
    assert_eq!(identity.department, "Platform");
    assert_eq!(identity.age, Some(29));
    // untouched fields survive the merge
    assert_eq!(identity.name, "John Doe");

    let restored = offline_session(&store);
    assert_eq!(restored.current().unwrap().department, "Platform");
}
