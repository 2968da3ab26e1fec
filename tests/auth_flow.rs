//! Registration and login flows driven through the in-process table store.

use std::sync::Arc;

use mctiers_back::{
    config::AppConfig,
    dao::table_store::memory::MemoryTableStore,
    services::{auth_service, roster_service},
    state::{AppState, SharedState},
};
use uuid::Uuid;

fn test_config() -> AppConfig {
    let session_path = std::env::temp_dir().join(format!(
        "mctiers-test-sessions-{}.json",
        Uuid::new_v4().simple()
    ));
    AppConfig::default().with_session_path(session_path)
}

async fn fresh_state() -> SharedState {
    let state = AppState::new(test_config());
    state
        .install_table_store(Arc::new(MemoryTableStore::new()))
        .await;
    roster_service::load(&state).await;
    state
}

#[tokio::test]
async fn register_twice_only_creates_one_user() {
    let state = fresh_state().await;

    let first = auth_service::register(&state, "SvMatteo").await.unwrap();
    assert!(first.is_some());

    // Same identity under trimmed, lowercased comparison.
    let second = auth_service::register(&state, "  SVMATTEO  ").await.unwrap();
    assert!(second.is_none());

    let snapshot = state.snapshot().await;
    assert_eq!(snapshot.users.len(), 1);
    assert_eq!(snapshot.users[0].discord_id, "svmatteo");
}

#[tokio::test]
async fn near_miss_of_the_owner_identity_is_not_owner() {
    let state = fresh_state().await;

    // The configured owner identity is "axolotal1212"; this differs by one
    // letter and must stay a regular account.
    let near_miss = auth_service::register(&state, "Axolotl1212")
        .await
        .unwrap()
        .expect("new account");
    assert!(!near_miss.owner);

    let owner = auth_service::register(&state, "AXOLOTAL1212")
        .await
        .unwrap()
        .expect("owner account");
    assert!(owner.owner);
}

#[tokio::test]
async fn owner_login_auto_creates_the_account() {
    let state = fresh_state().await;

    let unknown = auth_service::login(&state, "random_visitor").await.unwrap();
    assert!(unknown.is_none());
    assert!(state.snapshot().await.users.is_empty());

    let session = auth_service::login(&state, " Axolotal1212 ")
        .await
        .unwrap()
        .expect("owner session");
    assert!(session.owner);
    assert_eq!(session.discord_id, "axolotal1212");
    assert_eq!(state.snapshot().await.users.len(), 1);
}

#[tokio::test]
async fn login_is_idempotent() {
    let state = fresh_state().await;
    auth_service::register(&state, "steve").await.unwrap();

    let first = auth_service::login(&state, "steve")
        .await
        .unwrap()
        .expect("session");
    let second = auth_service::login(&state, "STEVE")
        .await
        .unwrap()
        .expect("session");

    assert_eq!(first.user_id, second.user_id);
    assert_eq!(first.discord_id, second.discord_id);
    assert_eq!(first.owner, second.owner);
}

#[tokio::test]
async fn logout_only_clears_the_session() {
    let state = fresh_state().await;
    let session = auth_service::register(&state, "alex")
        .await
        .unwrap()
        .expect("session");

    assert!(auth_service::logout(&state, &session.token));
    assert!(auth_service::current_session(&state, &session.token).is_none());

    // The user row is untouched; only the local session went away.
    assert_eq!(state.snapshot().await.users.len(), 1);
}

#[tokio::test]
async fn registration_fails_cleanly_in_degraded_mode() {
    let state = AppState::new(test_config());

    let result = auth_service::register(&state, "steve").await;
    assert!(result.is_err());
    assert!(state.sessions().is_empty());
}
