//! Roster synchronization scenarios driven through the in-process table store.

use std::{sync::Arc, time::Duration};

use mctiers_back::{
    config::AppConfig,
    dao::{
        models::{GameModeTierEntity, PlayerEntity},
        table_store::memory::MemoryTableStore,
    },
    dto::admin::UpdatePlayerRequest,
    services::{admin_service, public_service, roster_service},
    state::{AppState, SharedState},
};
use time::OffsetDateTime;
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

async fn seed_player(state: &SharedState, username: &str, entries: &[(&str, &str)]) {
    roster_service::add_player(
        state,
        roster_service::NewPlayer {
            username: username.into(),
            premium: false,
            tested: true,
            game_modes: entries
                .iter()
                .map(|(game_mode, tier)| GameModeTierEntity {
                    game_mode: (*game_mode).into(),
                    tier: (*tier).into(),
                })
                .collect(),
        },
    )
    .await;
}

async fn player_by_name(state: &SharedState, username: &str) -> PlayerEntity {
    state
        .snapshot()
        .await
        .players
        .iter()
        .find(|player| player.username == username)
        .cloned()
        .unwrap_or_else(|| panic!("player `{username}` should exist"))
}

#[tokio::test]
async fn leaderboard_filters_and_sorts_by_best_tier() {
    let state = fresh_state().await;
    seed_player(&state, "mid", &[("SMP", "LT3")]).await;
    seed_player(&state, "best", &[("SMP", "HT1")]).await;
    seed_player(&state, "second", &[("SMP", "HT2")]).await;
    seed_player(&state, "other_mode", &[("Skywars", "HT1")]).await;

    let page = public_service::get_leaderboard(&state, Some("SMP"), 1).await;

    let usernames: Vec<&str> = page.players.iter().map(|p| p.username.as_str()).collect();
    assert_eq!(usernames, ["best", "second", "mid"]);
    assert_eq!(page.total, 3);
}

#[tokio::test]
async fn featured_slot_is_exclusive() {
    let state = fresh_state().await;
    seed_player(&state, "Alice", &[("SMP", "HT1")]).await;
    seed_player(&state, "Bob", &[("SMP", "HT2")]).await;

    let alice = player_by_name(&state, "Alice").await;
    let bob = player_by_name(&state, "Bob").await;

    roster_service::set_featured_player(&state, alice.id, 1).await;
    let alice = player_by_name(&state, "Alice").await;
    assert!(alice.featured);
    assert_eq!(alice.featured_rank, Some(1));

    // Handing the slot to Bob must evict Alice entirely.
    roster_service::set_featured_player(&state, bob.id, 1).await;

    let alice = player_by_name(&state, "Alice").await;
    let bob = player_by_name(&state, "Bob").await;
    assert!(!alice.featured);
    assert_eq!(alice.featured_rank, None);
    assert!(bob.featured);
    assert_eq!(bob.featured_rank, Some(1));

    let holders = state
        .snapshot()
        .await
        .players
        .iter()
        .filter(|player| player.featured_rank == Some(1))
        .count();
    assert_eq!(holders, 1);
}

#[tokio::test]
async fn featured_view_orders_by_slot() {
    let state = fresh_state().await;
    seed_player(&state, "third", &[]).await;
    seed_player(&state, "first", &[]).await;
    seed_player(&state, "second", &[]).await;

    for (name, rank) in [("third", 3), ("first", 1), ("second", 2)] {
        let player = player_by_name(&state, name).await;
        roster_service::set_featured_player(&state, player.id, rank).await;
    }

    let featured = public_service::get_featured(&state).await;
    let usernames: Vec<&str> = featured
        .players
        .iter()
        .map(|p| p.username.as_str())
        .collect();
    assert_eq!(usernames, ["first", "second", "third"]);
}

#[tokio::test]
async fn partial_update_keeps_absent_fields() {
    let state = fresh_state().await;
    seed_player(&state, "Dream", &[("SMP", "HT1")]).await;
    let before = player_by_name(&state, "Dream").await;

    admin_service::update_player(
        &state,
        before.id,
        UpdatePlayerRequest {
            username: Some("DreamXD".into()),
            premium: None,
            tested: None,
            game_modes: None,
        },
    )
    .await
    .unwrap();

    let after = player_by_name(&state, "DreamXD").await;
    assert_eq!(after.premium, before.premium);
    assert_eq!(after.tested, before.tested);
    assert_eq!(after.game_modes, before.game_modes);
    assert_eq!(after.created_at, before.created_at);
}

#[tokio::test]
async fn unknown_tier_labels_are_rejected() {
    let state = fresh_state().await;
    seed_player(&state, "Dream", &[("SMP", "HT1")]).await;
    let player = player_by_name(&state, "Dream").await;

    let result = admin_service::update_player(
        &state,
        player.id,
        UpdatePlayerRequest {
            username: None,
            premium: None,
            tested: None,
            game_modes: Some(vec![mctiers_back::dto::admin::GameModeTierInput {
                game_mode: "SMP".into(),
                tier: "S-TIER".into(),
            }]),
        },
    )
    .await;

    assert!(result.is_err());
    // The stored entry is untouched.
    assert_eq!(player_by_name(&state, "Dream").await.game_modes[0].tier, "HT1");
}

#[tokio::test]
async fn game_mode_set_ignores_blank_names_and_duplicates() {
    let state = fresh_state().await;

    roster_service::add_game_mode(&state, "   ").await;
    assert!(state.snapshot().await.game_modes.is_empty());

    roster_service::add_game_mode(&state, " Skywars ").await;
    roster_service::add_game_mode(&state, "Skywars").await;
    roster_service::add_game_mode(&state, "Bedwars").await;

    let modes = public_service::get_game_modes(&state).await.modes;
    assert_eq!(modes, ["Bedwars", "Skywars"]);
}

#[tokio::test]
async fn removing_a_game_mode_does_not_cascade_into_players() {
    let state = fresh_state().await;
    roster_service::add_game_mode(&state, "Skywars").await;
    seed_player(&state, "flier", &[("Skywars", "HT3")]).await;

    roster_service::remove_game_mode(&state, "Skywars").await;

    assert!(state.snapshot().await.game_modes.is_empty());
    let player = player_by_name(&state, "flier").await;
    assert_eq!(player.game_modes[0].game_mode, "Skywars");
}

#[tokio::test]
async fn deleting_a_user_keeps_player_records() {
    let state = fresh_state().await;
    seed_player(&state, "Dream", &[("SMP", "HT1")]).await;

    let user = {
        let store = state.table_store().await.unwrap();
        let user = mctiers_back::dao::models::UserEntity {
            id: Uuid::new_v4(),
            discord_id: "dream".into(),
            owner: false,
            created_at: OffsetDateTime::now_utc(),
        };
        store.insert_user(user.clone()).await.unwrap();
        roster_service::load(&state).await;
        user
    };

    admin_service::delete_user(&state, user.id).await;

    let snapshot = state.snapshot().await;
    assert!(snapshot.users.is_empty());
    assert_eq!(snapshot.players.len(), 1);
}

#[tokio::test]
async fn pagination_walks_the_whole_roster() {
    let state = fresh_state().await;
    for index in 0..25 {
        seed_player(&state, &format!("player_{index:02}"), &[("SMP", "HT1")]).await;
    }

    let mut seen = Vec::new();
    for page_number in 1..=3 {
        let page = public_service::get_leaderboard(&state, Some("SMP"), page_number).await;
        assert_eq!(page.page, page_number);
        assert_eq!(page.page_count, 3);
        seen.extend(page.players.into_iter().map(|p| p.username));
    }

    assert_eq!(seen.len(), 25);
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), 25, "every player appears exactly once");

    // Out-of-range pages clamp instead of erroring.
    let clamped = public_service::get_leaderboard(&state, Some("SMP"), 99).await;
    assert_eq!(clamped.page, 3);
    assert_eq!(clamped.players.len(), 5);
}

#[tokio::test]
async fn exact_search_ignores_case_but_not_substrings() {
    let state = fresh_state().await;
    seed_player(&state, "Axolotl1212", &[("SMP", "LT1")]).await;

    assert!(public_service::search(&state, "axolotl1212").await.is_some());
    assert!(public_service::search(&state, "Axolotl").await.is_none());
}

#[tokio::test]
async fn change_feed_reloads_the_snapshot() {
    let state = fresh_state().await;
    let feed = roster_service::subscribe(state.clone());

    // A second client writing through its own handle of the same store.
    let store = state.table_store().await.unwrap();
    store
        .insert_player(PlayerEntity {
            id: Uuid::new_v4(),
            username: "Dream".into(),
            premium: true,
            tested: false,
            featured: false,
            featured_rank: None,
            game_modes: Vec::new(),
            created_at: OffsetDateTime::now_utc(),
        })
        .await
        .unwrap();

    let mut synced = false;
    for _ in 0..100 {
        if state.snapshot().await.players.len() == 1 {
            synced = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(synced, "snapshot reloads after a change feed event");

    feed.unsubscribe();
}
