//! Pure projections recomputed on read over the entity snapshot.
//!
//! Nothing here mutates or caches anything; every function derives its result
//! from the slice it is handed, so callers can recompute after each reload.

use crate::{
    dao::models::{PlayerEntity, UserEntity},
    state::tier::Tier,
};

/// Sentinel mode name selecting the unfiltered player list.
pub const MODE_ALL: &str = "all";

/// Number of featured slots on the landing view.
const FEATURED_SLOTS: usize = 3;

/// Players occupying the featured slots, ordered by slot, at most three.
pub fn featured_three(players: &[PlayerEntity]) -> Vec<PlayerEntity> {
    let mut featured: Vec<PlayerEntity> = players
        .iter()
        .filter(|player| player.featured && player.featured_rank.is_some())
        .cloned()
        .collect();
    featured.sort_by_key(|player| player.featured_rank);
    featured.truncate(FEATURED_SLOTS);
    featured
}

/// Players with at least one entry in `mode`, or everyone for [`MODE_ALL`].
///
/// Mode names match case-sensitively, exactly as administered.
pub fn filter_by_mode(players: &[PlayerEntity], mode: &str) -> Vec<PlayerEntity> {
    if mode == MODE_ALL {
        return players.to_vec();
    }

    players
        .iter()
        .filter(|player| {
            player
                .game_modes
                .iter()
                .any(|entry| entry.game_mode == mode)
        })
        .cloned()
        .collect()
}

/// Best (lowest-index) tier across a player's disciplines.
///
/// Entries whose label falls outside the fixed ladder are ignored.
pub fn best_tier(player: &PlayerEntity) -> Option<Tier> {
    player
        .game_modes
        .iter()
        .filter_map(|entry| Tier::from_label(&entry.tier))
        .min()
}

/// Sort ascending by best tier; players without a ranked discipline sort last.
///
/// The sort is stable, so players on equal tiers keep their snapshot order.
pub fn sort_by_best_tier(mut players: Vec<PlayerEntity>) -> Vec<PlayerEntity> {
    players.sort_by_key(|player| best_tier(player).map_or(usize::MAX, Tier::rank_index));
    players
}

/// One page of a derived listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page actually served after clamping.
    pub page: usize,
    /// Total number of pages; zero for an empty listing.
    pub page_count: usize,
    /// Number of items before paging.
    pub total: usize,
}

/// Slice `items` into the requested 1-based page of `page_size` entries.
///
/// Requests outside `[1, page_count]` clamp to the nearest valid page; an
/// empty listing serves page 1 with no items.
pub fn paginate<T: Clone>(items: &[T], page_size: usize, requested_page: usize) -> Page<T> {
    let total = items.len();
    let page_count = total.div_ceil(page_size);
    let page = requested_page.clamp(1, page_count.max(1));
    let start = (page - 1) * page_size;

    Page {
        items: items.iter().skip(start).take(page_size).cloned().collect(),
        page,
        page_count,
        total,
    }
}

/// The player whose username equals `query`, ignoring ASCII case.
///
/// Exact match only; a miss is a normal outcome, not an error.
pub fn find_exact<'a>(players: &'a [PlayerEntity], query: &str) -> Option<&'a PlayerEntity> {
    players
        .iter()
        .find(|player| player.username.eq_ignore_ascii_case(query))
}

/// Players whose username contains `fragment`, ignoring ASCII case.
pub fn search_players(players: &[PlayerEntity], fragment: &str) -> Vec<PlayerEntity> {
    let needle = fragment.to_ascii_lowercase();
    players
        .iter()
        .filter(|player| player.username.to_ascii_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Users whose discord identity contains `fragment`, ignoring ASCII case.
pub fn search_users(users: &[UserEntity], fragment: &str) -> Vec<UserEntity> {
    let needle = fragment.to_ascii_lowercase();
    users
        .iter()
        .filter(|user| user.discord_id.to_ascii_lowercase().contains(&needle))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use time::OffsetDateTime;
    use uuid::Uuid;

    use super::*;
    use crate::dao::models::GameModeTierEntity;

    fn player(username: &str, entries: &[(&str, &str)]) -> PlayerEntity {
        PlayerEntity {
            id: Uuid::new_v4(),
            username: username.into(),
            premium: false,
            tested: false,
            featured: false,
            featured_rank: None,
            game_modes: entries
                .iter()
                .map(|(game_mode, tier)| GameModeTierEntity {
                    game_mode: (*game_mode).into(),
                    tier: (*tier).into(),
                })
                .collect(),
            created_at: OffsetDateTime::now_utc(),
        }
    }

    fn featured(username: &str, rank: u8) -> PlayerEntity {
        PlayerEntity {
            featured: true,
            featured_rank: Some(rank),
            ..player(username, &[])
        }
    }

    fn usernames(players: &[PlayerEntity]) -> Vec<&str> {
        players.iter().map(|p| p.username.as_str()).collect()
    }

    #[test]
    fn featured_three_orders_by_slot_and_caps_at_three() {
        let players = vec![
            featured("third", 3),
            player("unranked", &[]),
            featured("first", 1),
            featured("second", 2),
        ];

        let top = featured_three(&players);
        assert_eq!(usernames(&top), ["first", "second", "third"]);
    }

    #[test]
    fn featured_without_rank_is_skipped() {
        let mut half_featured = player("no_rank", &[]);
        half_featured.featured = true;

        let top = featured_three(&[half_featured, featured("ranked", 2)]);
        assert_eq!(usernames(&top), ["ranked"]);
    }

    #[test]
    fn filter_all_sentinel_returns_everyone() {
        let players = vec![player("a", &[("SMP", "HT1")]), player("b", &[])];
        assert_eq!(filter_by_mode(&players, MODE_ALL).len(), 2);
    }

    #[test]
    fn filter_unknown_mode_returns_empty_set() {
        let players = vec![player("a", &[("SMP", "HT1")])];
        assert!(filter_by_mode(&players, "Skywars").is_empty());
        // mode names are case sensitive
        assert!(filter_by_mode(&players, "smp").is_empty());
    }

    #[test]
    fn best_tier_takes_the_minimum_across_entries() {
        let multi = player("multi", &[("SMP", "LT3"), ("Skywars", "HT2"), ("UHC", "LT5")]);
        assert_eq!(best_tier(&multi), Some(Tier::Ht2));
        assert_eq!(best_tier(&player("none", &[])), None);
    }

    #[test]
    fn sort_matches_the_fixed_ladder() {
        let players = vec![
            player("lt3", &[("SMP", "LT3")]),
            player("ht1", &[("SMP", "HT1")]),
            player("ht2", &[("SMP", "HT2")]),
        ];

        let sorted = sort_by_best_tier(filter_by_mode(&players, "SMP"));
        assert_eq!(usernames(&sorted), ["ht1", "ht2", "lt3"]);
    }

    #[test]
    fn players_without_disciplines_sort_last() {
        let players = vec![
            player("empty", &[]),
            player("lt5", &[("SMP", "LT5")]),
            player("bogus", &[("SMP", "S-TIER")]),
        ];

        let sorted = sort_by_best_tier(players);
        assert_eq!(usernames(&sorted)[0], "lt5");
    }

    #[test]
    fn pagination_concatenates_back_to_the_full_list() {
        let items: Vec<u32> = (0..25).collect();

        let mut collected = Vec::new();
        for page in 1..=3 {
            collected.extend(paginate(&items, 10, page).items);
        }

        assert_eq!(collected, items);
        assert_eq!(paginate(&items, 10, 1).items.len(), 10);
        assert_eq!(paginate(&items, 10, 3).items.len(), 5);
        assert_eq!(paginate(&items, 10, 3).page_count, 3);
    }

    #[test]
    fn pagination_clamps_out_of_range_pages() {
        let items: Vec<u32> = (0..25).collect();

        assert_eq!(paginate(&items, 10, 0).page, 1);
        assert_eq!(paginate(&items, 10, 99).page, 3);
        assert_eq!(paginate(&items, 10, 99).items.len(), 5);

        let empty = paginate(&Vec::<u32>::new(), 10, 7);
        assert_eq!(empty.page, 1);
        assert!(empty.items.is_empty());
    }

    #[test]
    fn find_exact_ignores_case_but_not_substrings() {
        let players = vec![player("Axolotl1212", &[])];

        assert!(find_exact(&players, "axolotl1212").is_some());
        assert!(find_exact(&players, "AXOLOTL1212").is_some());
        assert!(find_exact(&players, "Axolotl").is_none());
    }

    #[test]
    fn substring_search_is_case_insensitive() {
        let players = vec![player("Dream", &[]), player("dreamXD", &[]), player("Techno", &[])];
        assert_eq!(search_players(&players, "dream").len(), 2);
        assert!(search_players(&players, "zzz").is_empty());
    }
}
