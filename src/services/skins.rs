//! Skin rendering URLs derived from player usernames.

use crate::{config::AppConfig, dao::models::PlayerEntity};

/// Pixel size requested for head renders on list views.
pub const AVATAR_SIZE: u16 = 64;
/// Pixel size requested for full-body renders on detail views.
pub const BODY_SIZE: u16 = 150;

/// Username substituted into skin URLs.
///
/// Non-premium players always resolve to the configured placeholder skin,
/// whatever their actual username; the rendering service would otherwise
/// serve someone else's skin for a name they do not own.
pub fn skin_username<'a>(config: &'a AppConfig, player: &'a PlayerEntity) -> &'a str {
    if player.premium {
        &player.username
    } else {
        config.skin_placeholder()
    }
}

/// Head render URL (`<base>/avatar/<name>/<size>`).
pub fn avatar_url(config: &AppConfig, player: &PlayerEntity, size: u16) -> String {
    format!(
        "{}/avatar/{}/{}",
        config.skin_base_url(),
        skin_username(config, player),
        size
    )
}

/// Full-body render URL (`<base>/body/<name>/<size>`).
pub fn body_url(config: &AppConfig, player: &PlayerEntity, size: u16) -> String {
    format!(
        "{}/body/{}/{}",
        config.skin_base_url(),
        skin_username(config, player),
        size
    )
}

#[cfg(test)]
mod tests {
    use time::OffsetDateTime;
    use uuid::Uuid;

    use super::*;

    fn player(username: &str, premium: bool) -> PlayerEntity {
        PlayerEntity {
            id: Uuid::new_v4(),
            username: username.into(),
            premium,
            tested: false,
            featured: false,
            featured_rank: None,
            game_modes: Vec::new(),
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn premium_players_use_their_own_skin() {
        let config = AppConfig::default();
        let url = avatar_url(&config, &player("Dream", true), AVATAR_SIZE);
        assert_eq!(url, "https://mc-heads.net/avatar/Dream/64");
    }

    #[test]
    fn cracked_players_fall_back_to_the_placeholder() {
        let config = AppConfig::default();
        let url = body_url(&config, &player("Dream", false), BODY_SIZE);
        assert_eq!(url, "https://mc-heads.net/body/MHF_Steve/150");
    }
}
