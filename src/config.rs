//! Application-level configuration loading, including the owner identity and skin service.

use std::{env, fs, io::ErrorKind, path::PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "MCTIERS_BACK_CONFIG_PATH";
/// Discord identity that is granted the owner role when no config overrides it.
const DEFAULT_OWNER_DISCORD_ID: &str = "axolotal1212";
/// Skin rendering service used to build avatar and body image URLs.
const DEFAULT_SKIN_BASE_URL: &str = "https://mc-heads.net";
/// Username substituted into skin URLs for non-premium players and load failures.
const DEFAULT_SKIN_PLACEHOLDER: &str = "MHF_Steve";
/// Number of players/users shown per page on list views.
const DEFAULT_PAGE_SIZE: usize = 10;
/// File where the session registry is persisted between restarts.
const DEFAULT_SESSION_PATH: &str = "config/sessions.json";

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    owner_discord_id: String,
    skin_base_url: String,
    skin_placeholder: String,
    page_size: usize,
    session_path: PathBuf,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to built-in defaults.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let config: Self = raw.into();
                    info!(path = %path.display(), "loaded configuration from file");
                    config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Discord identity that is granted the owner role on login or registration.
    ///
    /// Matching is case-insensitive against the trimmed input identity.
    pub fn owner_discord_id(&self) -> &str {
        &self.owner_discord_id
    }

    /// Whether a normalized discord identity designates the owner account.
    pub fn is_owner_identity(&self, normalized: &str) -> bool {
        normalized == self.owner_discord_id.to_lowercase()
    }

    /// Base URL of the skin rendering service.
    pub fn skin_base_url(&self) -> &str {
        &self.skin_base_url
    }

    /// Placeholder username used for non-premium players.
    pub fn skin_placeholder(&self) -> &str {
        &self.skin_placeholder
    }

    /// Page size applied by list and admin pagination.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Location of the persisted session registry.
    pub fn session_path(&self) -> &PathBuf {
        &self.session_path
    }

    /// Override the session registry location, keeping every other setting.
    pub fn with_session_path(mut self, path: PathBuf) -> Self {
        self.session_path = path;
        self
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            owner_discord_id: DEFAULT_OWNER_DISCORD_ID.into(),
            skin_base_url: DEFAULT_SKIN_BASE_URL.into(),
            skin_placeholder: DEFAULT_SKIN_PLACEHOLDER.into(),
            page_size: DEFAULT_PAGE_SIZE,
            session_path: PathBuf::from(DEFAULT_SESSION_PATH),
        }
    }
}

#[derive(Debug, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    owner_discord_id: Option<String>,
    skin_base_url: Option<String>,
    skin_placeholder: Option<String>,
    page_size: Option<usize>,
    session_path: Option<PathBuf>,
}

impl From<RawConfig> for AppConfig {
    fn from(raw: RawConfig) -> Self {
        let defaults = AppConfig::default();
        Self {
            owner_discord_id: raw.owner_discord_id.unwrap_or(defaults.owner_discord_id),
            skin_base_url: raw
                .skin_base_url
                .map(|url| url.trim_end_matches('/').to_owned())
                .unwrap_or(defaults.skin_base_url),
            skin_placeholder: raw.skin_placeholder.unwrap_or(defaults.skin_placeholder),
            page_size: raw.page_size.filter(|size| *size > 0).unwrap_or(defaults.page_size),
            session_path: raw.session_path.unwrap_or(defaults.session_path),
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_identity_matches_case_insensitively() {
        let config = AppConfig::default();
        assert!(config.is_owner_identity("axolotal1212"));
        assert!(!config.is_owner_identity("axolotl1212"));
    }

    #[test]
    fn zero_page_size_falls_back_to_default() {
        let raw = RawConfig {
            owner_discord_id: None,
            skin_base_url: Some("https://example.net/".into()),
            skin_placeholder: None,
            page_size: Some(0),
            session_path: None,
        };
        let config: AppConfig = raw.into();
        assert_eq!(config.page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(config.skin_base_url(), "https://example.net");
    }
}
