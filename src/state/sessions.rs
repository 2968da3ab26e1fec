//! Token-keyed session registry persisted across restarts.

use std::{fs, io::ErrorKind, path::PathBuf};

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::{info, warn};
use uuid::Uuid;

use crate::dao::models::UserEntity;

/// Authenticated session handed out on login or registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Opaque bearer token the client presents on subsequent requests.
    pub token: String,
    /// Identifier of the user row the session belongs to.
    pub user_id: Uuid,
    /// Normalized discord identity of the user.
    pub discord_id: String,
    /// Whether the session carries the owner role.
    pub owner: bool,
    /// When the session was opened.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Registry of live sessions, mirrored to a JSON file so a returning client's
/// token survives restarts.
///
/// Persistence is best effort: a file that cannot be read or written costs
/// returning clients a fresh login, nothing more.
pub struct SessionRegistry {
    path: PathBuf,
    sessions: DashMap<String, Session>,
}

impl SessionRegistry {
    /// Load the registry persisted at `path`, starting empty when the file is
    /// missing or unreadable.
    pub fn load(path: PathBuf) -> Self {
        let sessions = DashMap::new();
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<Vec<Session>>(&contents) {
                Ok(stored) => {
                    for session in stored {
                        sessions.insert(session.token.clone(), session);
                    }
                    info!(
                        path = %path.display(),
                        count = sessions.len(),
                        "restored persisted sessions"
                    );
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse persisted sessions; starting empty"
                    );
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read persisted sessions; starting empty"
                );
            }
        }

        Self { path, sessions }
    }

    /// Open a new session for `user` and persist the registry.
    pub fn open(&self, user: &UserEntity, owner: bool) -> Session {
        let session = Session {
            token: Uuid::new_v4().simple().to_string(),
            user_id: user.id,
            discord_id: user.discord_id.clone(),
            owner,
            created_at: OffsetDateTime::now_utc(),
        };
        self.sessions
            .insert(session.token.clone(), session.clone());
        self.persist();
        session
    }

    /// Look up a session by its token.
    pub fn get(&self, token: &str) -> Option<Session> {
        self.sessions.get(token).map(|entry| entry.value().clone())
    }

    /// Close the session holding `token`, returning whether one existed.
    pub fn close(&self, token: &str) -> bool {
        let removed = self.sessions.remove(token).is_some();
        if removed {
            self.persist();
        }
        removed
    }

    /// Close every session belonging to a deleted user.
    pub fn drop_user(&self, user_id: Uuid) {
        let before = self.sessions.len();
        self.sessions.retain(|_, session| session.user_id != user_id);
        if self.sessions.len() != before {
            self.persist();
        }
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether no session is currently open.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn persist(&self) {
        let stored: Vec<Session> = self
            .sessions
            .iter()
            .map(|entry| entry.value().clone())
            .collect();

        let contents = match serde_json::to_string_pretty(&stored) {
            Ok(contents) => contents,
            Err(err) => {
                warn!(error = %err, "failed to serialize sessions");
                return;
            }
        };

        if let Some(parent) = self.path.parent()
            && let Err(err) = fs::create_dir_all(parent)
        {
            warn!(
                path = %self.path.display(),
                error = %err,
                "failed to create session directory"
            );
            return;
        }

        if let Err(err) = fs::write(&self.path, contents) {
            warn!(
                path = %self.path.display(),
                error = %err,
                "failed to persist sessions"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_registry_path() -> PathBuf {
        std::env::temp_dir().join(format!("mctiers-sessions-{}.json", Uuid::new_v4().simple()))
    }

    fn sample_user(discord_id: &str) -> UserEntity {
        UserEntity {
            id: Uuid::new_v4(),
            discord_id: discord_id.into(),
            owner: false,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn open_close_round_trip() {
        let registry = SessionRegistry::load(temp_registry_path());
        let session = registry.open(&sample_user("steve"), false);

        assert_eq!(
            registry.get(&session.token).map(|s| s.user_id),
            Some(session.user_id)
        );
        assert!(registry.close(&session.token));
        assert!(!registry.close(&session.token));
        assert!(registry.get(&session.token).is_none());
    }

    #[test]
    fn sessions_survive_a_reload() {
        let path = temp_registry_path();
        let token = {
            let registry = SessionRegistry::load(path.clone());
            registry.open(&sample_user("alex"), true).token
        };

        let reloaded = SessionRegistry::load(path.clone());
        let session = reloaded.get(&token).expect("persisted session");
        assert!(session.owner);
        assert_eq!(session.discord_id, "alex");

        let _ = fs::remove_file(path);
    }

    #[test]
    fn drop_user_closes_all_their_sessions() {
        let registry = SessionRegistry::load(temp_registry_path());
        let user = sample_user("herobrine");
        let first = registry.open(&user, false);
        let second = registry.open(&user, false);
        let other = registry.open(&sample_user("notch"), false);

        registry.drop_user(user.id);

        assert!(registry.get(&first.token).is_none());
        assert!(registry.get(&second.token).is_none());
        assert!(registry.get(&other.token).is_some());
    }
}
