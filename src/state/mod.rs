pub mod sessions;
mod snapshot;
mod sse;
pub mod tier;

use std::sync::Arc;

use tokio::sync::{RwLock, watch};

use crate::{config::AppConfig, dao::table_store::TableStore, error::ServiceError};

pub use self::sessions::{Session, SessionRegistry};
pub use self::snapshot::Snapshot;
pub use self::sse::SseHub;

/// Shared handle to the central application state.
pub type SharedState = Arc<AppState>;

/// Central application state storing the entity snapshot, the session
/// registry, and the handle to the remote table gateway.
pub struct AppState {
    config: AppConfig,
    table_store: RwLock<Option<Arc<dyn TableStore>>>,
    snapshot: RwLock<Arc<Snapshot>>,
    sessions: SessionRegistry,
    updates: SseHub,
    degraded: watch::Sender<bool>,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    ///
    /// The application starts in degraded mode until a table store is installed.
    pub fn new(config: AppConfig) -> SharedState {
        let sessions = SessionRegistry::load(config.session_path().clone());
        let (degraded_tx, _rx) = watch::channel(true);
        Arc::new(Self {
            table_store: RwLock::new(None),
            snapshot: RwLock::new(Arc::new(Snapshot::default())),
            sessions,
            updates: SseHub::new(16),
            degraded: degraded_tx,
            config,
        })
    }

    /// Immutable runtime configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Obtain a handle to the current table store, if one is installed.
    pub async fn table_store(&self) -> Option<Arc<dyn TableStore>> {
        let guard = self.table_store.read().await;
        guard.as_ref().cloned()
    }

    /// Obtain the table store or fail with a degraded-mode error.
    pub async fn require_table_store(&self) -> Result<Arc<dyn TableStore>, ServiceError> {
        self.table_store().await.ok_or(ServiceError::Degraded)
    }

    /// Install a new table store implementation and leave degraded mode.
    pub async fn install_table_store(&self, store: Arc<dyn TableStore>) {
        {
            let mut guard = self.table_store.write().await;
            *guard = Some(store);
        }
        self.update_degraded(false).await;
    }

    /// Remove the current table store and enter degraded mode.
    pub async fn clear_table_store(&self) {
        {
            let mut guard = self.table_store.write().await;
            guard.take();
        }
        self.update_degraded(true).await;
    }

    /// Current degraded flag.
    pub async fn is_degraded(&self) -> bool {
        let guard = self.table_store.read().await;
        guard.is_none()
    }

    /// Subscribe to degraded mode updates.
    pub fn degraded_watcher(&self) -> watch::Receiver<bool> {
        self.degraded.subscribe()
    }

    /// Current entity snapshot.
    ///
    /// The returned handle stays internally consistent even while a reload
    /// swaps in a newer snapshot behind it.
    pub async fn snapshot(&self) -> Arc<Snapshot> {
        self.snapshot.read().await.clone()
    }

    /// Swap in a freshly loaded snapshot.
    ///
    /// All three collections are replaced in a single assignment; readers see
    /// either the previous snapshot or the new one, never a mix.
    pub async fn replace_snapshot(&self, snapshot: Snapshot) {
        let mut guard = self.snapshot.write().await;
        *guard = Arc::new(snapshot);
    }

    /// Registry of authenticated sessions keyed by token.
    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    /// Broadcast hub used for the live-updates SSE stream.
    pub fn updates_sse(&self) -> &SseHub {
        &self.updates
    }

    /// Update and broadcast the degraded flag when the value changes.
    async fn update_degraded(&self, value: bool) {
        self.degraded.send_if_modified(|current| {
            let changed = *current != value;
            *current = value;
            changed
        });
    }
}
