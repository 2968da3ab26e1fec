use std::sync::Arc;

use futures::future::BoxFuture;
use reqwest::{
    Client, Method, RequestBuilder,
    header::{AUTHORIZATION, HeaderMap, HeaderValue},
};
use serde::{Serialize, de::DeserializeOwned};
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::dao::{
    models::{GameModeEntity, PlayerEntity, PlayerPatch, UserEntity},
    storage::StorageResult,
    table_store::{ChangeKind, Table, TableChange, TableStore},
};

use super::{
    config::RestConfig,
    error::{RestGatewayError, RestResult},
    models::{GameModeRow, GameModeTierRow, PlayerRow, PlayerRowPatch, UserRow},
};

/// Header carrying the gateway API key.
const API_KEY_HEADER: &str = "apikey";
/// Asks the gateway not to echo rows back on writes.
const PREFER_MINIMAL: (&str, &str) = ("Prefer", "return=minimal");
const CHANGE_FEED_CAPACITY: usize = 32;

/// Table store backed by the hosted PostgREST-style gateway.
///
/// The change feed carries one event per write performed through this handle;
/// subscribers treat every event as an invitation to reload, so its payload
/// stays deliberately coarse.
#[derive(Clone)]
pub struct RestTableStore {
    client: Client,
    base_url: Arc<str>,
    changes_tx: broadcast::Sender<TableChange>,
}

impl RestTableStore {
    /// Build the HTTP client and verify the gateway answers for the players table.
    pub async fn connect(config: RestConfig) -> RestResult<Self> {
        let mut headers = HeaderMap::new();
        if let Some(ref api_key) = config.api_key {
            if let Ok(value) = HeaderValue::from_str(api_key) {
                headers.insert(API_KEY_HEADER, value);
            }
            if let Ok(value) = HeaderValue::from_str(&format!("Bearer {api_key}")) {
                headers.insert(AUTHORIZATION, value);
            }
        }

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|source| RestGatewayError::ClientBuilder { source })?;

        let base_url = Arc::<str>::from(config.base_url.trim_end_matches('/'));
        let (changes_tx, _rx) = broadcast::channel(CHANGE_FEED_CAPACITY);

        let store = Self {
            client,
            base_url,
            changes_tx,
        };

        store.ensure_reachable().await?;
        Ok(store)
    }

    fn request(&self, method: Method, table: Table) -> RequestBuilder {
        let url = format!("{}/rest/v1/{}", self.base_url, table.as_str());
        self.client.request(method, url)
    }

    /// Probe the gateway with a minimal select so connectivity failures
    /// surface before the store is installed.
    async fn ensure_reachable(&self) -> RestResult<()> {
        let response = self
            .request(Method::GET, Table::Players)
            .query(&[("select", "id"), ("limit", "1")])
            .send()
            .await
            .map_err(|source| RestGatewayError::RequestSend {
                table: Table::Players.as_str(),
                source,
            })?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(RestGatewayError::RequestStatus {
                table: Table::Players.as_str(),
                status: response.status(),
            })
        }
    }

    async fn list_rows<T>(&self, table: Table, order: &str) -> RestResult<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let response = self
            .request(Method::GET, table)
            .query(&[("select", "*"), ("order", order)])
            .send()
            .await
            .map_err(|source| RestGatewayError::RequestSend {
                table: table.as_str(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(RestGatewayError::RequestStatus {
                table: table.as_str(),
                status: response.status(),
            });
        }

        response
            .json::<Vec<T>>()
            .await
            .map_err(|source| RestGatewayError::DecodeResponse {
                table: table.as_str(),
                source,
            })
    }

    async fn insert_row<T>(&self, table: Table, row: &T) -> RestResult<()>
    where
        T: ?Sized + Serialize,
    {
        let response = self
            .request(Method::POST, table)
            .header(PREFER_MINIMAL.0, PREFER_MINIMAL.1)
            .json(row)
            .send()
            .await
            .map_err(|source| RestGatewayError::RequestSend {
                table: table.as_str(),
                source,
            })?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(RestGatewayError::RequestStatus {
                table: table.as_str(),
                status: response.status(),
            })
        }
    }

    async fn mutate_rows<T>(
        &self,
        method: Method,
        table: Table,
        filter: (&str, String),
        body: Option<&T>,
    ) -> RestResult<()>
    where
        T: ?Sized + Serialize,
    {
        let mut builder = self
            .request(method, table)
            .header(PREFER_MINIMAL.0, PREFER_MINIMAL.1)
            .query(&[filter]);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|source| RestGatewayError::RequestSend {
                table: table.as_str(),
                source,
            })?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(RestGatewayError::RequestStatus {
                table: table.as_str(),
                status: response.status(),
            })
        }
    }

    fn notify(&self, table: Table, kind: ChangeKind) {
        let _ = self.changes_tx.send(TableChange { table, kind });
    }
}

fn row_patch(patch: PlayerPatch) -> PlayerRowPatch {
    PlayerRowPatch {
        username: patch.username,
        premium: patch.premium,
        tested: patch.tested,
        featured: patch.featured,
        featured_rank: patch
            .featured_rank
            .map(|rank| rank.map(i16::from)),
        game_modes: patch
            .game_modes
            .map(|modes| modes.into_iter().map(GameModeTierRow::from).collect()),
    }
}

impl TableStore for RestTableStore {
    fn list_players(&self) -> BoxFuture<'static, StorageResult<Vec<PlayerEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            let rows = store
                .list_rows::<PlayerRow>(Table::Players, "created_at.desc")
                .await?;
            Ok(rows.into_iter().map(Into::into).collect())
        })
    }

    fn insert_player(&self, player: PlayerEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            let row = PlayerRow::from(player);
            store.insert_row(Table::Players, &row).await?;
            store.notify(Table::Players, ChangeKind::Insert);
            Ok(())
        })
    }

    fn update_player(
        &self,
        id: Uuid,
        patch: PlayerPatch,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            let body = row_patch(patch);
            store
                .mutate_rows(
                    Method::PATCH,
                    Table::Players,
                    ("id", format!("eq.{id}")),
                    Some(&body),
                )
                .await?;
            store.notify(Table::Players, ChangeKind::Update);
            Ok(())
        })
    }

    fn delete_player(&self, id: Uuid) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .mutate_rows::<()>(
                    Method::DELETE,
                    Table::Players,
                    ("id", format!("eq.{id}")),
                    None,
                )
                .await?;
            store.notify(Table::Players, ChangeKind::Delete);
            Ok(())
        })
    }

    fn list_users(&self) -> BoxFuture<'static, StorageResult<Vec<UserEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            let rows = store
                .list_rows::<UserRow>(Table::Users, "created_at.desc")
                .await?;
            Ok(rows.into_iter().map(Into::into).collect())
        })
    }

    fn insert_user(&self, user: UserEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            let row = UserRow::from(user);
            store.insert_row(Table::Users, &row).await?;
            store.notify(Table::Users, ChangeKind::Insert);
            Ok(())
        })
    }

    fn delete_user(&self, id: Uuid) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .mutate_rows::<()>(
                    Method::DELETE,
                    Table::Users,
                    ("id", format!("eq.{id}")),
                    None,
                )
                .await?;
            store.notify(Table::Users, ChangeKind::Delete);
            Ok(())
        })
    }

    fn list_game_modes(&self) -> BoxFuture<'static, StorageResult<Vec<GameModeEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            let rows = store
                .list_rows::<GameModeRow>(Table::GameModes, "name.asc")
                .await?;
            Ok(rows
                .into_iter()
                .map(|row| GameModeEntity { name: row.name })
                .collect())
        })
    }

    fn insert_game_mode(&self, mode: GameModeEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            let row = GameModeRow { name: mode.name };
            store.insert_row(Table::GameModes, &row).await?;
            store.notify(Table::GameModes, ChangeKind::Insert);
            Ok(())
        })
    }

    fn delete_game_mode(&self, name: String) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .mutate_rows::<()>(
                    Method::DELETE,
                    Table::GameModes,
                    ("name", format!("eq.{name}")),
                    None,
                )
                .await?;
            store.notify(Table::GameModes, ChangeKind::Delete);
            Ok(())
        })
    }

    fn changes(&self) -> broadcast::Receiver<TableChange> {
        self.changes_tx.subscribe()
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.ensure_reachable().await.map_err(Into::into) })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.ensure_reachable().await.map_err(Into::into) })
    }
}
