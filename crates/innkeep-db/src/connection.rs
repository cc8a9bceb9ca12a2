//! SurrealDB connection management.
//!
//! [`DbManager::open`] is the entry point for processes that serve the
//! account store: it connects, applies pending migrations and hands out
//! repositories bound to the connection.

use surrealdb::Surreal;
use surrealdb::engine::remote::ws::{Client, Ws};
use surrealdb::opt::auth::Root;
use tracing::info;

use crate::credential::CredentialHasher;
use crate::error::DbError;
use crate::repository::SurrealUserRepository;
use crate::schema::run_migrations;

/// Configuration for connecting to SurrealDB.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// WebSocket address, with or without a `ws://` scheme
    /// (e.g., `127.0.0.1:8000`).
    pub url: String,
    /// Namespace holding the account store.
    pub namespace: String,
    /// Database holding the `user` table.
    pub database: String,
    /// Root username for authentication.
    pub username: String,
    /// Root password for authentication.
    pub password: String,
}

impl DbConfig {
    /// The `host:port` the WebSocket engine dials.
    pub fn address(&self) -> &str {
        let url = self.url.trim();
        let url = url.strip_prefix("ws://").unwrap_or(url);
        url.trim_end_matches('/')
    }
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            url: "127.0.0.1:8000".into(),
            namespace: "innkeep".into(),
            database: "main".into(),
            username: "root".into(),
            password: "root".into(),
        }
    }
}

/// Manages a connection to SurrealDB.
#[derive(Clone)]
pub struct DbManager {
    db: Surreal<Client>,
}

impl DbManager {
    /// Connect to SurrealDB using the provided configuration.
    ///
    /// Authenticates as root, selects the configured namespace and
    /// database, and returns a ready-to-use manager. The schema is not
    /// touched; see [`DbManager::open`].
    pub async fn connect(config: &DbConfig) -> Result<Self, DbError> {
        info!(
            address = %config.address(),
            namespace = %config.namespace,
            database = %config.database,
            "Connecting to account store"
        );

        let db = Surreal::new::<Ws>(config.address()).await?;

        db.signin(Root {
            username: config.username.clone(),
            password: config.password.clone(),
        })
        .await?;

        db.use_ns(&config.namespace)
            .use_db(&config.database)
            .await?;

        info!("Connected to account store");

        Ok(Self { db })
    }

    /// Connect and bring the schema up to date.
    pub async fn open(config: &DbConfig) -> Result<Self, DbError> {
        let manager = Self::connect(config).await?;
        run_migrations(&manager.db).await?;
        Ok(manager)
    }

    /// An account store over this connection that seals credentials with
    /// `hasher`.
    pub fn users(&self, hasher: CredentialHasher) -> SurrealUserRepository<Client> {
        SurrealUserRepository::with_hasher(self.db.clone(), hasher)
    }
}
