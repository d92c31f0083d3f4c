use crate::{MongoDb, Operation, Response};

use bson::doc;
use mongodb::{
    options::{ClientOptions, Credential, ServerAddress},
    Client,
};
use std::{collections::HashMap, fmt::Debug, sync::Arc};
use strata_core::{async_trait, config::MongoParams, Driver, Error, Result};
use tokio::sync::{Mutex, OnceCell};

/// Opens connections for a [`Pool`].
#[async_trait]
pub trait Connector: Debug + Send + Sync + 'static {
    type Connection: Driver<Operation = Operation, Response = Response>;

    /// Opens and, when credentials are configured, authenticates a
    /// connection to `server`.
    async fn open(&self, server: &MongoParams) -> Result<Self::Connection>;
}

/// Opens real connections with the `mongodb` driver.
#[derive(Debug, Default, Clone, Copy)]
pub struct MongoConnector;

#[async_trait]
impl Connector for MongoConnector {
    type Connection = MongoDb;

    async fn open(&self, server: &MongoParams) -> Result<MongoDb> {
        let mut options = ClientOptions::default();
        options.hosts = vec![ServerAddress::Tcp {
            host: server.host.clone(),
            port: Some(server.port),
        }];

        if let Some((user, pass)) = server.credentials() {
            let mut credential = Credential::default();
            credential.username = Some(user.to_string());
            credential.password = Some(pass.to_string());
            credential.source = Some(server.db.clone());
            options.credential = Some(credential);
        }

        let client = Client::with_options(options).map_err(Error::connection_pool)?;
        let database = client.database(&server.db);

        // The client connects lazily; ping so a bad host or bad credentials
        // fail here rather than on first use.
        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(Error::connection_pool)?;

        Ok(MongoDb::new(client, database))
    }
}

/// Connections shared by every model of a backend, keyed by `host:port`.
///
/// The first request for a key opens the connection; concurrent first
/// requests wait on that single open instead of racing. A failed open caches
/// nothing, so the next request tries again. Entries never expire.
#[derive(Debug)]
pub struct Pool<C: Connector = MongoConnector> {
    connector: C,
    entries: Mutex<HashMap<String, Arc<OnceCell<Arc<C::Connection>>>>>,
}

impl<C: Connector> Pool<C> {
    pub fn new(connector: C) -> Self {
        Self {
            connector,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    /// Returns the connection for `server`, opening it on first use.
    pub async fn get(&self, server: &MongoParams) -> Result<Arc<C::Connection>> {
        let key = server.pool_key();

        let cell = {
            let mut entries = self.entries.lock().await;
            entries.entry(key.clone()).or_default().clone()
        };

        if let Some(conn) = cell.get() {
            tracing::trace!(pool_key = %key, "reusing pooled connection");
            return Ok(conn.clone());
        }

        let conn = cell
            .get_or_try_init(|| async {
                tracing::debug!(pool_key = %key, "opening connection");
                self.connector.open(server).await.map(Arc::new)
            })
            .await?;

        Ok(conn.clone())
    }

    /// Number of open connections.
    pub async fn len(&self) -> usize {
        let entries = self.entries.lock().await;
        entries.values().filter(|cell| cell.initialized()).count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
