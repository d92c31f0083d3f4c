mod model;
pub use model::{FindAndModify, MongoBackend, MongoModel, UpdateOptions};

pub mod op;
pub use op::{Operation, Response};

mod pool;
pub use pool::{Connector, MongoConnector, Pool};

pub mod query;

pub mod value;

use mongodb::{Client, Database};
use strata_core::{async_trait, Driver, Result};

/// A connection to one database of a document store.
#[derive(Debug, Clone)]
pub struct MongoDb {
    client: Client,
    database: Database,
}

impl MongoDb {
    pub fn new(client: Client, database: Database) -> Self {
        Self { client, database }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    fn collection(&self, name: &str) -> mongodb::Collection<bson::Document> {
        self.database.collection(name)
    }
}

#[async_trait]
impl Driver for MongoDb {
    type Operation = Operation;
    type Response = Response;

    async fn exec(&self, op: Operation) -> Result<Response> {
        op::execute_operation(self, op).await
    }
}
