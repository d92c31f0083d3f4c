use super::Response;
use crate::MongoDb;

use bson::Document;
use futures::TryStreamExt;
use mongodb::options::FindOptions;
use strata_core::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct Find {
    pub collection: String,
    pub filter: Document,

    /// Fields to return; `None` returns whole documents.
    pub projection: Option<Document>,

    pub skip: Option<u64>,

    pub limit: Option<i64>,
}

impl Find {
    pub fn new(collection: impl Into<String>, filter: Document) -> Self {
        Self {
            collection: collection.into(),
            filter,
            projection: None,
            skip: None,
            limit: None,
        }
    }
}

pub(super) async fn execute(driver: &MongoDb, op: Find) -> Result<Response> {
    let mut options = FindOptions::default();
    options.projection = op.projection;
    options.skip = op.skip;
    options.limit = op.limit;

    let cursor = driver
        .collection(&op.collection)
        .find(op.filter)
        .with_options(options)
        .await
        .map_err(Error::driver)?;

    let docs: Vec<Document> = cursor.try_collect().await.map_err(Error::driver)?;

    Ok(Response::Documents(docs))
}
