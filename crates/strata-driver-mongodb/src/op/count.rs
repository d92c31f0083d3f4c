use super::Response;
use crate::MongoDb;

use bson::Document;
use strata_core::{Error, Result};

/// Counts the documents matching `filter`.
#[derive(Debug, Clone, PartialEq)]
pub struct Count {
    pub collection: String,
    pub filter: Document,
}

pub(super) async fn execute(driver: &MongoDb, op: Count) -> Result<Response> {
    let count = driver
        .collection(&op.collection)
        .count_documents(op.filter)
        .await
        .map_err(Error::driver)?;

    Ok(Response::Count(count))
}
