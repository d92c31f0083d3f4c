use super::Response;
use crate::MongoDb;

use bson::Document;
use strata_core::{Error, Result};

/// Inserts one document. The store assigns `_id` when the document has none.
#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    pub collection: String,
    pub document: Document,
}

pub(super) async fn execute(driver: &MongoDb, op: Insert) -> Result<Response> {
    let result = driver
        .collection(&op.collection)
        .insert_one(op.document)
        .await
        .map_err(Error::driver)?;

    Ok(Response::Inserted(result.inserted_id))
}
