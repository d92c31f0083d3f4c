use super::Response;
use crate::MongoDb;

use bson::Document;
use strata_core::{Error, Result};

/// Removes every document matching `filter`. An empty filter empties the
/// collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    pub collection: String,
    pub filter: Document,
}

pub(super) async fn execute(driver: &MongoDb, op: Delete) -> Result<Response> {
    let result = driver
        .collection(&op.collection)
        .delete_many(op.filter)
        .await
        .map_err(Error::driver)?;

    Ok(Response::Deleted(result.deleted_count))
}
