use super::{is_replacement, Response};
use crate::MongoDb;

use bson::Document;
use mongodb::{
    options::{ReplaceOptions, UpdateOptions},
    results::UpdateResult,
};
use strata_core::{bail, Error, Result};

/// Applies `update` to the documents matching `filter`.
///
/// An update document without operator keys replaces the first match.
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    pub collection: String,
    pub filter: Document,
    pub update: Document,

    /// Insert a document when nothing matches.
    pub upsert: bool,

    /// Update every match rather than the first one.
    pub multi: bool,
}

pub(super) async fn execute(driver: &MongoDb, op: Update) -> Result<Response> {
    let collection = driver.collection(&op.collection);

    let result: UpdateResult = if is_replacement(&op.update) {
        if op.multi {
            bail!("a replacement document cannot be applied to multiple documents");
        }

        let mut options = ReplaceOptions::default();
        options.upsert = Some(op.upsert);

        collection
            .replace_one(op.filter, op.update)
            .with_options(options)
            .await
            .map_err(Error::driver)?
    } else {
        let mut options = UpdateOptions::default();
        options.upsert = Some(op.upsert);

        if op.multi {
            collection
                .update_many(op.filter, op.update)
                .with_options(options)
                .await
                .map_err(Error::driver)?
        } else {
            collection
                .update_one(op.filter, op.update)
                .with_options(options)
                .await
                .map_err(Error::driver)?
        }
    };

    Ok(Response::Updated {
        matched: result.matched_count,
        modified: result.modified_count,
        upserted_id: result.upserted_id,
    })
}
