use super::{is_replacement, Response};
use crate::MongoDb;

use bson::Document;
use mongodb::options::{
    FindOneAndDeleteOptions, FindOneAndReplaceOptions, FindOneAndUpdateOptions, ReturnDocument,
};
use strata_core::{bail, Error, Result};

/// Atomically modifies or removes one document and returns it.
#[derive(Debug, Clone, PartialEq)]
pub struct FindAndModify {
    pub collection: String,
    pub query: Document,

    /// Picks the document when several match.
    pub sort: Option<Document>,

    /// Remove the document instead of updating it.
    pub remove: bool,

    pub update: Option<Document>,

    /// Return the document as it is after the update.
    pub new: bool,

    /// Fields of the returned document.
    pub fields: Option<Document>,

    pub upsert: bool,
}

pub(super) async fn execute(driver: &MongoDb, op: FindAndModify) -> Result<Response> {
    let collection = driver.collection(&op.collection);

    let return_document = if op.new {
        ReturnDocument::After
    } else {
        ReturnDocument::Before
    };

    let doc = match op.update {
        _ if op.remove => {
            let mut options = FindOneAndDeleteOptions::default();
            options.sort = op.sort;
            options.projection = op.fields;

            collection
                .find_one_and_delete(op.query)
                .with_options(options)
                .await
        }
        Some(update) if is_replacement(&update) => {
            let mut options = FindOneAndReplaceOptions::default();
            options.sort = op.sort;
            options.projection = op.fields;
            options.upsert = Some(op.upsert);
            options.return_document = Some(return_document);

            collection
                .find_one_and_replace(op.query, update)
                .with_options(options)
                .await
        }
        Some(update) => {
            let mut options = FindOneAndUpdateOptions::default();
            options.sort = op.sort;
            options.projection = op.fields;
            options.upsert = Some(op.upsert);
            options.return_document = Some(return_document);

            collection
                .find_one_and_update(op.query, update)
                .with_options(options)
                .await
        }
        None => bail!("findAndModify needs either `remove` or an update document"),
    }
    .map_err(Error::driver)?;

    Ok(Response::Document(doc))
}
