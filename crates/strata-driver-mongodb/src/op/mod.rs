//! Native document-store operations.

mod count;
pub use count::Count;

mod delete;
pub use delete::Delete;

mod find;
pub use find::Find;

mod find_and_modify;
pub use find_and_modify::FindAndModify;

mod insert;
pub use insert::Insert;

mod update;
pub use update::Update;

use crate::MongoDb;
use bson::{Bson, Document};
use strata_core::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Count(Count),
    Delete(Delete),
    Find(Find),
    FindAndModify(FindAndModify),
    Insert(Insert),
    Update(Update),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Count(u64),
    Deleted(u64),
    Document(Option<Document>),
    Documents(Vec<Document>),
    Inserted(Bson),
    Updated {
        matched: u64,
        modified: u64,
        upserted_id: Option<Bson>,
    },
}

impl Operation {
    pub fn collection(&self) -> &str {
        match self {
            Operation::Count(op) => &op.collection,
            Operation::Delete(op) => &op.collection,
            Operation::Find(op) => &op.collection,
            Operation::FindAndModify(op) => &op.collection,
            Operation::Insert(op) => &op.collection,
            Operation::Update(op) => &op.collection,
        }
    }
}

impl From<Count> for Operation {
    fn from(value: Count) -> Self {
        Self::Count(value)
    }
}

impl From<Delete> for Operation {
    fn from(value: Delete) -> Self {
        Self::Delete(value)
    }
}

impl From<Find> for Operation {
    fn from(value: Find) -> Self {
        Self::Find(value)
    }
}

impl From<FindAndModify> for Operation {
    fn from(value: FindAndModify) -> Self {
        Self::FindAndModify(value)
    }
}

impl From<Insert> for Operation {
    fn from(value: Insert) -> Self {
        Self::Insert(value)
    }
}

impl From<Update> for Operation {
    fn from(value: Update) -> Self {
        Self::Update(value)
    }
}

impl Response {
    pub fn into_count(self) -> Result<u64> {
        match self {
            Response::Count(count) | Response::Deleted(count) => Ok(count),
            res => Err(unexpected("a count", &res)),
        }
    }

    pub fn into_documents(self) -> Result<Vec<Document>> {
        match self {
            Response::Documents(docs) => Ok(docs),
            res => Err(unexpected("documents", &res)),
        }
    }

    pub fn into_document(self) -> Result<Option<Document>> {
        match self {
            Response::Document(doc) => Ok(doc),
            res => Err(unexpected("a document", &res)),
        }
    }

    pub fn into_inserted_id(self) -> Result<Bson> {
        match self {
            Response::Inserted(id) => Ok(id),
            res => Err(unexpected("an inserted id", &res)),
        }
    }
}

fn unexpected(expected: &str, res: &Response) -> Error {
    Error::invalid_result(format!("expected {expected}; response={res:?}"))
}

/// A document without operator keys replaces the matched document whole.
pub(crate) fn is_replacement(update: &Document) -> bool {
    !update.keys().any(|key| key.starts_with('$'))
}

pub(crate) async fn execute_operation(driver: &MongoDb, op: Operation) -> Result<Response> {
    tracing::debug!(collection = op.collection(), ?op, "executing operation");

    match op {
        Operation::Count(op) => count::execute(driver, op).await,
        Operation::Delete(op) => delete::execute(driver, op).await,
        Operation::Find(op) => find::execute(driver, op).await,
        Operation::FindAndModify(op) => find_and_modify::execute(driver, op).await,
        Operation::Insert(op) => insert::execute(driver, op).await,
        Operation::Update(op) => update::execute(driver, op).await,
    }
}
