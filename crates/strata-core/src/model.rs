mod descriptor;
pub use descriptor::Descriptor;

mod mapper;
pub use mapper::{from_fns, Identity, Mapper};

use crate::{async_trait, stmt::Record, stmt::Value, Result};

use std::fmt::Debug;

/// Outcome of a write: how many records the backend reports as touched and,
/// when the backend assigns or echoes one, the record's identifier.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct WriteResult {
    pub affected: u64,
    pub id: Option<Value>,
}

impl WriteResult {
    pub fn affected(affected: u64) -> Self {
        Self { affected, id: None }
    }

    pub fn with_id(mut self, id: impl Into<Option<Value>>) -> Self {
        self.id = id.into();
        self
    }
}

/// The operation contract every backend model implements.
///
/// A model is an immutable value produced by a backend's `extend`. It is
/// bound to one table, collection or index and to the backend's client, and
/// every call takes its input explicitly; nothing is retained between calls.
///
/// Inputs flow through the descriptor's [`Mapper`] (`to_wire`) and are
/// normalized before they reach a query builder. Every record handed back
/// passes through `from_wire`.
#[async_trait]
pub trait Model: Debug + Send + Sync {
    /// The descriptor the model was created from.
    fn descriptor(&self) -> &Descriptor;

    /// Persists one record.
    async fn save(&self, input: Record) -> Result<WriteResult>;

    /// Persists many records. Resolves once all are stored; any single
    /// failure fails the whole batch.
    async fn save_in_batch(&self, input: Vec<Record>) -> Result<()>;

    /// Finds at most one record matching `input`. When `fields` is
    /// non-empty only those fields are returned. Nothing matching is
    /// `Ok(None)`.
    async fn fetch(&self, input: Record, fields: &[&str]) -> Result<Option<Record>>;

    /// Finds every record matching `criteria` (all records when `None`).
    async fn find(&self, criteria: Option<Record>, fields: Option<&[&str]>) -> Result<Vec<Record>>;

    /// Same as [`find`](Model::find), windowed by `skip` and `limit`.
    async fn paged_find(
        &self,
        criteria: Option<Record>,
        fields: Option<&[&str]>,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<Record>>;

    /// Fetches the records whose primary key is one of `ids`. No ids at all
    /// resolves to `Ok(None)` rather than an empty list.
    async fn get_in_batch(&self, ids: Option<Vec<Value>>) -> Result<Option<Vec<Record>>>;

    /// Applies `set_fields` to the records matching `where_clause`. The
    /// where clause must carry the primary key; otherwise a configuration
    /// error is returned before any I/O.
    async fn update(&self, where_clause: Record, set_fields: Record) -> Result<WriteResult>;

    /// Deletes the records matching `input`.
    async fn delete_object(&self, input: Record) -> Result<WriteResult>;

    /// Deletes every record of the table, collection or index.
    async fn delete_all(&self) -> Result<()>;
}
