use crate::{
    op::{self, Operation},
    query, Elasticsearch,
};

use futures::future::try_join_all;
use serde_json::Value as Json;
use std::sync::Arc;
use strata_core::{
    async_trait,
    config::EsParams,
    model::{Descriptor, Model, WriteResult},
    stmt::{normalize, Record, Value},
    Driver, Error, Result,
};

/// Primary key field of every document.
const ID: &str = "id";

/// Upper bound used to approximate "every hit" in a single search.
const FIND_ALL_SIZE: u64 = 99_999;

/// Largest page `paged_find` asks for.
const MAX_PAGE_SIZE: u64 = 1_000;

/// The search-engine backend.
#[derive(Debug)]
pub struct EsBackend<D = Elasticsearch> {
    driver: Arc<D>,
}

/// A model bound to one index and type.
#[derive(Debug)]
pub struct EsModel<D = Elasticsearch> {
    descriptor: Descriptor,
    driver: Arc<D>,
}

impl EsBackend<Elasticsearch> {
    pub fn new(params: &EsParams) -> Result<Self> {
        Ok(Self::from_driver(Elasticsearch::new(params)?))
    }
}

impl<D> EsBackend<D>
where
    D: Driver<Operation = Operation, Response = Json>,
{
    pub fn from_driver(driver: D) -> Self {
        Self {
            driver: Arc::new(driver),
        }
    }

    /// The raw client, for operations models do not cover.
    pub fn client(&self) -> &D {
        &self.driver
    }

    /// Binds a model to `descriptor`, which must name both an index and a
    /// type.
    pub fn extend(&self, descriptor: Descriptor) -> Result<EsModel<D>> {
        descriptor.validate(true)?;

        Ok(EsModel {
            descriptor,
            driver: self.driver.clone(),
        })
    }
}

impl<D> Clone for EsBackend<D> {
    fn clone(&self) -> Self {
        Self {
            driver: self.driver.clone(),
        }
    }
}

impl<D> EsModel<D>
where
    D: Driver<Operation = Operation, Response = Json>,
{
    fn index(&self) -> String {
        self.descriptor.table_name().to_string()
    }

    fn ty(&self) -> String {
        self.descriptor.table_type().unwrap_or_default().to_string()
    }

    fn to_wire(&self, record: Record) -> Record {
        normalize(self.descriptor.mapper().to_wire(record))
    }

    fn from_wire(&self, record: Record) -> Record {
        self.descriptor.mapper().from_wire(record)
    }

    async fn exec(&self, op: impl Into<Operation>) -> Result<Json> {
        self.driver.exec(op.into()).await
    }

    async fn search(
        &self,
        criteria: &Record,
        fields: Option<Vec<String>>,
        from: u64,
        size: u64,
    ) -> Result<Json> {
        self.exec(op::Search {
            index: self.index(),
            ty: self.ty(),
            from,
            size,
            body: query::build_term_filter_query(criteria),
            fields,
        })
        .await
    }

    /// Indexes one record, under its `id` when it has one. Resolves to the
    /// document id.
    async fn save_one(&self, input: Record) -> Result<WriteResult> {
        let resource = self.to_wire(input);

        let res = self
            .exec(op::Index {
                index: self.index(),
                ty: self.ty(),
                id: document_id(&resource),
                body: resource.to_json(),
            })
            .await?;

        Ok(WriteResult::affected(1).with_id(Value::String(query::unwrap_id(&res)?)))
    }
}

/// The document id carried by a record: its truthy `id` field.
fn document_id(record: &Record) -> Option<String> {
    record
        .get(ID)
        .filter(|id| id.is_truthy())
        .and_then(Value::to_key_string)
}

#[async_trait]
impl<D> Model for EsModel<D>
where
    D: Driver<Operation = Operation, Response = Json>,
{
    fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    async fn save(&self, input: Record) -> Result<WriteResult> {
        self.save_one(input).await
    }

    async fn save_in_batch(&self, input: Vec<Record>) -> Result<()> {
        tracing::debug!(
            index = self.descriptor.table_name(),
            records = input.len(),
            "saving batch"
        );

        try_join_all(input.into_iter().map(|record| self.save_one(record))).await?;
        Ok(())
    }

    async fn fetch(&self, input: Record, fields: &[&str]) -> Result<Option<Record>> {
        let resource = self.to_wire(input);
        let fields = query::build_projection(fields);
        let projected = fields.is_some();

        let res = match document_id(&resource) {
            Some(id) => {
                let get = op::Get {
                    index: self.index(),
                    ty: self.ty(),
                    id,
                    fields,
                };

                match self.exec(get).await {
                    Ok(res) => res,
                    Err(e) if e.is_record_not_found() => return Ok(None),
                    Err(e) => return Err(e),
                }
            }
            None => self.search(&resource, fields, 0, 1).await?,
        };

        Ok(query::unwrap_fetch(&res, projected)?.map(|record| self.from_wire(record)))
    }

    async fn find(&self, criteria: Option<Record>, fields: Option<&[&str]>) -> Result<Vec<Record>> {
        let criteria = self.to_wire(criteria.unwrap_or_default());
        let fields = query::build_projection(fields.unwrap_or_default());
        let projected = fields.is_some();

        let res = self.search(&criteria, fields, 0, FIND_ALL_SIZE).await?;

        Ok(query::unwrap_hits(&res, projected)?
            .into_iter()
            .map(|record| self.from_wire(record))
            .collect())
    }

    async fn paged_find(
        &self,
        criteria: Option<Record>,
        fields: Option<&[&str]>,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<Record>> {
        let criteria = self.to_wire(criteria.unwrap_or_default());
        let fields = query::build_projection(fields.unwrap_or_default());
        let projected = fields.is_some();

        let res = self
            .search(&criteria, fields, skip, limit.min(MAX_PAGE_SIZE))
            .await?;

        Ok(query::unwrap_hits(&res, projected)?
            .into_iter()
            .map(|record| self.from_wire(record))
            .collect())
    }

    async fn get_in_batch(&self, ids: Option<Vec<Value>>) -> Result<Option<Vec<Record>>> {
        let ids = match ids {
            Some(ids) if !ids.is_empty() => ids,
            _ => return Ok(None),
        };

        let res = self
            .exec(op::MultiGet {
                index: self.index(),
                ty: self.ty(),
                ids: ids.iter().map(Value::to_json).collect(),
            })
            .await?;

        Ok(Some(
            query::unwrap_mget(&res)?
                .into_iter()
                .map(|record| self.from_wire(record))
                .collect(),
        ))
    }

    async fn update(&self, where_clause: Record, set_fields: Record) -> Result<WriteResult> {
        let Some(id) = document_id(&where_clause) else {
            return Err(Error::configuration("id must be defined"));
        };

        let resource = self.to_wire(set_fields);

        let res = self
            .exec(op::Update {
                index: self.index(),
                ty: self.ty(),
                id,
                body: query::build_partial_update_doc(&resource),
            })
            .await?;

        Ok(WriteResult::affected(1).with_id(Value::String(query::unwrap_id(&res)?)))
    }

    async fn delete_object(&self, input: Record) -> Result<WriteResult> {
        let resource = self.to_wire(input);

        let res = match document_id(&resource) {
            Some(id) => {
                self.exec(op::Delete {
                    index: self.index(),
                    ty: self.ty(),
                    id,
                })
                .await?
            }
            None => {
                self.exec(op::DeleteByQuery {
                    index: self.index(),
                    ty: self.ty(),
                    body: query::build_term_filter_query(&resource),
                })
                .await?
            }
        };

        Ok(WriteResult::affected(deleted_count(&res)))
    }

    async fn delete_all(&self) -> Result<()> {
        self.exec(op::DeleteByQuery {
            index: self.index(),
            ty: self.ty(),
            body: query::match_all(),
        })
        .await?;

        Ok(())
    }
}

/// A delete by id reports `found`; a delete by query may report `deleted`.
fn deleted_count(res: &Json) -> u64 {
    match (res.get("found"), res.get("deleted")) {
        (Some(Json::Bool(found)), _) => u64::from(*found),
        (_, Some(deleted)) => deleted.as_u64().unwrap_or(0),
        _ => 0,
    }
}
