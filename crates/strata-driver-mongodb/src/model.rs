use crate::{
    op::{self, Operation, Response},
    pool::{Connector, MongoConnector, Pool},
    query,
    value::{self, ID},
};

use bson::{doc, Document};
use futures::future::try_join_all;
use std::sync::Arc;
use strata_core::{
    async_trait,
    config::MongoParams,
    model::{Descriptor, Model, WriteResult},
    stmt::{normalize, Record, Value},
    Driver, Error, Result,
};

/// The document-store backend: a connection pool plus the server every model
/// of this backend talks to.
#[derive(Debug)]
pub struct MongoBackend<C: Connector = MongoConnector> {
    pool: Arc<Pool<C>>,
    server: Arc<MongoParams>,
}

/// A model bound to one collection.
#[derive(Debug)]
pub struct MongoModel<C: Connector = MongoConnector> {
    descriptor: Descriptor,
    pool: Arc<Pool<C>>,
    server: Arc<MongoParams>,
}

/// Options of [`MongoModel::update_with`] and [`MongoModel::raw_update`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UpdateOptions {
    /// Insert a document when nothing matches.
    pub upsert: bool,

    /// Update every match rather than the first one.
    pub multi: bool,
}

/// Arguments of [`MongoModel::find_and_modify`]. Documents are sent as
/// given.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FindAndModify {
    pub query: Document,
    pub sort: Option<Document>,
    pub remove: bool,
    pub update: Option<Document>,
    pub new: bool,
    pub fields: Option<Document>,
    pub upsert: bool,
}

impl MongoBackend<MongoConnector> {
    pub fn new(server: MongoParams) -> Self {
        Self::with_connector(MongoConnector, server)
    }
}

impl<C: Connector> MongoBackend<C> {
    pub fn with_connector(connector: C, server: MongoParams) -> Self {
        Self {
            pool: Arc::new(Pool::new(connector)),
            server: Arc::new(server),
        }
    }

    pub fn pool(&self) -> &Pool<C> {
        &self.pool
    }

    /// The pooled connection, for operations models do not cover.
    pub async fn client(&self) -> Result<Arc<C::Connection>> {
        self.pool.get(&self.server).await
    }

    pub fn extend(&self, descriptor: Descriptor) -> Result<MongoModel<C>> {
        descriptor.validate(false)?;

        Ok(MongoModel {
            descriptor,
            pool: self.pool.clone(),
            server: self.server.clone(),
        })
    }
}

impl<C: Connector> Clone for MongoBackend<C> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            server: self.server.clone(),
        }
    }
}

impl<C: Connector> MongoModel<C> {
    fn collection(&self) -> String {
        self.descriptor.table_name().to_string()
    }

    /// The field holding the primary key in application records.
    fn key_name(&self) -> &str {
        self.descriptor.id_attribute().unwrap_or(ID)
    }

    /// Moves the id attribute into `_id`, then applies the mapper.
    fn to_wire(&self, mut record: Record) -> Record {
        if let Some(attr) = self.descriptor.id_attribute() {
            if let Some(id) = record.remove(attr) {
                record.insert(ID, id);
            }
        }

        self.descriptor.mapper().to_wire(record)
    }

    fn from_wire(&self, doc: Document) -> Record {
        self.descriptor.mapper().from_wire(value::from_document(doc))
    }

    async fn exec(&self, op: impl Into<Operation>) -> Result<Response> {
        let conn = self.pool.get(&self.server).await?;
        conn.exec(op.into()).await
    }

    async fn find_documents(&self, find: op::Find) -> Result<Vec<Record>> {
        let docs = self.exec(find).await?.into_documents()?;
        Ok(docs.into_iter().map(|doc| self.from_wire(doc)).collect())
    }

    async fn update_document(
        &self,
        filter: Document,
        update: Document,
        options: UpdateOptions,
    ) -> Result<WriteResult> {
        let res = self
            .exec(op::Update {
                collection: self.collection(),
                filter,
                update,
                upsert: options.upsert,
                multi: options.multi,
            })
            .await?;

        match res {
            Response::Updated {
                matched,
                upserted_id,
                ..
            } => {
                let affected = matched + u64::from(upserted_id.is_some());
                Ok(WriteResult::affected(affected).with_id(upserted_id.map(value::from_bson)))
            }
            res => Err(Error::invalid_result(format!(
                "expected an update result; response={res:?}"
            ))),
        }
    }

    /// Persists one record: an upsert on `_id` when the record has a truthy
    /// one, an insert otherwise.
    async fn save_one(&self, input: Record) -> Result<WriteResult> {
        let record = normalize(self.descriptor.mapper().pre_save(self.to_wire(input)));

        match record.get(ID).filter(|id| id.is_truthy()).cloned() {
            Some(id) => {
                let filter = value::to_document(&Record::from_iter([(ID, id.clone())]));
                let update = query::build_update_document(record);

                let res = self
                    .update_document(
                        filter,
                        update,
                        UpdateOptions {
                            upsert: true,
                            multi: false,
                        },
                    )
                    .await?;

                Ok(res.with_id(id))
            }
            None => {
                let inserted = self
                    .exec(op::Insert {
                        collection: self.collection(),
                        document: value::to_document(&record),
                    })
                    .await?
                    .into_inserted_id()?;

                Ok(WriteResult::affected(1).with_id(value::from_bson(inserted)))
            }
        }
    }

    /// Applies `set_fields` under `$set` to the document matching
    /// `where_clause`, which must carry the primary key.
    pub async fn update_with(
        &self,
        where_clause: Record,
        set_fields: Record,
        options: UpdateOptions,
    ) -> Result<WriteResult> {
        let filter = normalize(self.to_wire(where_clause));
        let Some(id) = filter.get_defined(ID).cloned() else {
            return Err(Error::configuration(format!(
                "{} must be defined",
                self.key_name()
            )));
        };

        let set_fields = self.descriptor.mapper().pre_update(self.to_wire(set_fields));
        let update = query::build_update_document(set_fields);

        let res = self
            .update_document(value::to_document(&filter), update, options)
            .await?;

        let id = res.id.or(Some(id));
        Ok(WriteResult {
            affected: res.affected,
            id,
        })
    }

    /// Sends the filter and update document untouched.
    pub async fn raw_update(
        &self,
        where_clause: Document,
        update: Document,
        options: UpdateOptions,
    ) -> Result<WriteResult> {
        self.update_document(where_clause, update, options).await
    }

    pub async fn update_row(
        &self,
        where_clause: Document,
        update: Document,
        upsert: bool,
        multi: bool,
    ) -> Result<WriteResult> {
        self.raw_update(where_clause, update, UpdateOptions { upsert, multi })
            .await
    }

    /// Number of documents matching `criteria` (all when `None`).
    pub async fn get_count(&self, criteria: Option<Record>) -> Result<u64> {
        let filter = query::build_filter(self.to_wire(criteria.unwrap_or_default()));

        self.exec(op::Count {
            collection: self.collection(),
            filter,
        })
        .await?
        .into_count()
    }

    /// Appends the listed items to array fields, duplicates included.
    pub async fn append_array_items(
        &self,
        where_clause: Record,
        input: Record,
    ) -> Result<WriteResult> {
        self.mutate_arrays("$push", where_clause, input).await
    }

    /// Adds the listed items to array fields unless already present.
    pub async fn append_array_items_if_not_exist(
        &self,
        where_clause: Record,
        input: Record,
    ) -> Result<WriteResult> {
        self.mutate_arrays("$addToSet", where_clause, input).await
    }

    /// Removes matching items from array fields.
    pub async fn remove_array_items(
        &self,
        where_clause: Record,
        input: Record,
    ) -> Result<WriteResult> {
        self.mutate_arrays("$pull", where_clause, input).await
    }

    async fn mutate_arrays(
        &self,
        operator: &str,
        where_clause: Record,
        input: Record,
    ) -> Result<WriteResult> {
        let filter = query::build_filter(self.to_wire(where_clause));
        let mutation = query::build_array_mutation(self.to_wire(input));

        let mut update = Document::new();
        update.insert(operator, mutation);

        self.update_document(filter, update, UpdateOptions::default())
            .await
    }

    /// Modifies or removes one document atomically, returning it. Nothing
    /// matching is `Ok(None)`.
    pub async fn find_and_modify(&self, args: FindAndModify) -> Result<Option<Record>> {
        let doc = self
            .exec(op::FindAndModify {
                collection: self.collection(),
                query: args.query,
                sort: args.sort,
                remove: args.remove,
                update: args.update,
                new: args.new,
                fields: args.fields,
                upsert: args.upsert,
            })
            .await?
            .into_document()?;

        Ok(doc.map(|doc| self.from_wire(doc)))
    }

    /// The pooled connection this model uses.
    pub async fn raw_client(&self) -> Result<Arc<C::Connection>> {
        self.pool.get(&self.server).await
    }
}

#[async_trait]
impl<C: Connector> Model for MongoModel<C> {
    fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    async fn save(&self, input: Record) -> Result<WriteResult> {
        self.save_one(input).await
    }

    async fn save_in_batch(&self, input: Vec<Record>) -> Result<()> {
        tracing::debug!(
            collection = self.descriptor.table_name(),
            records = input.len(),
            "saving batch"
        );

        try_join_all(input.into_iter().map(|record| self.save_one(record))).await?;
        Ok(())
    }

    async fn fetch(&self, input: Record, fields: &[&str]) -> Result<Option<Record>> {
        let mut find = op::Find::new(self.collection(), query::build_filter(self.to_wire(input)));
        find.projection = query::build_projection(fields);
        find.limit = Some(1);

        Ok(self.find_documents(find).await?.into_iter().next())
    }

    async fn find(&self, criteria: Option<Record>, fields: Option<&[&str]>) -> Result<Vec<Record>> {
        let filter = query::build_filter(self.to_wire(criteria.unwrap_or_default()));

        let mut find = op::Find::new(self.collection(), filter);
        find.projection = query::build_projection(fields.unwrap_or_default());

        self.find_documents(find).await
    }

    async fn paged_find(
        &self,
        criteria: Option<Record>,
        fields: Option<&[&str]>,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<Record>> {
        let filter = query::build_filter(self.to_wire(criteria.unwrap_or_default()));

        let mut find = op::Find::new(self.collection(), filter);
        find.projection = query::build_projection(fields.unwrap_or_default());
        find.skip = Some(skip);
        find.limit = Some(i64::try_from(limit).unwrap_or(i64::MAX));

        self.find_documents(find).await
    }

    async fn get_in_batch(&self, ids: Option<Vec<Value>>) -> Result<Option<Vec<Record>>> {
        let ids = match ids {
            Some(ids) if !ids.is_empty() => ids,
            _ => return Ok(None),
        };

        let limit = i64::try_from(ids.len()).unwrap_or(i64::MAX);
        let mut filter = Document::new();
        filter.insert(ID, doc! { "$in": value::id_to_bson(&Value::List(ids)) });

        let mut find = op::Find::new(self.collection(), filter);
        find.limit = Some(limit);

        self.find_documents(find).await.map(Some)
    }

    async fn update(&self, where_clause: Record, set_fields: Record) -> Result<WriteResult> {
        self.update_with(where_clause, set_fields, UpdateOptions::default())
            .await
    }

    async fn delete_object(&self, input: Record) -> Result<WriteResult> {
        let criteria = self.descriptor.mapper().pre_delete(self.to_wire(input));

        let deleted = self
            .exec(op::Delete {
                collection: self.collection(),
                filter: query::build_filter(criteria),
            })
            .await?
            .into_count()?;

        Ok(WriteResult::affected(deleted))
    }

    async fn delete_all(&self) -> Result<()> {
        self.exec(op::Delete {
            collection: self.collection(),
            filter: Document::new(),
        })
        .await?;

        Ok(())
    }
}
