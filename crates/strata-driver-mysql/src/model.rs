use crate::{Response, MySQL};

use std::sync::Arc;
use strata_core::{
    async_trait,
    config::MySqlParams,
    model::{Descriptor, Model, WriteResult},
    stmt::{normalize, Record, Value},
    Driver, Error, Result,
};
use strata_sql::{stmt::Condition, Statement};

/// Primary key column of every relational table.
const PRIMARY_KEY: &str = "id";

/// The relational backend: a shared driver from which models are derived.
#[derive(Debug)]
pub struct MySqlBackend<D = MySQL> {
    driver: Arc<D>,
}

/// A model bound to one table.
#[derive(Debug)]
pub struct MySqlModel<D = MySQL> {
    descriptor: Descriptor,
    driver: Arc<D>,
}

impl MySqlBackend<MySQL> {
    pub fn new(params: &MySqlParams) -> Self {
        Self::from_driver(MySQL::new(params))
    }
}

impl<D> MySqlBackend<D>
where
    D: Driver<Operation = Statement, Response = Response>,
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

    pub fn extend(&self, descriptor: Descriptor) -> Result<MySqlModel<D>> {
        descriptor.validate(false)?;

        Ok(MySqlModel {
            descriptor,
            driver: self.driver.clone(),
        })
    }
}

impl<D> Clone for MySqlBackend<D> {
    fn clone(&self) -> Self {
        Self {
            driver: self.driver.clone(),
        }
    }
}

impl<D> MySqlModel<D>
where
    D: Driver<Operation = Statement, Response = Response>,
{
    fn table(&self) -> &str {
        self.descriptor.table_name()
    }

    fn to_wire(&self, record: Record) -> Record {
        normalize(self.descriptor.mapper().to_wire(record))
    }

    fn from_wire(&self, rows: Vec<Record>) -> Vec<Record> {
        let mapper = self.descriptor.mapper();
        rows.into_iter().map(|row| mapper.from_wire(row)).collect()
    }

    async fn query(&self, stmt: impl Into<Statement>) -> Result<Vec<Record>> {
        let rows = self.driver.exec(stmt.into()).await?.into_rows()?;
        Ok(self.from_wire(rows))
    }

    async fn write(&self, stmt: Statement) -> Result<u64> {
        self.driver.exec(stmt).await?.into_count()
    }
}

#[async_trait]
impl<D> Model for MySqlModel<D>
where
    D: Driver<Operation = Statement, Response = Response>,
{
    fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    async fn save(&self, input: Record) -> Result<WriteResult> {
        let row = self.to_wire(input);
        let id = row.get_defined(PRIMARY_KEY).cloned();

        let affected = self
            .write(Statement::upsert(self.table(), vec![row]))
            .await?;

        Ok(WriteResult::affected(affected).with_id(id))
    }

    async fn save_in_batch(&self, input: Vec<Record>) -> Result<()> {
        if input.is_empty() {
            return Ok(());
        }

        let rows = input
            .into_iter()
            .map(|record| self.to_wire(record))
            .collect::<Vec<_>>();

        tracing::debug!(table = self.table(), rows = rows.len(), "saving batch");

        self.write(Statement::upsert(self.table(), rows)).await?;
        Ok(())
    }

    async fn fetch(&self, input: Record, fields: &[&str]) -> Result<Option<Record>> {
        let criteria = self.to_wire(input);
        let select = Statement::select(self.table(), &criteria)
            .columns(fields)
            .limit(1);

        Ok(self.query(select).await?.into_iter().next())
    }

    async fn find(&self, criteria: Option<Record>, fields: Option<&[&str]>) -> Result<Vec<Record>> {
        let criteria = self.to_wire(criteria.unwrap_or_default());
        let select = Statement::select(self.table(), &criteria).columns(fields.unwrap_or_default());

        self.query(select).await
    }

    async fn paged_find(
        &self,
        criteria: Option<Record>,
        fields: Option<&[&str]>,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<Record>> {
        let criteria = self.to_wire(criteria.unwrap_or_default());
        let select = Statement::select(self.table(), &criteria)
            .columns(fields.unwrap_or_default())
            .offset(skip)
            .limit(limit);

        self.query(select).await
    }

    async fn get_in_batch(&self, ids: Option<Vec<Value>>) -> Result<Option<Vec<Record>>> {
        let ids = match ids {
            Some(ids) if !ids.is_empty() => ids,
            _ => return Ok(None),
        };

        let select = Statement::select(self.table(), &Record::new())
            .filter(Condition::In(PRIMARY_KEY.to_string(), ids));

        self.query(select).await.map(Some)
    }

    async fn update(&self, where_clause: Record, set_fields: Record) -> Result<WriteResult> {
        let criteria = self.to_wire(where_clause);
        let Some(id) = criteria.get_defined(PRIMARY_KEY).cloned() else {
            return Err(Error::configuration("id must be defined"));
        };

        let assignments = self.to_wire(set_fields);
        if assignments.is_empty() {
            return Ok(WriteResult::affected(0).with_id(id));
        }

        let affected = self
            .write(Statement::update(self.table(), &criteria, assignments))
            .await?;

        Ok(WriteResult::affected(affected).with_id(id))
    }

    async fn delete_object(&self, input: Record) -> Result<WriteResult> {
        let criteria = self.to_wire(input);
        let affected = self
            .write(Statement::delete(self.table(), &criteria))
            .await?;

        Ok(WriteResult::affected(affected))
    }

    async fn delete_all(&self) -> Result<()> {
        self.write(Statement::delete_all(self.table())).await?;
        Ok(())
    }
}
