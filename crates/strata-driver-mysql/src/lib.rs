mod model;
pub use model::{MySqlBackend, MySqlModel};

mod value;

use mysql_async::{prelude::Queryable, Opts, OptsBuilder, Pool};
use strata_core::{
    async_trait, bail, config::MySqlParams, stmt::Record, Driver, Error, Result,
};
use strata_sql::{self as sql, Statement};

#[derive(Debug, Clone)]
pub struct MySQL {
    pool: Pool,

    /// Whether several statements may be sent in one call.
    multi_statements: bool,
}

/// What a statement produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// Rows affected by a write
    Count(u64),

    /// Rows returned by a query
    Rows(Vec<Record>),
}

impl MySQL {
    pub fn new(params: &MySqlParams) -> Self {
        let pool = Pool::new(opts(params));

        Self {
            pool,
            multi_statements: params.is_multi_statement,
        }
    }

    /// The underlying connection pool.
    pub fn pool(&self) -> &Pool {
        &self.pool
    }
}

fn opts(params: &MySqlParams) -> Opts {
    let collation = params.charset.to_lowercase();
    let charset = collation.split('_').next().unwrap_or("utf8").to_string();

    OptsBuilder::default()
        .ip_or_hostname(params.host.clone())
        .tcp_port(params.port)
        .user(Some(params.uid.clone()))
        .pass(Some(params.pwd.clone()))
        .db_name(Some(params.db.clone()))
        .client_found_rows(true)
        .init(vec![format!("SET NAMES {charset} COLLATE {collation}")])
        .into()
}

impl Response {
    pub fn into_count(self) -> Result<u64> {
        match self {
            Response::Count(count) => Ok(count),
            Response::Rows(_) => Err(Error::invalid_result("expected a row count, got rows")),
        }
    }

    pub fn into_rows(self) -> Result<Vec<Record>> {
        match self {
            Response::Rows(rows) => Ok(rows),
            Response::Count(_) => Err(Error::invalid_result("expected rows, got a row count")),
        }
    }
}

#[async_trait]
impl Driver for MySQL {
    type Operation = Statement;
    type Response = Response;

    async fn exec(&self, stmt: Statement) -> Result<Response> {
        if stmt.is_multi_statement() && !self.multi_statements {
            bail!(
                "statement on `{}` holds several statements but isMultiStatement is not enabled",
                stmt.table()
            );
        }

        let mut params: Vec<strata_core::Value> = Vec::new();
        let sql_as_str = sql::Serializer::mysql().serialize(&stmt, &mut params);

        tracing::debug!(table = stmt.table(), sql = %sql_as_str, "executing statement");

        let mut conn = self.pool.get_conn().await.map_err(Error::driver)?;

        if stmt.is_text() {
            conn.query_drop(sql_as_str.as_str()).await.map_err(Error::driver)?;
            return Ok(Response::Count(conn.affected_rows()));
        }

        let args = mysql_async::Params::from(
            params.iter().map(value::to_mysql).collect::<Vec<_>>(),
        );

        if matches!(stmt, Statement::Select(_)) {
            let rows: Vec<mysql_async::Row> =
                conn.exec(sql_as_str.as_str(), args).await.map_err(Error::driver)?;

            return Ok(Response::Rows(
                rows.into_iter().map(value::record_from_row).collect(),
            ));
        }

        conn.exec_drop(sql_as_str.as_str(), args)
            .await
            .map_err(Error::driver)?;

        Ok(Response::Count(conn.affected_rows()))
    }
}
