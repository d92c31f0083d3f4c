//! A small multi-backend persistence layer.
//!
//! One initialization entry point selects a backend (a relational database,
//! a document store or a search engine) and returns a [`Backend`]. Models
//! derived from it with [`Backend::extend`] all speak the same [`Model`]
//! contract:
//!
//! ```no_run
//! # async fn run() -> strata::Result<()> {
//! use strata::{record, Descriptor};
//!
//! let backend = strata::initialize(&serde_json::json!({
//!     "client": "mysql",
//!     "host": "localhost",
//!     "port": 3306,
//!     "db": "app",
//!     "uid": "dbuser",
//!     "pwd": "dbuser",
//! }))?;
//!
//! let users = backend.extend(Descriptor::new("users"))?;
//! users.save(record! { "id" => 1, "name" => "ftest1" }).await?;
//! let user = users.fetch(record! { "id" => 1 }, &[]).await?;
//! # Ok(())
//! # }
//! ```

#[cfg(not(any(feature = "mysql", feature = "mongodb", feature = "elasticsearch")))]
compile_error!("enable at least one of the `mysql`, `mongodb` or `elasticsearch` features");

mod backend;
pub use backend::Backend;

mod connect;
pub use connect::{connect, initialize, Params};

pub use strata_core::{
    bail, config, err, model, normalize, record, stmt, Descriptor, Error, Identity, Mapper, Model,
    Record, Result, Value, WriteResult,
};

#[cfg(feature = "elasticsearch")]
pub use strata_driver_elasticsearch as elasticsearch;

#[cfg(feature = "mongodb")]
pub use strata_driver_mongodb as mongodb;

#[cfg(feature = "mysql")]
pub use strata_driver_mysql as mysql;
