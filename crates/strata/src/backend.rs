use crate::{Params, Result};

use strata_core::{Descriptor, Model};

#[cfg(feature = "elasticsearch")]
use strata_driver_elasticsearch::EsBackend;
#[cfg(feature = "mongodb")]
use strata_driver_mongodb::MongoBackend;
#[cfg(feature = "mysql")]
use strata_driver_mysql::MySqlBackend;

/// An initialized backend: derives models and exposes the raw client.
#[derive(Debug, Clone)]
pub enum Backend {
    #[cfg(feature = "mysql")]
    MySql(MySqlBackend),

    #[cfg(feature = "mongodb")]
    Mongo(MongoBackend),

    #[cfg(feature = "elasticsearch")]
    Es(EsBackend),
}

impl Backend {
    /// Builds the backend described by `params`. No connection is opened
    /// yet. Must be called from within a Tokio runtime.
    pub fn from_params(params: Params) -> Result<Self> {
        match params {
            Params::MySql(params) => connect_mysql(params),
            Params::Mongo(params) => connect_mongodb(params),
            Params::Es(params) => connect_elasticsearch(params),
        }
    }

    /// Binds a model to the table, collection or index named by
    /// `descriptor`.
    pub fn extend(&self, descriptor: Descriptor) -> Result<Box<dyn Model>> {
        Ok(match self {
            #[cfg(feature = "mysql")]
            Backend::MySql(backend) => Box::new(backend.extend(descriptor)?),
            #[cfg(feature = "mongodb")]
            Backend::Mongo(backend) => Box::new(backend.extend(descriptor)?),
            #[cfg(feature = "elasticsearch")]
            Backend::Es(backend) => Box::new(backend.extend(descriptor)?),
        })
    }

    /// The `client` name this backend was initialized with.
    pub fn client_name(&self) -> &'static str {
        match self {
            #[cfg(feature = "mysql")]
            Backend::MySql(_) => "mysql",
            #[cfg(feature = "mongodb")]
            Backend::Mongo(_) => "mongo",
            #[cfg(feature = "elasticsearch")]
            Backend::Es(_) => "es",
        }
    }

    #[cfg(feature = "mysql")]
    pub fn as_mysql(&self) -> Option<&MySqlBackend> {
        match self {
            Backend::MySql(backend) => Some(backend),
            #[allow(unreachable_patterns)]
            _ => None,
        }
    }

    #[cfg(feature = "mongodb")]
    pub fn as_mongo(&self) -> Option<&MongoBackend> {
        match self {
            Backend::Mongo(backend) => Some(backend),
            #[allow(unreachable_patterns)]
            _ => None,
        }
    }

    #[cfg(feature = "elasticsearch")]
    pub fn as_es(&self) -> Option<&EsBackend> {
        match self {
            Backend::Es(backend) => Some(backend),
            #[allow(unreachable_patterns)]
            _ => None,
        }
    }
}

#[cfg(feature = "mysql")]
fn connect_mysql(params: strata_core::config::MySqlParams) -> Result<Backend> {
    tracing::debug!(
        host = %params.host,
        port = params.port,
        db = %params.db,
        "initializing mysql backend"
    );
    Ok(Backend::MySql(MySqlBackend::new(&params)))
}

#[cfg(not(feature = "mysql"))]
fn connect_mysql(_params: strata_core::config::MySqlParams) -> Result<Backend> {
    Err(strata_core::Error::configuration("`mysql` feature not enabled"))
}

#[cfg(feature = "mongodb")]
fn connect_mongodb(params: strata_core::config::MongoParams) -> Result<Backend> {
    tracing::debug!(pool_key = %params.pool_key(), db = %params.db, "initializing mongo backend");
    Ok(Backend::Mongo(MongoBackend::new(params)))
}

#[cfg(not(feature = "mongodb"))]
fn connect_mongodb(_params: strata_core::config::MongoParams) -> Result<Backend> {
    Err(strata_core::Error::configuration("`mongodb` feature not enabled"))
}

#[cfg(feature = "elasticsearch")]
fn connect_elasticsearch(params: strata_core::config::EsParams) -> Result<Backend> {
    tracing::debug!(host = %params.host, port = params.port, "initializing es backend");
    Ok(Backend::Es(EsBackend::new(&params)?))
}

#[cfg(not(feature = "elasticsearch"))]
fn connect_elasticsearch(_params: strata_core::config::EsParams) -> Result<Backend> {
    Err(strata_core::Error::configuration("`elasticsearch` feature not enabled"))
}
