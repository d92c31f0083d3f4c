use crate::ExecLog;

use std::sync::{Arc, Mutex};
use strata_core::{async_trait, Driver, Result};

/// A driver wrapper that logs all operations for testing purposes
#[derive(Debug)]
pub struct LoggingDriver<D: Driver> {
    /// The underlying driver that actually executes operations
    inner: D,

    /// Log of all operations executed through this driver
    ops_log: Arc<Mutex<Vec<DriverOp<D::Operation, D::Response>>>>,
}

#[derive(Debug, Clone)]
pub struct DriverOp<O, R> {
    pub operation: O,
    pub response: Result<R>,
}

impl<D> LoggingDriver<D>
where
    D: Driver,
    D::Operation: Clone,
    D::Response: Clone,
{
    pub fn new(inner: D) -> Self {
        Self {
            inner,
            ops_log: Arc::default(),
        }
    }

    /// Wraps `inner`, appending to an existing log.
    pub fn with_log(inner: D, log: &ExecLog<D::Operation, D::Response>) -> Self {
        Self {
            inner,
            ops_log: log.handle(),
        }
    }

    /// Get a handle to the operations log
    pub fn exec_log(&self) -> ExecLog<D::Operation, D::Response> {
        ExecLog::new(self.ops_log.clone())
    }

    pub fn inner(&self) -> &D {
        &self.inner
    }
}

#[async_trait]
impl<D> Driver for LoggingDriver<D>
where
    D: Driver,
    D::Operation: Clone,
    D::Response: Clone,
{
    type Operation = D::Operation;
    type Response = D::Response;

    async fn exec(&self, op: Self::Operation) -> Result<Self::Response> {
        let response = self.inner.exec(op.clone()).await;

        self.ops_log
            .lock()
            .unwrap()
            .push(DriverOp {
                operation: op,
                response: response.clone(),
            });

        response
    }
}
