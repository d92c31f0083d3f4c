use crate::async_trait;

use std::fmt::Debug;

/// A backend client: executes backend-native operations.
///
/// Each backend defines its own operation and response types (SQL
/// statements, document-store commands, search requests); the driver is the
/// only place that talks to the network. Models build operations and
/// interpret responses, so any type implementing this trait, in-memory ones
/// included, can stand in for the real client.
#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    type Operation: Debug + Send + 'static;
    type Response: Debug + Send + 'static;

    /// Execute a backend operation
    async fn exec(&self, op: Self::Operation) -> crate::Result<Self::Response>;
}
