//! In-memory backends. Each one interprets the native operations a real
//! client would send, so models run unchanged against them.

mod elasticsearch;
pub use elasticsearch::MemElasticsearch;

pub use mongodb::{MemConnector, MemMongo};

mod mysql;
pub use mysql::MemMySql;
