//! Connection parameters for each backend.
//!
//! The structs deserialize from the same keys the JSON initialization object
//! uses, so `{ "client": "mysql", "host": ..., "isMultiStatement": true }`
//! maps onto [`MySqlParams`] directly.

use serde::{Deserialize, Deserializer};

/// Collation used when `charset` is not given.
pub const DEFAULT_CHARSET: &str = "UTF8_GENERAL_CI";

/// Relational backend parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MySqlParams {
    pub host: String,
    pub uid: String,
    pub pwd: String,
    pub db: String,
    #[serde(deserialize_with = "port")]
    pub port: u16,
    #[serde(default = "default_charset")]
    pub charset: String,
    /// Several statements may be sent in one call. Batch upserts need it.
    #[serde(default)]
    pub is_multi_statement: bool,
}

/// Document-store parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MongoParams {
    pub host: String,
    #[serde(deserialize_with = "port")]
    pub port: u16,
    pub db: String,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub pass: Option<String>,
}

impl MongoParams {
    /// Identifies the connection shared by every model of this server.
    pub fn pool_key(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Credentials are only used when both halves are present.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.user.as_deref(), self.pass.as_deref()) {
            (Some(user), Some(pass)) if !user.is_empty() && !pass.is_empty() => Some((user, pass)),
            _ => None,
        }
    }
}

/// Search-engine parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EsParams {
    pub host: String,
    #[serde(deserialize_with = "port")]
    pub port: u16,
    /// `"trace"` turns on request and response logging. Other levels are
    /// ignored.
    #[serde(default)]
    pub log: Option<String>,
}

impl EsParams {
    pub fn trace(&self) -> bool {
        self.log.as_deref() == Some("trace")
    }
}

fn default_charset() -> String {
    DEFAULT_CHARSET.to_string()
}

/// Ports are accepted as numbers or numeric strings.
fn port<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u16, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Port {
        Number(u16),
        Text(String),
    }

    match Port::deserialize(deserializer)? {
        Port::Number(port) => Ok(port),
        Port::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}
