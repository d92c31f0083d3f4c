//! Conversions between records and BSON documents.

use bson::{oid::ObjectId, Bson, Document};
use strata_core::stmt::{Record, Value};

/// The document store's primary key field.
pub const ID: &str = "_id";

pub fn to_bson(value: &Value) -> Bson {
    match value {
        Value::Null | Value::Unset => Bson::Null,
        Value::Bool(v) => Bson::Boolean(*v),
        Value::I64(v) => match i32::try_from(*v) {
            Ok(v) => Bson::Int32(v),
            Err(_) => Bson::Int64(*v),
        },
        Value::F64(v) => Bson::Double(*v),
        Value::String(v) => Bson::String(v.clone()),
        Value::DateTime(v) => Bson::DateTime(bson::DateTime::from_millis(v.timestamp_millis())),
        Value::List(items) => Bson::Array(items.iter().map(to_bson).collect()),
    }
}

/// Like [`to_bson`], but strings that spell an object id become one. Used
/// for `_id` values.
pub fn id_to_bson(value: &Value) -> Bson {
    match value {
        Value::String(v) => match ObjectId::parse_str(v) {
            Ok(oid) => Bson::ObjectId(oid),
            Err(_) => Bson::String(v.clone()),
        },
        Value::List(items) => Bson::Array(items.iter().map(id_to_bson).collect()),
        value => to_bson(value),
    }
}

/// Object ids come back as their hex string, embedded documents as relaxed
/// extended JSON text.
pub fn from_bson(bson: Bson) -> Value {
    match bson {
        Bson::Null | Bson::Undefined => Value::Null,
        Bson::Boolean(v) => Value::Bool(v),
        Bson::Int32(v) => Value::I64(v.into()),
        Bson::Int64(v) => Value::I64(v),
        Bson::Double(v) => Value::F64(v),
        Bson::String(v) => Value::String(v),
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(v) => chrono::DateTime::from_timestamp_millis(v.timestamp_millis())
            .map(Value::DateTime)
            .unwrap_or(Value::Null),
        Bson::Array(items) => Value::List(items.into_iter().map(from_bson).collect()),
        Bson::Symbol(v) => Value::String(v),
        other => Value::String(other.into_relaxed_extjson().to_string()),
    }
}

/// Converts a record, dropping unset fields.
pub fn to_document(record: &Record) -> Document {
    record
        .iter()
        .filter(|(_, value)| !value.is_unset())
        .map(|(key, value)| {
            let bson = if key == ID {
                id_to_bson(value)
            } else {
                to_bson(value)
            };
            (key.to_string(), bson)
        })
        .collect()
}

pub fn from_document(document: Document) -> Record {
    document
        .into_iter()
        .map(|(key, bson)| (key, from_bson(bson)))
        .collect()
}
