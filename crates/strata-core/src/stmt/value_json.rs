use chrono::SecondsFormat;
use serde_json::{Map, Number, Value as Json};

use super::{Record, Value};

impl Value {
    /// Converts the value to JSON. Dates become RFC 3339 strings with
    /// millisecond precision; unset becomes `null`.
    pub fn to_json(&self) -> Json {
        match self {
            Value::Bool(v) => Json::Bool(*v),
            Value::DateTime(v) => Json::String(v.to_rfc3339_opts(SecondsFormat::Millis, true)),
            Value::F64(v) => Number::from_f64(*v).map(Json::Number).unwrap_or(Json::Null),
            Value::I64(v) => Json::Number((*v).into()),
            Value::List(items) => Json::Array(items.iter().map(Value::to_json).collect()),
            Value::Null | Value::Unset => Json::Null,
            Value::String(v) => Json::String(v.clone()),
        }
    }

    /// Converts a JSON value. Nested objects have no field-value
    /// counterpart and are kept as their JSON text.
    pub fn from_json(json: Json) -> Value {
        match json {
            Json::Null => Value::Null,
            Json::Bool(v) => Value::Bool(v),
            Json::Number(v) => match v.as_i64() {
                Some(v) => Value::I64(v),
                None => v.as_f64().map(Value::F64).unwrap_or(Value::Null),
            },
            Json::String(v) => Value::String(v),
            Json::Array(items) => Value::List(items.into_iter().map(Value::from_json).collect()),
            Json::Object(object) => Value::String(Json::Object(object).to_string()),
        }
    }
}

impl Record {
    /// Converts the record to a JSON object, skipping unset fields.
    pub fn to_json(&self) -> Json {
        let object = self
            .iter()
            .filter(|(_, value)| !value.is_unset())
            .map(|(key, value)| (key.to_string(), value.to_json()))
            .collect::<Map<_, _>>();
        Json::Object(object)
    }

    /// Builds a record from a JSON object. Anything else yields `None`.
    pub fn from_json(json: Json) -> Option<Record> {
        match json {
            Json::Object(object) => Some(
                object
                    .into_iter()
                    .map(|(key, value)| (key, Value::from_json(value)))
                    .collect(),
            ),
            _ => None,
        }
    }
}
