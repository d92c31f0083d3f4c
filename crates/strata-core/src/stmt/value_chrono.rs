use chrono::{DateTime, NaiveDateTime, Utc};

use crate::stmt::Value;

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Self::DateTime(value)
    }
}

/// Naive timestamps are taken to be UTC wall-clock time.
impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Self::DateTime(value.and_utc())
    }
}

impl TryFrom<Value> for DateTime<Utc> {
    type Error = crate::Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::DateTime(value) => Ok(value),
            Value::String(value) => DateTime::parse_from_rfc3339(&value)
                .map(|value| value.with_timezone(&Utc))
                .map_err(|err| crate::err!("value is not of type DateTime<Utc>: {err}")),
            _ => Err(crate::err!("value is not of type DateTime<Utc>")),
        }
    }
}
