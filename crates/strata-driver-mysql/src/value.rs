use chrono::{Datelike, NaiveDate, Timelike};
use mysql_async::{prelude::ToValue, Row, Value as SqlValue};
use strata_core::stmt::{Record, Value};

pub(crate) fn to_mysql(value: &Value) -> SqlValue {
    match value {
        Value::Bool(value) => value.to_value(),
        Value::I64(value) => value.to_value(),
        Value::F64(value) => value.to_value(),
        Value::String(value) => value.to_value(),
        Value::DateTime(value) => {
            let value = value.naive_utc();
            SqlValue::Date(
                value.year() as u16,
                value.month() as u8,
                value.day() as u8,
                value.hour() as u8,
                value.minute() as u8,
                value.second() as u8,
                value.nanosecond() / 1_000,
            )
        }
        Value::List(_) => value.to_json().to_string().to_value(),
        Value::Null | Value::Unset => SqlValue::NULL,
    }
}

pub(crate) fn from_mysql(value: SqlValue) -> Value {
    match value {
        SqlValue::NULL => Value::Null,
        SqlValue::Bytes(bytes) => Value::String(String::from_utf8_lossy(&bytes).into_owned()),
        SqlValue::Int(value) => Value::I64(value),
        SqlValue::UInt(value) => match i64::try_from(value) {
            Ok(value) => Value::I64(value),
            Err(_) => Value::String(value.to_string()),
        },
        SqlValue::Float(value) => Value::F64(value.into()),
        SqlValue::Double(value) => Value::F64(value),
        SqlValue::Date(year, month, day, hour, minute, second, micros) => {
            NaiveDate::from_ymd_opt(year.into(), month.into(), day.into())
                .and_then(|date| {
                    date.and_hms_micro_opt(hour.into(), minute.into(), second.into(), micros)
                })
                .map(Value::from)
                .unwrap_or(Value::Null)
        }
        SqlValue::Time(negative, days, hours, minutes, seconds, micros) => {
            let sign = if negative { "-" } else { "" };
            let hours = u32::from(hours) + days * 24;
            Value::String(format!(
                "{sign}{hours:02}:{minutes:02}:{seconds:02}.{micros:06}"
            ))
        }
    }
}

/// Converts a result row, keyed by column name.
pub(crate) fn record_from_row(mut row: Row) -> Record {
    let columns = row.columns();

    columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            let value = row.take::<SqlValue, usize>(i).unwrap_or(SqlValue::NULL);
            (column.name_str().into_owned(), from_mysql(value))
        })
        .collect()
}
