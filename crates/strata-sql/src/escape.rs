//! Literal escaping for statements that are sent as plain text.

use strata_core::stmt::Value;

/// Lowercase words that are back-quoted when used as a column name. This is
/// not a full keyword table; it covers the words that commonly show up as
/// column names.
const RESERVED: &[&str] = &[
    "add",
    "and",
    "before",
    "by",
    "call",
    "case",
    "condition",
    "delete",
    "desc",
    "describe",
    "from",
    "group",
    "in",
    "index",
    "insert",
    "interval",
    "key",
    "like",
    "limit",
    "long",
    "match",
    "not",
    "option",
    "or",
    "order",
    "references",
    "select",
    "table",
    "to",
    "update",
    "where",
];

/// Renders a value as SQL literal text.
///
/// Null and unset become the bare `NULL`; booleans and numbers are emitted
/// as-is. Everything else is rendered as string text with the MySQL escape
/// sequences applied and is left to the caller to wrap in single quotes.
/// Dates use the UTC wall clock, `YYYY-MM-DD HH:MM:SS.mmm`.
pub fn escape_value(value: &Value) -> String {
    match value {
        Value::Null | Value::Unset => "NULL".to_string(),
        Value::Bool(v) => v.to_string(),
        Value::I64(v) => v.to_string(),
        Value::F64(v) => v.to_string(),
        Value::DateTime(v) => escape_string(&v.format("%Y-%m-%d %H:%M:%S%.3f").to_string()),
        Value::String(v) => escape_string(v),
        Value::List(_) => escape_string(&value.to_json().to_string()),
    }
}

/// Back-quotes `name` when its lowercase form is a reserved word.
pub fn escape_identifier(name: &str) -> String {
    if RESERVED.contains(&name.to_lowercase().as_str()) {
        format!("`{name}`")
    } else {
        name.to_string()
    }
}

fn escape_string(s: &str) -> String {
    let mut ret = String::with_capacity(s.len());

    for ch in s.chars() {
        match ch {
            '\0' => ret.push_str("\\0"),
            '\n' => ret.push_str("\\n"),
            '\r' => ret.push_str("\\r"),
            '\x08' => ret.push_str("\\b"),
            '\t' => ret.push_str("\\t"),
            '\x1a' => ret.push_str("\\Z"),
            '\\' => ret.push_str("\\\\"),
            '\'' => ret.push_str("\\'"),
            '"' => ret.push_str("\\\""),
            ch => ret.push(ch),
        }
    }

    ret
}
