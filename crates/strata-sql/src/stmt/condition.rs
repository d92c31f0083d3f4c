use super::{Record, Value};

/// One `AND`-ed term of a `WHERE` clause.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// `column = ?`
    Eq(String, Value),

    /// `column IS NULL`
    IsNull(String),

    /// `column IN (?, ?, ..)`
    In(String, Vec<Value>),
}

impl Condition {
    /// Turns criteria into conditions, one per defined field. Null matches
    /// `IS NULL` and a list matches any of its items.
    pub fn from_record(criteria: &Record) -> Vec<Condition> {
        criteria
            .iter()
            .filter(|(_, value)| !value.is_unset())
            .map(|(column, value)| match value {
                Value::Null => Condition::IsNull(column.to_string()),
                Value::List(items) => Condition::In(column.to_string(), items.clone()),
                value => Condition::Eq(column.to_string(), value.clone()),
            })
            .collect()
    }
}
