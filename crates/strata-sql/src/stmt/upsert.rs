use super::{Record, Statement};

/// Insert-or-update of one or more rows, keyed by the table's unique keys.
#[derive(Debug, Clone, PartialEq)]
pub struct Upsert {
    pub table: String,
    pub rows: Vec<Record>,
}

impl Statement {
    pub fn upsert(table: impl Into<String>, rows: Vec<Record>) -> Self {
        Upsert {
            table: table.into(),
            rows,
        }
        .into()
    }
}

impl From<Upsert> for Statement {
    fn from(value: Upsert) -> Self {
        Self::Upsert(value)
    }
}
