use super::{Condition, Record, Statement};

/// Deletes the rows matching every condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    pub table: String,
    pub filter: Vec<Condition>,
}

/// Empties a table.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteAll {
    pub table: String,
}

impl Statement {
    pub fn delete(table: impl Into<String>, criteria: &Record) -> Self {
        Delete {
            table: table.into(),
            filter: Condition::from_record(criteria),
        }
        .into()
    }

    pub fn delete_all(table: impl Into<String>) -> Self {
        DeleteAll {
            table: table.into(),
        }
        .into()
    }
}

impl From<Delete> for Statement {
    fn from(value: Delete) -> Self {
        Self::Delete(value)
    }
}

impl From<DeleteAll> for Statement {
    fn from(value: DeleteAll) -> Self {
        Self::DeleteAll(value)
    }
}
