use super::{Condition, Record, Statement};

/// Sets columns on the rows matching every condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    pub table: String,
    pub assignments: Record,
    pub filter: Vec<Condition>,
}

impl Statement {
    /// Unset assignments are dropped; null assignments are kept and write
    /// `NULL`.
    pub fn update(table: impl Into<String>, criteria: &Record, assignments: Record) -> Self {
        Update {
            table: table.into(),
            assignments: assignments.normalized(),
            filter: Condition::from_record(criteria),
        }
        .into()
    }
}

impl From<Update> for Statement {
    fn from(value: Update) -> Self {
        Self::Update(value)
    }
}
