use super::{Condition, Record, Statement};

/// A single-table query.
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub table: String,

    /// Returned columns; empty selects every column.
    pub columns: Vec<String>,

    pub filter: Vec<Condition>,

    pub limit: Option<u64>,

    pub offset: Option<u64>,
}

impl Select {
    pub fn columns<S: AsRef<str>>(mut self, columns: &[S]) -> Self {
        self.columns = columns.iter().map(|c| c.as_ref().to_string()).collect();
        self
    }

    pub fn filter(mut self, condition: Condition) -> Self {
        self.filter.push(condition);
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }
}

impl Statement {
    /// Starts a query on `table` filtered by `criteria`.
    pub fn select(table: impl Into<String>, criteria: &Record) -> Select {
        Select {
            table: table.into(),
            columns: vec![],
            filter: Condition::from_record(criteria),
            limit: None,
            offset: None,
        }
    }
}

impl From<Select> for Statement {
    fn from(value: Select) -> Self {
        Self::Select(value)
    }
}
