mod condition;
pub use condition::Condition;

mod delete;
pub use delete::{Delete, DeleteAll};

mod select;
pub use select::Select;

mod update;
pub use update::Update;

mod upsert;
pub use upsert::Upsert;

pub use strata_core::stmt::{Record, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Delete(Delete),
    DeleteAll(DeleteAll),
    Select(Select),
    Update(Update),
    Upsert(Upsert),
}

impl Statement {
    pub fn table(&self) -> &str {
        match self {
            Statement::Delete(stmt) => &stmt.table,
            Statement::DeleteAll(stmt) => &stmt.table,
            Statement::Select(stmt) => &stmt.table,
            Statement::Update(stmt) => &stmt.table,
            Statement::Upsert(stmt) => &stmt.table,
        }
    }

    /// Statements rendered as literal text rather than with bound
    /// parameters.
    pub fn is_text(&self) -> bool {
        matches!(self, Statement::Upsert(_) | Statement::DeleteAll(_))
    }

    /// Returns `true` when the rendered text holds more than one statement.
    pub fn is_multi_statement(&self) -> bool {
        matches!(self, Statement::Upsert(upsert) if upsert.rows.len() > 1)
    }
}
