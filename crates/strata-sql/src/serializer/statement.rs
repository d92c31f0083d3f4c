use super::{value::Literal, Column, Comma, Formatter, Ident, Params, ToSql};

use crate::stmt::{Condition, Delete, DeleteAll, Select, Statement, Update, Upsert, Value};

/// MySQL's documented way to express an offset without a limit.
const NO_LIMIT: u64 = u64::MAX;

impl ToSql for &Statement {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            Statement::Delete(stmt) => stmt.to_sql(f),
            Statement::DeleteAll(stmt) => stmt.to_sql(f),
            Statement::Select(stmt) => stmt.to_sql(f),
            Statement::Update(stmt) => stmt.to_sql(f),
            Statement::Upsert(stmt) => stmt.to_sql(f),
        }
    }
}

impl ToSql for &Upsert {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let table = &self.table;

        for row in &self.rows {
            let kept = || row.iter().filter(|(_, value)| value.is_defined());

            let assignments = Comma(kept().map(|(column, value)| SetLiteral(column, value)));
            let duplicates = Comma(kept().map(|(column, _)| OnDuplicate(column)));

            fmt!(f, "INSERT INTO " table " SET " assignments " ON DUPLICATE KEY UPDATE " duplicates ";");
        }
    }
}

impl ToSql for &Select {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let table = Ident(&self.table);
        let filter = Where(&self.filter);

        if self.columns.is_empty() {
            fmt!(f, "SELECT * FROM " table filter);
        } else {
            let columns = Comma(self.columns.iter().map(Ident));
            fmt!(f, "SELECT " columns " FROM " table filter);
        }

        match (self.limit, self.offset) {
            (Some(limit), None) => fmt!(f, " LIMIT " limit),
            (limit, Some(offset)) => {
                let limit = limit.unwrap_or(NO_LIMIT);
                fmt!(f, " LIMIT " limit " OFFSET " offset);
            }
            (None, None) => {}
        }
    }
}

impl ToSql for &Update {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let table = Ident(&self.table);
        let assignments = Comma(
            self.assignments
                .iter()
                .map(|(column, value)| SetParam(column, value)),
        );
        let filter = Where(&self.filter);

        fmt!(f, "UPDATE " table " SET " assignments filter);
    }
}

impl ToSql for &Delete {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let table = Ident(&self.table);
        let filter = Where(&self.filter);

        fmt!(f, "DELETE FROM " table filter);
    }
}

impl ToSql for &DeleteAll {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let table = Ident(&self.table);

        fmt!(f, "DELETE FROM " table);
    }
}

impl ToSql for &Condition {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            Condition::Eq(column, value) => {
                let column = Ident(column);
                fmt!(f, column " = " value);
            }
            Condition::IsNull(column) => {
                let column = Ident(column);
                fmt!(f, column " IS NULL");
            }
            Condition::In(_, values) if values.is_empty() => fmt!(f, "FALSE"),
            Condition::In(column, values) => {
                let column = Ident(column);
                let values = Comma(values);
                fmt!(f, column " IN (" values ")");
            }
        }
    }
}

/// ` WHERE a AND b`, or nothing without conditions.
struct Where<'a>(&'a [Condition]);

impl ToSql for Where<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let mut s = " WHERE ";
        for condition in self.0 {
            fmt!(f, s condition);
            s = " AND ";
        }
    }
}

struct SetLiteral<'a>(&'a str, &'a Value);

impl ToSql for SetLiteral<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let column = Column(self.0);
        let value = Literal(self.1);
        fmt!(f, column " = " value);
    }
}

struct OnDuplicate<'a>(&'a str);

impl ToSql for OnDuplicate<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let column = Column(self.0);
        let again = Column(self.0);
        fmt!(f, column " = VALUES(" again ")");
    }
}

struct SetParam<'a>(&'a str, &'a Value);

impl ToSql for SetParam<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let column = Ident(self.0);
        let value = self.1;
        fmt!(f, column " = " value);
    }
}
