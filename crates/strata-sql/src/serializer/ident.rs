use super::{Formatter, Params, ToSql};

use crate::escape::escape_identifier;

/// A back-quoted identifier, used by the parameterised statements.
pub(super) struct Ident<S>(pub(super) S);

/// A column name in an upsert: quoted only when it is a reserved word.
pub(super) struct Column<S>(pub(super) S);

impl<S: AsRef<str>> ToSql for Ident<S> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        f.dst.push('`');
        f.dst.push_str(&self.0.as_ref().replace('`', "``"));
        f.dst.push('`');
    }
}

impl<S: AsRef<str>> ToSql for Column<S> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        f.dst.push_str(&escape_identifier(self.0.as_ref()));
    }
}
