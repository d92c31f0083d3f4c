use super::{Formatter, Params, ToSql};

use crate::escape::escape_value;
use strata_core::stmt::Value;

/// A value inlined as a single-quoted, escaped literal.
pub(super) struct Literal<'a>(pub(super) &'a Value);

impl ToSql for &Value {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let placeholder = f.params.push(self);
        fmt!(f, placeholder);
    }
}

impl ToSql for Literal<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        f.dst.push('\'');
        f.dst.push_str(&escape_value(self.0));
        f.dst.push('\'');
    }
}
