#[macro_use]
mod fmt;
use fmt::ToSql;

mod delim;
use delim::Comma;

mod ident;
use ident::{Column, Ident};

mod params;
pub use params::{Params, Placeholder};

mod statement;
mod value;

use crate::stmt::Statement;

/// Serialize a statement to MySQL text.
///
/// Upserts are rendered with escaped literal values and one `;`-terminated
/// statement per row. Every other statement is rendered with `?`
/// placeholders, pushing the bound values onto `params` in order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Serializer {
    _priv: (),
}

struct Formatter<'a, T> {
    /// Where to write the serialized SQL
    dst: &'a mut String,

    /// Where to store parameters
    params: &'a mut T,
}

impl Serializer {
    pub fn mysql() -> Serializer {
        Serializer { _priv: () }
    }

    pub fn serialize(&self, stmt: &Statement, params: &mut impl Params) -> String {
        let mut ret = String::new();

        let mut fmt = Formatter {
            dst: &mut ret,
            params,
        };

        stmt.to_sql(&mut fmt);

        ret
    }
}
