use crate::stmt::Record;

use std::fmt;

/// Translates between a record's application shape and its wire shape.
///
/// Every hook defaults to the identity, so a mapper only overrides what it
/// needs. The `pre_*` hooks run after `to_wire` on the document store's
/// save, update and delete paths.
pub trait Mapper: fmt::Debug + Send + Sync + 'static {
    fn to_wire(&self, record: Record) -> Record {
        record
    }

    fn from_wire(&self, record: Record) -> Record {
        record
    }

    fn pre_save(&self, record: Record) -> Record {
        record
    }

    fn pre_update(&self, record: Record) -> Record {
        record
    }

    fn pre_delete(&self, record: Record) -> Record {
        record
    }
}

/// The default mapper: records go over the wire unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct Identity;

impl Mapper for Identity {}

/// Builds a mapper from a pair of functions.
///
/// ```
/// use strata_core::{model::from_fns, record, Mapper, Value};
///
/// let mapper = from_fns(
///     |mut r| { r.insert("v", 2); r },
///     |mut r| { r.remove("v"); r },
/// );
/// assert_eq!(mapper.to_wire(record! {}).get("v"), Some(&Value::I64(2)));
/// ```
pub fn from_fns<T, F>(to_wire: T, from_wire: F) -> impl Mapper
where
    T: Fn(Record) -> Record + Send + Sync + 'static,
    F: Fn(Record) -> Record + Send + Sync + 'static,
{
    FnMapper { to_wire, from_wire }
}

struct FnMapper<T, F> {
    to_wire: T,
    from_wire: F,
}

impl<T, F> fmt::Debug for FnMapper<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnMapper").finish_non_exhaustive()
    }
}

impl<T, F> Mapper for FnMapper<T, F>
where
    T: Fn(Record) -> Record + Send + Sync + 'static,
    F: Fn(Record) -> Record + Send + Sync + 'static,
{
    fn to_wire(&self, record: Record) -> Record {
        (self.to_wire)(record)
    }

    fn from_wire(&self, record: Record) -> Record {
        (self.from_wire)(record)
    }
}
