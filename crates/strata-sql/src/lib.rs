pub mod escape;
pub use escape::{escape_identifier, escape_value};

pub mod serializer;
pub use serializer::{Params, Placeholder, Serializer};

pub mod stmt;
pub use stmt::Statement;

use strata_core::stmt::Record;

/// Builds the upsert statement for one record:
/// `INSERT INTO <table> SET .. ON DUPLICATE KEY UPDATE ..;`.
pub fn build_upsert(table: &str, record: &Record) -> String {
    build_batch_upsert(table, std::slice::from_ref(record))
}

/// Concatenates one upsert statement per record, with no separator beyond
/// each statement's own `;`. Executing the result needs a connection with
/// multi-statement support.
pub fn build_batch_upsert(table: &str, records: &[Record]) -> String {
    let stmt = Statement::upsert(table, records.to_vec());
    Serializer::mysql().serialize(&stmt, &mut Vec::new())
}
