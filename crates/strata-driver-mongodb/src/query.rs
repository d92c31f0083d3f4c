//! Builders for filters, projections and update documents.

use crate::value::{to_bson, to_document};

use bson::{doc, Bson, Document};
use strata_core::stmt::{normalize, Record, Value};

/// Builds the payload of an array-mutation operator (`$addToSet`, `$push`,
/// `$pull`). List fields are wrapped as `{ $each: [..] }`; scalar fields
/// pass through. The operator itself is up to the caller.
pub fn build_array_mutation(record: Record) -> Document {
    normalize(record)
        .into_iter()
        .map(|(field, value)| {
            let payload = match &value {
                Value::List(_) => Bson::Document(doc! { "$each": to_bson(&value) }),
                value => to_bson(value),
            };
            (field, payload)
        })
        .collect()
}

/// `{ $set: record }` with unset fields removed.
pub fn build_update_document(record: Record) -> Document {
    doc! { "$set": to_document(&normalize(record)) }
}

/// A filter matching `criteria` field for field.
pub fn build_filter(criteria: Record) -> Document {
    to_document(&normalize(criteria))
}

/// Maps every listed field to `1`. No fields means whole documents.
pub fn build_projection(fields: &[&str]) -> Option<Document> {
    if fields.is_empty() {
        return None;
    }

    Some(fields.iter().map(|field| (field.to_string(), Bson::Int32(1))).collect())
}
