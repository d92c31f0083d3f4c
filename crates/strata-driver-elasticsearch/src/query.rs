//! Query documents and response unwrapping.

use serde_json::{json, Map, Value as Json};
use strata_core::{
    stmt::{Record, Value},
    Error, Result,
};

/// Builds a filtered query whose filter is a `bool.must` list of term
/// filters.
///
/// A single term object accumulates every criteria field and that same
/// object is pushed once per field, so criteria with `n` fields produce `n`
/// identical term filters each holding all `n` fields. A single field yields
/// the usual one-field term filter.
pub fn build_term_filter_query(criteria: &Record) -> Json {
    let mut term = Map::new();
    for (key, value) in criteria {
        term.insert(key.clone(), value.to_json());
    }

    let must = vec![json!({ "term": term }); criteria.len()];

    json!({ "query": { "filtered": { "filter": { "bool": { "must": must } } } } })
}

/// The fields to return, when any are requested.
pub fn build_projection(fields: &[&str]) -> Option<Vec<String>> {
    if fields.is_empty() {
        return None;
    }

    Some(fields.iter().map(|field| field.to_string()).collect())
}

/// `{ doc: .. }` holding only the truthy fields of `record`. `0`, `false`,
/// the empty string and null are all dropped.
pub fn build_partial_update_doc(record: &Record) -> Json {
    let doc: Map<String, Json> = record
        .iter()
        .filter(|(_, value)| value.is_truthy())
        .map(|(key, value)| (key.to_string(), value.to_json()))
        .collect();

    json!({ "doc": doc })
}

/// The `match_all` query used to empty an index.
pub fn match_all() -> Json {
    json!({ "query": { "match_all": {} } })
}

/// Unwraps the response of a single-document lookup, by id or by query.
///
/// With `projected` the record is rebuilt from the multi-valued `fields`
/// section, taking each field's first value. Otherwise the stored `_source`
/// is returned. No hit is `None`.
pub fn unwrap_fetch(response: &Json, projected: bool) -> Result<Option<Record>> {
    if response.get("found") == Some(&Json::Bool(false)) {
        return Ok(None);
    }

    let section = if projected { "fields" } else { "_source" };

    if let Some(found) = response.get(section) {
        return Ok(Some(unwrap_section(found, projected)));
    }

    if response.get("found").is_some() {
        // A lookup by id that carries no section of that name.
        return Ok(projected.then(Record::new));
    }

    Ok(hits(response)?
        .first()
        .map(|hit| unwrap_hit(hit, projected)))
}

/// Unwraps every hit of a search response.
pub fn unwrap_hits(response: &Json, projected: bool) -> Result<Vec<Record>> {
    Ok(hits(response)?
        .iter()
        .map(|hit| unwrap_hit(hit, projected))
        .collect())
}

/// Unwraps a multi-get response, dropping the documents that were not found.
pub fn unwrap_mget(response: &Json) -> Result<Vec<Record>> {
    let docs = response
        .get("docs")
        .and_then(Json::as_array)
        .ok_or_else(|| Error::invalid_result("multi-get response has no `docs`"))?;

    Ok(docs
        .iter()
        .filter(|doc| doc.get("found") == Some(&Json::Bool(true)))
        .map(|doc| unwrap_hit(doc, false))
        .collect())
}

/// The `_id` the engine reports for a write.
pub fn unwrap_id(response: &Json) -> Result<String> {
    match response.get("_id") {
        Some(Json::String(id)) => Ok(id.clone()),
        Some(id) => Ok(id.to_string()),
        None => Err(Error::invalid_result("write response has no `_id`")),
    }
}

fn hits(response: &Json) -> Result<&Vec<Json>> {
    response
        .get("hits")
        .and_then(|hits| hits.get("hits"))
        .and_then(Json::as_array)
        .ok_or_else(|| Error::invalid_result("search response has no `hits.hits`"))
}

fn unwrap_hit(hit: &Json, projected: bool) -> Record {
    let section = if projected { "fields" } else { "_source" };

    hit.get(section)
        .map(|found| unwrap_section(found, projected))
        .unwrap_or_default()
}

fn unwrap_section(section: &Json, projected: bool) -> Record {
    let Some(object) = section.as_object() else {
        return Record::new();
    };

    object
        .iter()
        .map(|(key, value)| {
            let value = match value {
                Json::Array(values) if projected => {
                    values.first().cloned().map(Value::from_json).unwrap_or(Value::Null)
                }
                value => Value::from_json(value.clone()),
            };
            (key.clone(), value)
        })
        .collect()
}
