use serde_json::{json, Map, Value as Json};
use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Mutex,
    },
};
use strata_core::{async_trait, bail, Driver, Error, Result};
use strata_driver_elasticsearch::Operation;

type Source = Map<String, Json>;

/// Documents keyed by `index/type`, kept in indexing order.
#[derive(Debug, Default)]
pub struct MemElasticsearch {
    indices: Mutex<HashMap<String, Vec<(String, Source)>>>,
    next_id: AtomicU64,
}

impl MemElasticsearch {
    pub fn documents(&self, index: &str, ty: &str) -> Vec<(String, Source)> {
        self.indices
            .lock()
            .unwrap()
            .get(&key(index, ty))
            .cloned()
            .unwrap_or_default()
    }
}

fn key(index: &str, ty: &str) -> String {
    format!("{index}/{ty}")
}

#[async_trait]
impl Driver for MemElasticsearch {
    type Operation = Operation;
    type Response = Json;

    async fn exec(&self, op: Operation) -> Result<Json> {
        let mut indices = self.indices.lock().unwrap();

        match op {
            Operation::Index(op) => {
                let docs = indices.entry(key(&op.index, &op.ty)).or_default();
                let id = op.id.unwrap_or_else(|| {
                    format!("gen{}", self.next_id.fetch_add(1, Ordering::SeqCst))
                });

                let Json::Object(source) = op.body else {
                    bail!("document body must be an object");
                };

                let created = match docs.iter_mut().find(|(doc_id, _)| *doc_id == id) {
                    Some((_, existing)) => {
                        *existing = source;
                        false
                    }
                    None => {
                        docs.push((id.clone(), source));
                        true
                    }
                };

                Ok(json!({ "_index": op.index, "_type": op.ty, "_id": id, "created": created }))
            }
            Operation::Get(op) => {
                let docs = indices.entry(key(&op.index, &op.ty)).or_default();
                let Some((id, source)) = docs.iter().find(|(doc_id, _)| *doc_id == op.id) else {
                    return Err(Error::record_not_found(format!(
                        "{}/{}/{}",
                        op.index, op.ty, op.id
                    )));
                };

                let mut res = json!({ "_id": id, "found": true });
                match &op.fields {
                    Some(fields) => {
                        let fields = multi_valued(source, fields);
                        if !fields.is_empty() {
                            res["fields"] = Json::Object(fields);
                        }
                    }
                    None => res["_source"] = Json::Object(source.clone()),
                }
                Ok(res)
            }
            Operation::Search(op) => {
                let docs = indices.entry(key(&op.index, &op.ty)).or_default();
                let query = &op.body["query"];

                let matching: Vec<_> = docs
                    .iter()
                    .filter(|(_, source)| matches(source, query))
                    .collect();

                let hits: Vec<Json> = matching
                    .iter()
                    .skip(op.from as usize)
                    .take(op.size as usize)
                    .map(|(id, source)| hit(id, source, op.fields.as_deref()))
                    .collect();

                Ok(json!({ "hits": { "total": matching.len(), "hits": hits } }))
            }
            Operation::MultiGet(op) => {
                let docs = indices.entry(key(&op.index, &op.ty)).or_default();

                let found: Vec<Json> = op
                    .ids
                    .iter()
                    .map(|id| {
                        let id = match id {
                            Json::String(id) => id.clone(),
                            id => id.to_string(),
                        };
                        match docs.iter().find(|(doc_id, _)| *doc_id == id) {
                            Some((_, source)) => {
                                json!({ "_id": id, "found": true, "_source": source })
                            }
                            None => json!({ "_id": id, "found": false }),
                        }
                    })
                    .collect();

                Ok(json!({ "docs": found }))
            }
            Operation::Update(op) => {
                let docs = indices.entry(key(&op.index, &op.ty)).or_default();
                let Some((_, source)) = docs.iter_mut().find(|(doc_id, _)| *doc_id == op.id) else {
                    bail!("document missing; id={}", op.id);
                };

                if let Some(Json::Object(doc)) = op.body.get("doc") {
                    for (field, value) in doc {
                        source.insert(field.clone(), value.clone());
                    }
                }

                Ok(json!({ "_index": op.index, "_type": op.ty, "_id": op.id }))
            }
            Operation::Delete(op) => {
                let docs = indices.entry(key(&op.index, &op.ty)).or_default();
                let before = docs.len();
                docs.retain(|(doc_id, _)| *doc_id != op.id);

                Ok(json!({ "_id": op.id, "found": docs.len() < before }))
            }
            Operation::DeleteByQuery(op) => {
                let docs = indices.entry(key(&op.index, &op.ty)).or_default();
                let query = &op.body["query"];
                let before = docs.len();
                docs.retain(|(_, source)| !matches(source, query));

                Ok(json!({ "deleted": before - docs.len() }))
            }
        }
    }
}

/// Understands `match_all` and the filtered `bool.must` list of term
/// filters.
fn matches(source: &Source, query: &Json) -> bool {
    if query.get("match_all").is_some() {
        return true;
    }

    let Some(must) = query
        .pointer("/filtered/filter/bool/must")
        .and_then(Json::as_array)
    else {
        return false;
    };

    must.iter().all(|filter| {
        filter["term"].as_object().is_some_and(|term| {
            term.iter()
                .all(|(field, value)| term_matches(source.get(field), value))
        })
    })
}

fn term_matches(actual: Option<&Json>, expected: &Json) -> bool {
    match actual {
        Some(Json::Array(items)) => items.contains(expected),
        Some(actual) => actual == expected,
        None => false,
    }
}

fn hit(id: &str, source: &Source, fields: Option<&[String]>) -> Json {
    match fields {
        Some(fields) => json!({ "_id": id, "fields": multi_valued(source, fields) }),
        None => json!({ "_id": id, "_source": source }),
    }
}

/// Stored fields come back as arrays, holding only the fields present.
fn multi_valued(source: &Source, fields: &[String]) -> Source {
    fields
        .iter()
        .filter_map(|field| {
            source.get(field).map(|value| {
                let values = match value {
                    Json::Array(items) => items.clone(),
                    value => vec![value.clone()],
                };
                (field.clone(), Json::Array(values))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::record;
    use strata_driver_elasticsearch::query::build_term_filter_query;

    #[test]
    fn accumulated_term_filters_match_all_fields() {
        let source: Source = serde_json::from_value(json!({ "a": 1, "b": "x" })).unwrap();

        let query = build_term_filter_query(&record! { "a" => 1, "b" => "x" });
        assert!(matches(&source, &query["query"]));

        let query = build_term_filter_query(&record! { "a" => 1, "b" => "y" });
        assert!(!matches(&source, &query["query"]));
    }

    #[test]
    fn projected_fields_are_multi_valued() {
        let source: Source = serde_json::from_value(json!({ "a": 1, "b": ["x", "y"] })).unwrap();
        let names = ["a", "b", "c"].map(String::from);
        let fields = multi_valued(&source, &names);

        assert_eq!(Json::Object(fields), json!({ "a": [1], "b": ["x", "y"] }));
    }
}
