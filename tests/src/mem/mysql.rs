use std::{collections::HashMap, sync::Mutex};
use strata_core::{async_trait, stmt::Record, stmt::Value, Driver, Result};
use strata_driver_mysql::Response;
use strata_sql::{stmt::Condition, Statement};

/// Tables keyed by name; rows keyed by their `id` column.
#[derive(Debug, Default)]
pub struct MemMySql {
    tables: Mutex<HashMap<String, Vec<Record>>>,
}

impl MemMySql {
    pub fn rows(&self, table: &str) -> Vec<Record> {
        self.tables
            .lock()
            .unwrap()
            .get(table)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl Driver for MemMySql {
    type Operation = Statement;
    type Response = Response;

    async fn exec(&self, stmt: Statement) -> Result<Response> {
        let mut tables = self.tables.lock().unwrap();
        let rows = tables.entry(stmt.table().to_string()).or_default();

        Ok(match stmt {
            Statement::Upsert(upsert) => {
                let mut affected = 0;
                for row in upsert.rows {
                    affected += upsert_row(rows, row);
                }
                Response::Count(affected)
            }
            Statement::Select(select) => {
                let offset = select.offset.unwrap_or(0) as usize;
                let limit = select.limit.map(|l| l as usize).unwrap_or(usize::MAX);

                let found = rows
                    .iter()
                    .filter(|row| matches_all(row, &select.filter))
                    .skip(offset)
                    .take(limit)
                    .map(|row| {
                        if select.columns.is_empty() {
                            row.clone()
                        } else {
                            let columns: Vec<&str> =
                                select.columns.iter().map(String::as_str).collect();
                            row.project(&columns)
                        }
                    })
                    .collect();

                Response::Rows(found)
            }
            Statement::Update(update) => {
                let mut affected = 0;
                for row in rows.iter_mut().filter(|row| matches_all(row, &update.filter)) {
                    for (column, value) in &update.assignments {
                        row.insert(column.clone(), value.clone());
                    }
                    affected += 1;
                }
                Response::Count(affected)
            }
            Statement::Delete(delete) => {
                let before = rows.len();
                rows.retain(|row| !matches_all(row, &delete.filter));
                Response::Count((before - rows.len()) as u64)
            }
            Statement::DeleteAll(_) => {
                let deleted = rows.len() as u64;
                rows.clear();
                Response::Count(deleted)
            }
        })
    }
}

/// `INSERT .. ON DUPLICATE KEY UPDATE` on the `id` column. Null columns are
/// left out of the statement, so they never overwrite.
fn upsert_row(rows: &mut Vec<Record>, row: Record) -> u64 {
    let mut row = row;
    row.retain(|_, value| value.is_defined());

    let existing = row
        .get("id")
        .and_then(|id| rows.iter_mut().find(|r| r.get("id").is_some_and(|v| same(v, id))));

    match existing {
        Some(existing) => {
            let mut changed = false;
            for (column, value) in row {
                if existing.get(&column) != Some(&value) {
                    existing.insert(column, value);
                    changed = true;
                }
            }
            // Found rows: an unchanged duplicate still counts once.
            if changed {
                2
            } else {
                1
            }
        }
        None => {
            rows.push(row);
            1
        }
    }
}

fn matches_all(row: &Record, filter: &[Condition]) -> bool {
    filter.iter().all(|condition| match condition {
        Condition::Eq(column, value) => row.get(column).is_some_and(|v| same(v, value)),
        Condition::IsNull(column) => row.get(column).map_or(true, Value::is_null),
        Condition::In(column, values) => row
            .get(column)
            .is_some_and(|v| values.iter().any(|value| same(v, value))),
    })
}

/// Column comparison with the server's string/number coercion.
fn same(a: &Value, b: &Value) -> bool {
    a == b || matches!((a.to_key_string(), b.to_key_string()), (Some(a), Some(b)) if a == b)
}
