//! In-process table store implementing [`RowBackend`]
//!
//! Used for the offline demo mode and by tests. Behaves like the managed
//! backend for the subset the admin panel relies on: generated ids and
//! timestamps, the `channels.section_id` foreign key, ordering, equality
//! filters and many-to-one embeds. Every call is recorded, and failures can
//! be injected per verb and table.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use tracing::debug;
use uuid::Uuid;

use super::query::{Embed, Filter, Operation, Order, Row, SelectQuery};
use super::traits::RowBackend;
use crate::errors::{BackendError, BackendResult};
use crate::models::tables;

/// One recorded backend call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackendCall {
    pub operation: Operation,
    pub table: String,
    pub filters: Vec<Filter>,
    /// Inserted rows (as an array) or the update patch
    pub payload: Option<Row>,
}

#[derive(Default)]
struct MemoryState {
    tables: RwLock<HashMap<String, Vec<Row>>>,
    calls: Mutex<Vec<BackendCall>>,
    failures: Mutex<HashMap<(Operation, String), String>>,
}

#[derive(Clone, Default)]
pub struct InMemoryBackend {
    state: Arc<MemoryState>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append rows to `table` without recording a call
    pub fn seed<I: IntoIterator<Item = Row>>(&self, table: &str, rows: I) {
        let mut store = self.state.tables.write().unwrap_or_else(|e| e.into_inner());
        store.entry(table.to_string()).or_default().extend(rows);
    }

    /// Current contents of `table` in insertion order
    pub fn rows(&self, table: &str) -> Vec<Row> {
        let store = self.state.tables.read().unwrap_or_else(|e| e.into_inner());
        store.get(table).cloned().unwrap_or_default()
    }

    /// Every call made so far, oldest first
    pub fn calls(&self) -> Vec<BackendCall> {
        self.state.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Calls made for one verb
    pub fn calls_for(&self, operation: Operation) -> Vec<BackendCall> {
        self.calls()
            .into_iter()
            .filter(|call| call.operation == operation)
            .collect()
    }

    pub fn clear_calls(&self) {
        self.state.calls.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }

    /// Make every `operation` on `table` fail with `message` until cleared
    pub fn fail_on<M: Into<String>>(&self, operation: Operation, table: &str, message: M) {
        self.state
            .failures
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert((operation, table.to_string()), message.into());
    }

    pub fn clear_failures(&self) {
        self.state.failures.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }

    fn record(&self, operation: Operation, table: &str, filters: &[Filter], payload: Option<Row>) -> BackendResult<()> {
        debug!(operation = %operation, table = %table, "In-memory backend call");
        self.state
            .calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(BackendCall {
                operation,
                table: table.to_string(),
                filters: filters.to_vec(),
                payload,
            });

        let failures = self.state.failures.lock().unwrap_or_else(|e| e.into_inner());
        match failures.get(&(operation, table.to_string())) {
            Some(message) => Err(BackendError::unavailable(message.clone())),
            None => Ok(()),
        }
    }
}

fn matches(row: &Row, filters: &[Filter]) -> bool {
    filters.iter().all(|filter| match row.get(&filter.column) {
        Some(Value::String(s)) => *s == filter.value,
        Some(Value::Null) | None => false,
        Some(other) => other.to_string() == filter.value,
    })
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        (Some(Value::Number(a)), Some(Value::Number(b))) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::Bool(a)), Some(Value::Bool(b))) => a.cmp(b),
        // nulls sort last in ascending order
        (Some(Value::Null) | None, Some(Value::Null) | None) => Ordering::Equal,
        (Some(Value::Null) | None, _) => Ordering::Greater,
        (_, Some(Value::Null) | None) => Ordering::Less,
        (Some(a), Some(b)) => a.to_string().cmp(&b.to_string()),
    }
}

fn sort_rows(rows: &mut [Row], order: &[Order]) {
    rows.sort_by(|a, b| {
        for key in order {
            let ordering = compare_values(a.get(&key.column), b.get(&key.column));
            let ordering = if key.ascending {
                ordering
            } else {
                ordering.reverse()
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    });
}

fn project(row: &Row, columns: &[String]) -> Row {
    if columns.is_empty() || columns.iter().any(|c| c == "*") {
        return row.clone();
    }
    let mut projected = Map::new();
    for column in columns {
        projected.insert(column.clone(), row.get(column).cloned().unwrap_or(Value::Null));
    }
    Value::Object(projected)
}

fn resolve_embed(row: &Row, embed: &Embed, store: &HashMap<String, Vec<Row>>) -> Value {
    let Some(key) = row.get(&embed.foreign_key).and_then(Value::as_str) else {
        return Value::Null;
    };
    store
        .get(&embed.relation)
        .and_then(|related| {
            related
                .iter()
                .find(|candidate| candidate.get("id").and_then(Value::as_str) == Some(key))
        })
        .map(|related| project(related, &embed.columns))
        .unwrap_or(Value::Null)
}

fn prepare_insert(table: &str, row: Row, store: &HashMap<String, Vec<Row>>) -> BackendResult<Row> {
    let Value::Object(mut fields) = row else {
        return Err(BackendError::rejected(400, format!("rows for {table} must be objects")));
    };

    if !fields.contains_key("id") {
        fields.insert("id".to_string(), Value::String(Uuid::new_v4().to_string()));
    }
    if !fields.contains_key("created_at") {
        fields.insert(
            "created_at".to_string(),
            Value::String(chrono::Utc::now().to_rfc3339()),
        );
    }

    if table == tables::CHANNELS {
        fields.entry("is_active").or_insert(Value::Bool(true));

        let section_id = fields.get("section_id").and_then(Value::as_str).unwrap_or_default();
        let section_exists = store
            .get(tables::SECTIONS)
            .map(|sections| {
                sections
                    .iter()
                    .any(|s| s.get("id").and_then(Value::as_str) == Some(section_id))
            })
            .unwrap_or(false);
        if !section_exists {
            return Err(BackendError::constraint_violation(
                "channels_section_id_fkey",
                format!("section {section_id} does not exist"),
            ));
        }
    }

    Ok(Value::Object(fields))
}

#[async_trait]
impl RowBackend for InMemoryBackend {
    async fn select(&self, table: &str, query: &SelectQuery) -> BackendResult<Vec<Row>> {
        self.record(Operation::Select, table, &query.filters, None)?;

        let store = self.state.tables.read().unwrap_or_else(|e| e.into_inner());
        let mut rows: Vec<Row> = store
            .get(table)
            .map(|rows| rows.iter().filter(|row| matches(row, &query.filters)).cloned().collect())
            .unwrap_or_default();
        sort_rows(&mut rows, &query.order);

        let rows: Vec<Row> = rows
            .iter()
            .map(|row| {
                let mut selected = project(row, &query.columns);
                if let Value::Object(fields) = &mut selected {
                    for embed in &query.embeds {
                        fields.insert(embed.relation.clone(), resolve_embed(row, embed, &store));
                    }
                }
                selected
            })
            .collect();

        if query.single && rows.len() != 1 {
            return Err(BackendError::no_rows(table));
        }
        Ok(rows)
    }

    async fn insert(&self, table: &str, rows: Vec<Row>) -> BackendResult<Vec<Row>> {
        self.record(Operation::Insert, table, &[], Some(Value::Array(rows.clone())))?;

        let mut store = self.state.tables.write().unwrap_or_else(|e| e.into_inner());
        let prepared = rows
            .into_iter()
            .map(|row| prepare_insert(table, row, &store))
            .collect::<BackendResult<Vec<_>>>()?;
        store
            .entry(table.to_string())
            .or_default()
            .extend(prepared.iter().cloned());
        Ok(prepared)
    }

    async fn update(&self, table: &str, patch: Row, filters: &[Filter]) -> BackendResult<Vec<Row>> {
        self.record(Operation::Update, table, filters, Some(patch.clone()))?;

        let Value::Object(patch) = patch else {
            return Err(BackendError::rejected(400, "update patch must be an object"));
        };

        let mut store = self.state.tables.write().unwrap_or_else(|e| e.into_inner());
        let mut updated = Vec::new();
        if let Some(rows) = store.get_mut(table) {
            for row in rows.iter_mut().filter(|row| matches(row, filters)) {
                if let Value::Object(fields) = row {
                    for (key, value) in &patch {
                        fields.insert(key.clone(), value.clone());
                    }
                }
                updated.push(row.clone());
            }
        }
        Ok(updated)
    }

    async fn delete(&self, table: &str, filters: &[Filter]) -> BackendResult<()> {
        self.record(Operation::Delete, table, filters, None)?;

        let mut store = self.state.tables.write().unwrap_or_else(|e| e.into_inner());
        if let Some(rows) = store.get_mut(table) {
            rows.retain(|row| !matches(row, filters));
        }
        Ok(())
    }

    fn scoped(&self, _access_token: &str) -> Arc<dyn RowBackend> {
        Arc::new(self.clone())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
