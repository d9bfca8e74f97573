use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::Value;

use crate::traits::Datastore;

/// In-memory mock datastore for testing.
///
/// Rows are keyed by `(table, filter_value)` where the filter value doubles
/// as the conflict key for upserts. Every call is recorded so tests can
/// assert exactly which network traffic a flow produced, and each operation
/// can be scripted to fail.
#[derive(Default)]
pub struct MockDatastore {
    pub fail_insert: bool,
    pub fail_upsert: bool,
    pub fail_select: bool,
    pub fail_procedure: bool,

    rows: Mutex<HashMap<(String, String), Value>>,
    inserted: Mutex<Vec<(String, Value)>>,
    upserted: Mutex<Vec<(String, Value)>>,
    selects: Mutex<Vec<(String, String)>>,
    procedures: Mutex<Vec<String>>,
}

impl MockDatastore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_insert_failure(mut self) -> Self {
        self.fail_insert = true;
        self
    }

    pub fn with_upsert_failure(mut self) -> Self {
        self.fail_upsert = true;
        self
    }

    pub fn with_select_failure(mut self) -> Self {
        self.fail_select = true;
        self
    }

    pub fn with_procedure_failure(mut self) -> Self {
        self.fail_procedure = true;
        self
    }

    /// Seed a row so `select_row(table, _, key)` finds it.
    pub fn with_row(self, table: &str, key: &str, row: Value) -> Self {
        self.rows
            .lock()
            .unwrap()
            .insert((table.to_string(), key.to_string()), row);
        self
    }

    pub fn inserted_rows(&self) -> Vec<(String, Value)> {
        self.inserted.lock().unwrap().clone()
    }

    pub fn upserted_rows(&self) -> Vec<(String, Value)> {
        self.upserted.lock().unwrap().clone()
    }

    pub fn select_calls(&self) -> usize {
        self.selects.lock().unwrap().len()
    }

    pub fn procedure_calls(&self) -> Vec<String> {
        self.procedures.lock().unwrap().clone()
    }

    /// Total network-call count across all four operations.
    pub fn total_calls(&self) -> usize {
        self.inserted.lock().unwrap().len()
            + self.upserted.lock().unwrap().len()
            + self.selects.lock().unwrap().len()
            + self.procedures.lock().unwrap().len()
    }
}

#[async_trait]
impl Datastore for MockDatastore {
    fn name(&self) -> &'static str {
        "mock-datastore"
    }

    async fn insert_row(&self, table: &str, row: &Value) -> Result<()> {
        self.inserted
            .lock()
            .unwrap()
            .push((table.to_string(), row.clone()));
        if self.fail_insert {
            return Err(anyhow!("mock insert failure"));
        }
        Ok(())
    }

    async fn upsert_row(&self, table: &str, row: &Value, conflict_key: &str) -> Result<()> {
        self.upserted
            .lock()
            .unwrap()
            .push((table.to_string(), row.clone()));
        if self.fail_upsert {
            return Err(anyhow!("mock upsert failure"));
        }
        let key = row
            .get(conflict_key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        self.rows
            .lock()
            .unwrap()
            .insert((table.to_string(), key), row.clone());
        Ok(())
    }

    async fn select_row(
        &self,
        table: &str,
        _filter_column: &str,
        filter_value: &str,
    ) -> Result<Option<Value>> {
        self.selects
            .lock()
            .unwrap()
            .push((table.to_string(), filter_value.to_string()));
        if self.fail_select {
            return Err(anyhow!("mock select failure"));
        }
        Ok(self
            .rows
            .lock()
            .unwrap()
            .get(&(table.to_string(), filter_value.to_string()))
            .cloned())
    }

    async fn call_procedure(&self, name: &str) -> Result<()> {
        self.procedures.lock().unwrap().push(name.to_string());
        if self.fail_procedure {
            return Err(anyhow!("mock procedure failure"));
        }
        Ok(())
    }
}
