use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Trait for the table-oriented remote datastore.
///
/// The core only needs four operations: insert one row, upsert one row on a
/// conflict key, select one row by an equality filter, and invoke a named
/// server-side procedure. Rows cross this boundary as raw JSON; callers
/// resolve them into typed records immediately (see `content.rs`).
#[async_trait]
pub trait Datastore: Send + Sync {
    /// Human-readable backend name for logging.
    fn name(&self) -> &'static str;

    /// Insert a single row. Fails if the row cannot be stored.
    async fn insert_row(&self, table: &str, row: &Value) -> Result<()>;

    /// Insert-or-update a single row, resolving conflicts on `conflict_key`.
    async fn upsert_row(&self, table: &str, row: &Value, conflict_key: &str) -> Result<()>;

    /// Fetch at most one row where `filter_column == filter_value`.
    async fn select_row(
        &self,
        table: &str,
        filter_column: &str,
        filter_value: &str,
    ) -> Result<Option<Value>>;

    /// Invoke a named server-side procedure with no arguments.
    async fn call_procedure(&self, name: &str) -> Result<()>;
}
