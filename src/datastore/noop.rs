use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use crate::traits::Datastore;

/// Noop datastore for demonstration purposes. Writes are discarded and
/// reads come back empty.
pub struct NoopDatastore;

#[async_trait]
impl Datastore for NoopDatastore {
    fn name(&self) -> &'static str {
        "noop-datastore"
    }

    async fn insert_row(&self, table: &str, _row: &Value) -> Result<()> {
        tracing::info!("NoopDatastore: discarding insert into {}", table);
        Ok(())
    }

    async fn upsert_row(&self, table: &str, _row: &Value, _conflict_key: &str) -> Result<()> {
        tracing::info!("NoopDatastore: discarding upsert into {}", table);
        Ok(())
    }

    async fn select_row(
        &self,
        table: &str,
        _filter_column: &str,
        _filter_value: &str,
    ) -> Result<Option<Value>> {
        tracing::info!("NoopDatastore: select from {} returns nothing", table);
        Ok(None)
    }

    async fn call_procedure(&self, name: &str) -> Result<()> {
        tracing::info!("NoopDatastore: procedure {} is a no-op", name);
        Ok(())
    }
}
