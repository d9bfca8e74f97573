use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use super::{mock::MockDatastore, noop::NoopDatastore, rest::RestDatastore};
use crate::config::{DatastoreType, SiteConfig};
use crate::traits::Datastore;

/// Enum representing all possible datastore implementations.
pub enum DatastoreVariant {
    Rest(RestDatastore),
    Noop(NoopDatastore),
    Mock(MockDatastore),
}

impl DatastoreVariant {
    /// Create a new datastore instance based on the configured type.
    pub fn new(config: &SiteConfig) -> Self {
        match config.datastore {
            DatastoreType::Rest => DatastoreVariant::Rest(RestDatastore::new(
                config.datastore_url.clone(),
                config.datastore_key.clone(),
            )),
            DatastoreType::Noop => DatastoreVariant::Noop(NoopDatastore),
            DatastoreType::Mock => DatastoreVariant::Mock(MockDatastore::default()),
        }
    }
}

#[async_trait]
impl Datastore for DatastoreVariant {
    fn name(&self) -> &'static str {
        match self {
            DatastoreVariant::Rest(inner) => inner.name(),
            DatastoreVariant::Noop(inner) => inner.name(),
            DatastoreVariant::Mock(inner) => inner.name(),
        }
    }

    async fn insert_row(&self, table: &str, row: &Value) -> Result<()> {
        match self {
            DatastoreVariant::Rest(inner) => inner.insert_row(table, row).await,
            DatastoreVariant::Noop(inner) => inner.insert_row(table, row).await,
            DatastoreVariant::Mock(inner) => inner.insert_row(table, row).await,
        }
    }

    async fn upsert_row(&self, table: &str, row: &Value, conflict_key: &str) -> Result<()> {
        match self {
            DatastoreVariant::Rest(inner) => inner.upsert_row(table, row, conflict_key).await,
            DatastoreVariant::Noop(inner) => inner.upsert_row(table, row, conflict_key).await,
            DatastoreVariant::Mock(inner) => inner.upsert_row(table, row, conflict_key).await,
        }
    }

    async fn select_row(
        &self,
        table: &str,
        filter_column: &str,
        filter_value: &str,
    ) -> Result<Option<Value>> {
        match self {
            DatastoreVariant::Rest(inner) => {
                inner.select_row(table, filter_column, filter_value).await
            }
            DatastoreVariant::Noop(inner) => {
                inner.select_row(table, filter_column, filter_value).await
            }
            DatastoreVariant::Mock(inner) => {
                inner.select_row(table, filter_column, filter_value).await
            }
        }
    }

    async fn call_procedure(&self, name: &str) -> Result<()> {
        match self {
            DatastoreVariant::Rest(inner) => inner.call_procedure(name).await,
            DatastoreVariant::Noop(inner) => inner.call_procedure(name).await,
            DatastoreVariant::Mock(inner) => inner.call_procedure(name).await,
        }
    }
}
