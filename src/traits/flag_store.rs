use anyhow::Result;
use async_trait::async_trait;

/// Trait for small client-local key/value flag storage.
///
/// Two independent instances back the orchestrator: a durable one that
/// survives restarts (submission cooldown) and a session-scoped one that is
/// dropped when the process ends (visit-tracked flag). Neither is ever
/// synchronized across devices or sessions.
#[async_trait]
pub trait FlagStore: Send + Sync {
    /// Human-readable store name for logging.
    fn name(&self) -> &'static str;

    /// Read a flag; `None` when it was never set.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a flag, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}
