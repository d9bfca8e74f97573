//! Visitor counter flow: per-session short-circuit, atomic RPC attempt,
//! read-modify-write fallback.

use std::sync::Arc;

use anyhow::Result;
use serde_json::{json, Value};
use tracing::{debug, warn};

use super::core::Siteline;
use crate::traits::{Clock, Datastore, FlagStore};
use crate::types::VISIT_TRACKED_KEY;

impl Siteline {
    /// Count one visit. Idempotent per session: once a visit was counted,
    /// further calls without `force` return immediately with no network
    /// traffic.
    ///
    /// The atomic increment procedure is tried first; if it fails, the
    /// counter row is read, parsed (missing or unparsable values count as
    /// zero) and written back incremented via an upsert on its key. That
    /// fallback is read-then-write and can under-count under concurrency;
    /// this is a known limitation of the fallback, not a goal.
    pub async fn record_visit(&self, force: bool) -> Result<()> {
        if !force && self.session.get(VISIT_TRACKED_KEY).await?.is_some() {
            debug!("visit already tracked this session");
            return Ok(());
        }

        match self
            .datastore
            .call_procedure(&self.config.increment_procedure)
            .await
        {
            Ok(()) => {
                debug!("visitor counter incremented via {}", self.config.increment_procedure);
            }
            Err(e) => {
                warn!(
                    "atomic increment {} failed, using read-modify-write fallback: {:#}",
                    self.config.increment_procedure, e
                );
                self.increment_fallback().await?;
            }
        }

        // Only reached when one of the two paths succeeded; a failed
        // fallback leaves the flag unset so the next call retries.
        self.session.set(VISIT_TRACKED_KEY, "1").await?;
        Ok(())
    }

    /// Fire-and-forget visit tracking. Failures are logged and never reach
    /// the caller; visitor counting is best-effort by design of the flow.
    pub fn track_visit(self: &Arc<Self>) {
        let app = Arc::clone(self);
        tokio::spawn(async move {
            if let Err(e) = app.record_visit(false).await {
                warn!("visitor tracking failed: {:#}", e);
            }
        });
    }

    async fn increment_fallback(&self) -> Result<()> {
        let row = self
            .datastore
            .select_row(&self.config.counter_table, "key", &self.config.counter_key)
            .await?;
        let current = row.as_ref().map(counter_value).unwrap_or(0);
        let next = json!({
            "key": self.config.counter_key,
            "value": (current + 1).to_string(),
            "updated_at": self.clock.now_secs(),
        });
        self.datastore
            .upsert_row(&self.config.counter_table, &next, "key")
            .await?;
        debug!("visitor counter upserted to {}", current + 1);
        Ok(())
    }
}

/// Parse a counter row's `value`, accepting both string and numeric
/// encodings; anything else reads as zero.
fn counter_value(row: &Value) -> i64 {
    match row.get("value") {
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        Some(Value::Number(n)) => n.as_i64().unwrap_or(0),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_value_string() {
        assert_eq!(counter_value(&json!({"value": "7"})), 7);
    }

    #[test]
    fn test_counter_value_number() {
        assert_eq!(counter_value(&json!({"value": 41})), 41);
    }

    #[test]
    fn test_counter_value_garbage_is_zero() {
        assert_eq!(counter_value(&json!({"value": "not a number"})), 0);
        assert_eq!(counter_value(&json!({"other": "7"})), 0);
        assert_eq!(counter_value(&json!({"value": null})), 0);
    }
}
