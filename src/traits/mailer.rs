use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use crate::types::EmailReceipt;

/// Trait for the transactional email provider.
///
/// A send either fails at the transport level (`Err`) or yields a receipt
/// whose status the caller inspects; only status 200 counts as delivered.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Human-readable backend name for logging.
    fn name(&self) -> &'static str;

    /// Send one templated email with the given template parameters.
    async fn send(
        &self,
        service_id: &str,
        template_id: &str,
        params: &Value,
    ) -> Result<EmailReceipt>;
}
