use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use crate::traits::Mailer;
use crate::types::EmailReceipt;

/// Noop mailer for demonstration purposes. Pretends every send succeeded.
pub struct NoopMailer;

#[async_trait]
impl Mailer for NoopMailer {
    fn name(&self) -> &'static str {
        "noop-mailer"
    }

    async fn send(
        &self,
        service_id: &str,
        template_id: &str,
        _params: &Value,
    ) -> Result<EmailReceipt> {
        tracing::info!(
            "NoopMailer: dropping send of template {} via service {}",
            template_id,
            service_id
        );
        Ok(EmailReceipt {
            status: 200,
            body: "noop".into(),
        })
    }
}
