use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crate::traits::Mailer;
use crate::types::EmailReceipt;

/// Template-send HTTP mailer (EmailJS-style API).
///
/// One POST to the provider's send endpoint:
/// `{service_id, template_id, user_id, template_params}`. The provider's
/// status code and body come back verbatim in the receipt; the caller
/// decides what counts as delivered.
pub struct TemplateMailer {
    endpoint: String,
    public_key: String,
    client: reqwest::Client,
}

impl TemplateMailer {
    pub fn new(endpoint: String, public_key: String) -> Self {
        Self {
            endpoint,
            public_key,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Mailer for TemplateMailer {
    fn name(&self) -> &'static str {
        "template-mailer"
    }

    async fn send(
        &self,
        service_id: &str,
        template_id: &str,
        params: &Value,
    ) -> Result<EmailReceipt> {
        debug!("sending template {} via service {}", template_id, service_id);
        let payload = json!({
            "service_id": service_id,
            "template_id": template_id,
            "user_id": self.public_key,
            "template_params": params,
        });
        let resp = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .context("email send did not reach the provider")?;
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        Ok(EmailReceipt { status, body })
    }
}
