use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use super::{mock::MockMailer, noop::NoopMailer, template::TemplateMailer};
use crate::config::{MailerType, SiteConfig};
use crate::traits::Mailer;
use crate::types::EmailReceipt;

/// Enum representing all possible mailer implementations.
pub enum MailerVariant {
    Template(TemplateMailer),
    Noop(NoopMailer),
    Mock(MockMailer),
}

impl MailerVariant {
    /// Create a new mailer instance based on the configured type.
    pub fn new(config: &SiteConfig) -> Self {
        match config.mailer {
            MailerType::Template => MailerVariant::Template(TemplateMailer::new(
                config.email_endpoint.clone(),
                config.email_public_key.clone(),
            )),
            MailerType::Noop => MailerVariant::Noop(NoopMailer),
            MailerType::Mock => MailerVariant::Mock(MockMailer::default()),
        }
    }
}

#[async_trait]
impl Mailer for MailerVariant {
    fn name(&self) -> &'static str {
        match self {
            MailerVariant::Template(inner) => inner.name(),
            MailerVariant::Noop(inner) => inner.name(),
            MailerVariant::Mock(inner) => inner.name(),
        }
    }

    async fn send(
        &self,
        service_id: &str,
        template_id: &str,
        params: &Value,
    ) -> Result<EmailReceipt> {
        match self {
            MailerVariant::Template(inner) => inner.send(service_id, template_id, params).await,
            MailerVariant::Noop(inner) => inner.send(service_id, template_id, params).await,
            MailerVariant::Mock(inner) => inner.send(service_id, template_id, params).await,
        }
    }
}
