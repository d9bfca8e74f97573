use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::Value;

use crate::traits::Mailer;
use crate::types::EmailReceipt;

/// Mock mailer for testing. Records every send and answers with a scripted
/// receipt status, or fails at the transport level when `fail` is set.
pub struct MockMailer {
    pub status: u16,
    pub fail: bool,
    sends: Mutex<Vec<(String, String, Value)>>,
}

impl MockMailer {
    pub fn with_status(status: u16) -> Self {
        Self {
            status,
            fail: false,
            sends: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            status: 0,
            fail: true,
            sends: Mutex::new(Vec::new()),
        }
    }

    pub fn sends(&self) -> Vec<(String, String, Value)> {
        self.sends.lock().unwrap().clone()
    }

    pub fn send_calls(&self) -> usize {
        self.sends.lock().unwrap().len()
    }
}

impl Default for MockMailer {
    fn default() -> Self {
        Self::with_status(200)
    }
}

#[async_trait]
impl Mailer for MockMailer {
    fn name(&self) -> &'static str {
        "mock-mailer"
    }

    async fn send(
        &self,
        service_id: &str,
        template_id: &str,
        params: &Value,
    ) -> Result<EmailReceipt> {
        self.sends.lock().unwrap().push((
            service_id.to_string(),
            template_id.to_string(),
            params.clone(),
        ));
        if self.fail {
            return Err(anyhow!("mock mailer transport failure"));
        }
        Ok(EmailReceipt {
            status: self.status,
            body: if self.status == 200 { "OK".into() } else { "provider error".into() },
        })
    }
}
