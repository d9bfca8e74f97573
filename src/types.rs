use serde::{Deserialize, Serialize};

/// One contact-form submission. Created on form submit, persisted once,
/// never mutated or deleted by this system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub email: String,
    pub message: String,
}

impl ContactSubmission {
    /// All four fields must be non-empty for a submission to be accepted
    /// by the ingress. The orchestrator itself does not re-validate.
    pub fn is_complete(&self) -> bool {
        !self.first_name.trim().is_empty()
            && !self.last_name.trim().is_empty()
            && !self.email.trim().is_empty()
            && !self.message.trim().is_empty()
    }
}

/// Response from the transactional email provider. Success is signaled
/// by `status == 200`; anything else is treated as a send failure.
#[derive(Debug, Clone)]
pub struct EmailReceipt {
    pub status: u16,
    pub body: String,
}

impl EmailReceipt {
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// Durable-store key holding the unix-seconds timestamp of the last
/// successful contact submission.
pub const COOLDOWN_KEY: &str = "contact_last_submit";

/// Session-store key marking that this session already counted a visit.
pub const VISIT_TRACKED_KEY: &str = "visit_tracked";
