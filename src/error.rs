use thiserror::Error;

/// Failure modes of the contact submission flow.
///
/// Mirrors what the caller can observe: a local policy rejection (no network
/// traffic happened), a persistence failure (nothing was stored, no email
/// attempted), or an email failure (the submission row IS persisted; this
/// inconsistency is accepted and not reconciled).
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("please wait {remaining_secs}s before sending another message")]
    CooldownActive { remaining_secs: u64 },

    #[error("failed to save submission: {0}")]
    Persist(anyhow::Error),

    #[error("failed to send notification email: {0}")]
    Email(anyhow::Error),
}

impl SubmitError {
    /// True when the rejection was purely local and no remote call was made.
    pub fn is_local(&self) -> bool {
        matches!(self, SubmitError::CooldownActive { .. })
    }
}
