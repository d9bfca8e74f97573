//! Contact submission flow: cooldown check, datastore insert, email send,
//! cooldown stamp. No retries; each step runs at most once.

use tracing::{debug, info, warn};

use super::core::Siteline;
use crate::error::SubmitError;
use crate::traits::{Clock, Datastore, FlagStore, Mailer};
use crate::types::{ContactSubmission, COOLDOWN_KEY};

impl Siteline {
    /// Submit one contact-form payload.
    ///
    /// Ordering is strict: nothing is sent before the submission is
    /// persisted, and the cooldown is only stamped once both steps
    /// succeeded. A persisted submission whose email failed stays persisted;
    /// that inconsistency is accepted (see DESIGN.md).
    ///
    /// The caller is responsible for ensuring all four fields are non-empty.
    pub async fn submit_contact(&self, submission: &ContactSubmission) -> Result<(), SubmitError> {
        let now = self.clock.now_secs();

        if let Some(last) = self.last_submit_secs().await {
            // Future-dated stamps (clock skew) read as zero elapsed time and
            // therefore reject.
            let elapsed = now.saturating_sub(last);
            if elapsed < self.config.cooldown_secs {
                let remaining_secs = self.config.cooldown_secs - elapsed;
                debug!("submission rejected by cooldown, {}s remaining", remaining_secs);
                return Err(SubmitError::CooldownActive { remaining_secs });
            }
        }

        let row = serde_json::to_value(submission)
            .map_err(|e| SubmitError::Persist(e.into()))?;
        self.datastore
            .insert_row(&self.config.contact_table, &row)
            .await
            .map_err(SubmitError::Persist)?;
        debug!("submission persisted to {}", self.config.contact_table);

        let receipt = self
            .mailer
            .send(
                &self.config.email_service_id,
                &self.config.email_template_id,
                &row,
            )
            .await
            .map_err(SubmitError::Email)?;
        if !receipt.is_success() {
            return Err(SubmitError::Email(anyhow::anyhow!(
                "provider returned {}: {}",
                receipt.status,
                receipt.body
            )));
        }

        // The submission itself fully succeeded at this point; a failed
        // cooldown write must not turn it into a reported failure.
        if let Err(e) = self.durable.set(COOLDOWN_KEY, &now.to_string()).await {
            warn!("could not record submission cooldown: {:#}", e);
        }

        info!("contact submission from {} accepted", submission.email);
        Ok(())
    }

    /// Last successful submission time, if one was recorded and parses.
    /// Unreadable stores and unparsable values count as "never submitted".
    async fn last_submit_secs(&self) -> Option<u64> {
        match self.durable.get(COOLDOWN_KEY).await {
            Ok(value) => value.and_then(|v| v.parse::<u64>().ok()),
            Err(e) => {
                warn!("cooldown store unreadable, treating as empty: {:#}", e);
                None
            }
        }
    }
}
