//! Batch dispatch loop: normalize -> send -> record -> emit -> throttle.
//!
//! One `run_batch` call processes the whole list exactly once, in input
//! order. Individual send failures become `SendOutcome::Failed` and the loop
//! continues; the only fatal error is a credentials precondition violation,
//! raised before the first recipient is touched.

use crate::domain::{
    BatchStats, Credentials, DispatchEvent, DomainError, Recipient, SendOutcome, normalize_address,
};
use crate::ports::{ProgressPort, WaGateway};
use crate::usecases::throttle::Throttle;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Dispatch service. Owns the batch counters; everything else is borrowed
/// for the duration of one run.
pub struct DispatchService {
    gateway: Arc<dyn WaGateway>,
    progress: Arc<dyn ProgressPort>,
    throttle: Throttle,
    /// Prefix applied by address normalization when absent (e.g. "55").
    country_code: String,
}

impl DispatchService {
    pub fn new(
        gateway: Arc<dyn WaGateway>,
        progress: Arc<dyn ProgressPort>,
        throttle: Throttle,
        country_code: String,
    ) -> Self {
        Self {
            gateway,
            progress,
            throttle,
            country_code,
        }
    }

    /// Run one batch over `recipients`. Emits a start event, one outcome
    /// event per recipient, and a final event; returns the final stats.
    ///
    /// An empty list completes immediately with all-zero stats.
    pub async fn run_batch(
        &self,
        recipients: &[Recipient],
        credentials: &Credentials,
    ) -> Result<BatchStats, DomainError> {
        credentials.validate()?;

        let mut stats = BatchStats::new(recipients.len());
        self.progress.on_start(stats.total).await;
        info!(total = stats.total, "batch started");

        for recipient in recipients {
            let address = normalize_address(&recipient.phone, &self.country_code);

            let outcome = match self
                .gateway
                .send_template(&address, &recipient.name, credentials)
                .await
            {
                Ok(()) => SendOutcome::Sent,
                Err(e) => SendOutcome::Failed {
                    reason: e.to_string(),
                },
            };

            match &outcome {
                SendOutcome::Sent => {
                    debug!(%address, name = %recipient.name, "template sent");
                }
                SendOutcome::Failed { reason } => {
                    warn!(%address, name = %recipient.name, %reason, "send failed");
                }
            }

            stats.record(&outcome);
            self.progress
                .on_outcome(&DispatchEvent {
                    recipient: recipient.clone(),
                    address,
                    outcome,
                    stats,
                })
                .await;

            // Uniform pacing: the pause follows every attempt, the last one
            // included, matching the fixed-delay contract.
            self.throttle.pause().await;
        }

        self.progress.on_complete(&stats).await;
        info!(
            succeeded = stats.succeeded,
            failed = stats.failed,
            total = stats.total,
            "batch complete"
        );
        Ok(stats)
    }
}
