//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{BatchStats, Credentials, DispatchEvent, DomainError, Recipient};

/// WhatsApp gateway. Delivers one templated message per call.
///
/// Exactly one outbound request per invocation, no internal retries (retry
/// policy belongs to the caller, and the dispatcher performs none). Every
/// failure mode comes back as a classified `DomainError`; implementations
/// must not panic on provider misbehavior.
#[async_trait::async_trait]
pub trait WaGateway: Send + Sync {
    /// Send the configured template to `address` (normalized, digits only).
    async fn send_template(
        &self,
        address: &str,
        display_name: &str,
        credentials: &Credentials,
    ) -> Result<(), DomainError>;
}

/// Recipient list source. Produces the validated, ordered sequence the
/// dispatcher iterates; every returned row has non-empty phone and name.
#[async_trait::async_trait]
pub trait RecipientSource: Send + Sync {
    async fn load(&self) -> Result<Vec<Recipient>, DomainError>;
}

/// Progress sink. The dispatcher emits one start event, one event per
/// recipient (in input order), and one final event per batch.
///
/// Methods are infallible: a broken presentation layer must never abort
/// dispatch.
#[async_trait::async_trait]
pub trait ProgressPort: Send + Sync {
    async fn on_start(&self, total: usize);

    async fn on_outcome(&self, event: &DispatchEvent);

    async fn on_complete(&self, stats: &BatchStats);
}
