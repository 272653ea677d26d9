//! Domain entities. Pure data structures for the dispatch core.
//!
//! No HTTP/IO types here — these are mapped from adapters.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One validated row of the recipient list.
///
/// `phone` is the raw cell content; normalization happens at dispatch time.
/// Duplicates are allowed and processed independently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipient {
    pub phone: String,
    pub name: String,
}

/// Cloud API credentials for one batch run. Read-only for the batch's duration.
#[derive(Clone)]
pub struct Credentials {
    pub access_token: String,
    pub phone_number_id: String,
}

impl Credentials {
    pub fn new(access_token: impl Into<String>, phone_number_id: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            phone_number_id: phone_number_id.into(),
        }
    }

    /// Precondition check before a batch starts. Both fields must be non-empty.
    pub fn validate(&self) -> Result<(), crate::domain::DomainError> {
        if self.access_token.trim().is_empty() {
            return Err(crate::domain::DomainError::Config(
                "access token is required".into(),
            ));
        }
        if self.phone_number_id.trim().is_empty() {
            return Err(crate::domain::DomainError::Config(
                "phone number id is required".into(),
            ));
        }
        Ok(())
    }
}

// The bearer token must never reach logs in plaintext.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_token", &"***")
            .field("phone_number_id", &self.phone_number_id)
            .finish()
    }
}

/// Per-recipient result. Consumed by the stats aggregator and the progress sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SendOutcome {
    Sent,
    Failed { reason: String },
}

/// Running batch counters. Mutated only by the dispatch service;
/// observers get by-value snapshots inside each event.
///
/// Invariants after every `record`: `processed == succeeded + failed`
/// and `succeeded + failed <= total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchStats {
    pub total: usize,
    pub processed: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchStats {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    pub fn record(&mut self, outcome: &SendOutcome) {
        self.processed += 1;
        match outcome {
            SendOutcome::Sent => self.succeeded += 1,
            SendOutcome::Failed { .. } => self.failed += 1,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.processed == self.total
    }
}

/// Per-recipient event emitted to the progress sink.
#[derive(Debug, Clone, Serialize)]
pub struct DispatchEvent {
    pub recipient: Recipient,
    /// Normalized dispatch address (digits only, country-code prefixed).
    pub address: String,
    pub outcome: SendOutcome,
    /// Snapshot taken immediately after this recipient was recorded.
    pub stats: BatchStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_record_keeps_invariants() {
        let mut stats = BatchStats::new(3);
        stats.record(&SendOutcome::Sent);
        stats.record(&SendOutcome::Failed {
            reason: "nope".into(),
        });
        assert_eq!(stats.processed, stats.succeeded + stats.failed);
        assert_eq!(stats.succeeded, 1);
        assert_eq!(stats.failed, 1);
        assert!(!stats.is_complete());
        stats.record(&SendOutcome::Sent);
        assert!(stats.is_complete());
    }

    #[test]
    fn credentials_validate_rejects_blank_fields() {
        assert!(Credentials::new("tok", "123").validate().is_ok());
        assert!(Credentials::new("", "123").validate().is_err());
        assert!(Credentials::new("tok", "  ").validate().is_err());
    }

    #[test]
    fn credentials_debug_redacts_token() {
        let creds = Credentials::new("secret-token", "123");
        let printed = format!("{:?}", creds);
        assert!(!printed.contains("secret-token"));
        assert!(printed.contains("123"));
    }
}
