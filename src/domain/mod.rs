//! Core domain layer. No external I/O dependencies.
//!
//! Entities and business rules live here. Dependencies flow inward.

pub mod address;
pub mod entities;
pub mod errors;

pub use address::normalize_address;
pub use entities::{BatchStats, Credentials, DispatchEvent, Recipient, SendOutcome};
pub use errors::DomainError;
