//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("recipient list error: {0}")]
    Ingest(String),

    /// Network-level failure: connect, timeout, TLS, body I/O.
    #[error("transport error: {0}")]
    Transport(String),

    /// The provider accepted the connection but rejected the request
    /// (bad template, bad recipient, auth failure, rate limit).
    #[error("provider rejected request (HTTP {status}): {detail}")]
    Provider { status: u16, detail: String },

    #[error("gateway error: {0}")]
    Gateway(String),

    #[error("input error: {0}")]
    Input(String),
}
