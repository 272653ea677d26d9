//! Infrastructure adapters. Implement outbound ports.
//!
//! Cloud API transport, CSV ingestion, terminal UI. Map errors to DomainError.

pub mod ingest;
pub mod ui;
pub mod whatsapp;
