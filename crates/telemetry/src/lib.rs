// Path: crates/telemetry/src/lib.rs
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]

//! # PoR Kernel Telemetry
//!
//! Structured logging for the attestation workflow: a global JSON `tracing`
//! subscriber and a small RAII timer for measuring a run's duration. Every
//! run emits enough context (field names, addresses, status codes, chain
//! messages) to diagnose an abort without re-running it.

/// The initialization routine for global structured logging.
pub mod init;
/// A simple RAII timer for measuring the duration of a scope.
pub mod time;

pub use init::init_tracing;
pub use time::ScopeTimer;
