// Path: crates/api/src/lib.rs
#![forbid(unsafe_code)]

//! Collaborator boundary traits for the PoR attestation kernel.
//!
//! The workflow consumes four external capabilities — chain reads, chain
//! writes, per-node HTTP execution, and report signing — and this crate
//! defines their contracts. Every method is a blocking request/result
//! operation from the workflow's point of view: it awaits a definitive
//! answer or error before the run proceeds. The implementations (RPC
//! transports, the node fan-out machinery, threshold signing) live outside
//! the kernel.

/// Chain read and write boundaries.
pub mod chain;
/// The per-node HTTP execution boundary.
pub mod http;
/// The report signing boundary.
pub mod report;

use thiserror::Error;

/// An opaque failure surfaced by a collaborator.
///
/// Boundary implementations reduce their transport- or protocol-specific
/// failures to a description; the workflow maps these into its own error
/// taxonomy at the call site.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct BoundaryError(pub String);

impl BoundaryError {
    /// Wraps any displayable failure.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}
