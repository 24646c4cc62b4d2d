// Path: crates/node/src/lib.rs
#![forbid(unsafe_code)]

//! Library surface of the operator binary: the runtime-gateway adapter that
//! implements the workflow's collaborator boundaries over HTTP.

/// The runtime gateway adapter and the direct per-node HTTP executor.
pub mod gateway;

pub use gateway::{DirectNodeHttp, RuntimeGateway};
