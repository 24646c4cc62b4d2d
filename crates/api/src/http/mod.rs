// Path: crates/api/src/http/mod.rs
//! Defines the per-node HTTP execution boundary.

use crate::BoundaryError;
use async_trait::async_trait;
use std::fmt::Debug;

/// A raw HTTP response as observed by one execution node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub status: u16,
    /// The response body bytes.
    pub body: Vec<u8>,
}

/// One participating execution node's HTTP capability.
///
/// The surrounding runtime decides how many nodes participate and replays
/// the fetch on each of them; the workflow is handed one executor per node
/// and invokes each exactly once per run.
#[async_trait]
pub trait NodeHttp: Send + Sync + Debug {
    /// Issues a GET request and returns the status and body.
    ///
    /// Transport failures (unreachable host, timeout) surface as errors;
    /// non-2xx statuses are returned as ordinary responses for the caller
    /// to judge.
    async fn get(&self, url: &str) -> Result<HttpResponse, BoundaryError>;
}
