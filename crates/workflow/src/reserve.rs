// Path: crates/workflow/src/reserve.rs

//! Off-chain reserve evidence collection.
//!
//! One GET per participating execution node. Every node must produce a
//! usable observation before aggregation runs: partial data is never
//! combined, and a tripped ripcord on any node halts the cycle outright.

use por_api::http::NodeHttp;
use por_types::error::EvidenceError;
use por_types::evidence::{PorSourceResponse, ReserveObservation};
use std::sync::Arc;

/// Fetches one node's view of the reserve declaration.
pub async fn fetch_reserve_observation(
    node: &dyn NodeHttp,
    url: &str,
) -> Result<ReserveObservation, EvidenceError> {
    let response = node
        .get(url)
        .await
        .map_err(|e| EvidenceError::HttpTransport(e.to_string()))?;

    if response.status != 200 {
        tracing::error!(status = response.status, url, "reserve source returned non-200");
        return Err(EvidenceError::HttpStatus {
            status: response.status,
        });
    }

    let declared: PorSourceResponse = serde_json::from_slice(&response.body)
        .map_err(|e| EvidenceError::MalformedResponse(e.to_string()))?;
    tracing::info!(
        account_name = %declared.account_name,
        total_trust = %declared.total_trust,
        total_token = %declared.total_token,
        updated_at = %declared.updated_at,
        "reserve source responded"
    );

    if declared.ripcord {
        tracing::warn!(url, "ripcord flag set by reserve source");
        return Err(EvidenceError::RipcordTripped);
    }

    Ok(ReserveObservation {
        last_updated: declared.updated_at,
        total_reserve: declared.total_token,
    })
}

/// Runs the per-node fetch once for every participating node, in order.
/// The first failing node aborts the run; observations are only handed to
/// the reconciler as a complete set.
pub async fn collect_reserve_observations(
    nodes: &[Arc<dyn NodeHttp>],
    url: &str,
) -> Result<Vec<ReserveObservation>, EvidenceError> {
    let mut observations = Vec::with_capacity(nodes.len());
    for node in nodes {
        observations.push(fetch_reserve_observation(node.as_ref(), url).await?);
    }
    Ok(observations)
}
