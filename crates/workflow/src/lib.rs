// Path: crates/workflow/src/lib.rs
#![forbid(unsafe_code)]

//! # PoR attestation workflow
//!
//! One trigger invocation runs one synchronous, all-or-nothing pipeline:
//!
//! 1. validate the run configuration (no network before this passes);
//! 2. collect on-chain balance evidence (direct query, then a batched
//!    contract read pinned to the last finalized block);
//! 3. collect one reserve observation per participating execution node,
//!    honoring the source's ripcord interlock;
//! 4. reconcile the observations field-by-field (median);
//! 5. scale and encode the reconciled price into the canonical report;
//! 6. sign the report and write it to the receiver contract.
//!
//! The run either returns the committed transaction hash or aborts with a
//! [`WorkflowError`]; no partial report is ever committed, and nothing is
//! shared across runs.

/// On-chain balance evidence collection.
pub mod balance;
/// Per-field consensus reconciliation.
pub mod consensus;
/// Report scaling and canonical encoding.
pub mod encode;
/// Off-chain reserve evidence collection.
pub mod reserve;
/// Report signing and submission.
pub mod submit;
/// Eager configuration validation.
pub mod validate;

#[cfg(test)]
mod tests;

use por_api::chain::{ChainReader, ChainWriter};
use por_api::http::NodeHttp;
use por_api::report::ReportSigner;
use por_telemetry::ScopeTimer;
use por_types::config::{parse_address, RunConfig};
use por_types::report::{FeedId, ReconciledPrice, SubmissionResult};
use por_types::WorkflowError;
use std::sync::Arc;

/// The collaborators one run executes against.
///
/// Everything the pipeline needs is passed in here explicitly; there is no
/// ambient state. `nodes` holds one HTTP executor per participating
/// execution node — the surrounding runtime owns the fan-out.
#[derive(Debug, Clone)]
pub struct WorkflowDeps {
    /// Chain read boundary.
    pub chain_reader: Arc<dyn ChainReader>,
    /// Chain write boundary.
    pub chain_writer: Arc<dyn ChainWriter>,
    /// One HTTP executor per participating node.
    pub nodes: Vec<Arc<dyn NodeHttp>>,
    /// Report signing boundary.
    pub signer: Arc<dyn ReportSigner>,
}

/// Executes one attestation run to completion.
///
/// Returns the committed transaction hash on success. Every sub-step
/// failure aborts immediately; no on-chain write happens before the final
/// step, so an aborted run leaves no partial state behind.
pub async fn run_attestation(
    config: &RunConfig,
    deps: &WorkflowDeps,
) -> Result<SubmissionResult, WorkflowError> {
    let _timer = ScopeTimer::new("attestation_run");
    tracing::info!(schedule = %config.schedule, url = %config.url, "attestation run started");

    validate::validate(config)?;
    let address_one = parse_address("address_one", &config.address_one)?;
    let address_two = parse_address("address_two", &config.address_two)?;
    let balance_reader = parse_address("balance_reader_address", &config.balance_reader_address)?;
    let receiver = parse_address("data_feeds_cache_address", &config.data_feeds_cache_address)?;
    let feed_id = FeedId::parse(&config.feed_id)?;

    let balances =
        balance::collect_balance_evidence(deps.chain_reader.as_ref(), address_one, address_two, balance_reader)
            .await?;

    let observations = reserve::collect_reserve_observations(&deps.nodes, &config.url).await?;
    let agreed = consensus::reconcile(&observations, &consensus::MEDIAN_BY_FIELD)?;
    tracing::info!(
        last_updated = %agreed.last_updated,
        total_reserve = %agreed.total_reserve,
        "reserve observations reconciled"
    );

    let report = ReconciledPrice {
        feed_id,
        timestamp: agreed.last_updated.timestamp(),
        price: encode::scale_reserve(agreed.total_reserve)?,
    };
    // The full evidence record for this run, emitted before encoding so a
    // run's log is auditable even when the write fails.
    tracing::info!(
        balance_one = %balances.balance_one,
        balance_two = %balances.balance_two,
        feed_id = %report.feed_id,
        timestamp = report.timestamp,
        price = %report.price,
        "encoding report data"
    );
    let encoded = encode::encode_reports(std::slice::from_ref(&report))?;

    let result =
        submit::submit_report(deps.signer.as_ref(), deps.chain_writer.as_ref(), receiver, &encoded)
            .await?;
    tracing::info!(tx_hash = %result.tx_hash_hex(), "attestation run committed");
    Ok(result)
}
