// Path: crates/types/src/evidence.rs

//! Evidence records collected during a single attestation run.
//!
//! All of these are stack-local to one run: created while evidence is
//! gathered, consumed by the reconciliation and encoding steps, and dropped
//! when the run ends. Nothing here is persisted.

use alloy_primitives::{Address, U256};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

/// The two independent on-chain balance attestations gathered per run.
///
/// No relationship between the two quantities is enforced here; they are
/// independent views forwarded downstream so an auditor can cross-check
/// them against the published report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceEvidence {
    /// Account read via the direct balance query.
    pub address_one: Address,
    /// Native-asset balance of `address_one` at the chain's current view.
    pub balance_one: U256,
    /// Account read through the balance reader contract.
    pub address_two: Address,
    /// Native-asset balance of `address_two` at the last finalized block.
    pub balance_two: U256,
}

/// One node's view of the off-chain reserve declaration.
///
/// Created fresh on every HTTP round-trip and discarded immediately after
/// feeding the consensus step. The source's ripcord flag never reaches this
/// record: a tripped ripcord fails the fetch outright.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReserveObservation {
    /// Instant of the last update at the source.
    pub last_updated: DateTime<Utc>,
    /// The declared reserve amount, in token units.
    pub total_reserve: Decimal,
}

/// The wire record the off-chain reserve source answers with.
///
/// Deserialization is strict: a body that does not match this shape is a
/// malformed response, never coerced.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PorSourceResponse {
    /// Human-readable name of the attested account.
    pub account_name: String,
    /// The declared trust balance.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_trust: Decimal,
    /// The declared token reserve; this is the figure the report publishes.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_token: Decimal,
    /// Safety interlock: when true, the source is declaring an unsafe
    /// condition and no report may be published this cycle.
    pub ripcord: bool,
    /// Instant of the last update at the source (ISO-8601).
    pub updated_at: DateTime<Utc>,
}
