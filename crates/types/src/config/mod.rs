// Path: crates/types/src/config/mod.rs

//! The immutable per-run configuration record.

use crate::error::ConfigError;
use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Configuration for one attestation run, supplied by the external scheduler
/// on every trigger.
///
/// Every field is a mandatory, non-blank string; the workflow validates all
/// seven before any network activity starts. The record is read-only for the
/// run's duration and is never shared across runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Cron expression the external scheduler fires on. Carried for
    /// diagnostics; this kernel never schedules anything itself.
    pub schedule: String,
    /// URL of the off-chain reserve declaration source.
    pub url: String,
    /// Address of the batched balance reader contract.
    pub balance_reader_address: String,
    /// First attested account, read via the direct balance query.
    pub address_one: String,
    /// Second attested account, read through the balance reader contract.
    pub address_two: String,
    /// Receiver contract the signed report is written to.
    pub data_feeds_cache_address: String,
    /// Feed identifier the report is published under (hex, up to 32 bytes).
    pub feed_id: String,
}

impl RunConfig {
    /// Parses a configuration record from raw JSON bytes.
    ///
    /// This is the shape the trigger boundary hands over; anything that does
    /// not deserialize into the full record is a fatal configuration error.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, ConfigError> {
        serde_json::from_slice(bytes).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

/// Interprets a configured address field as a 20-byte EVM address.
///
/// Emptiness is the validator's concern; this reports malformed values under
/// the field name so an operator can diagnose without re-running.
pub fn parse_address(field: &'static str, value: &str) -> Result<Address, ConfigError> {
    Address::from_str(value.trim()).map_err(|e| ConfigError::Invalid {
        field,
        reason: e.to_string(),
    })
}
