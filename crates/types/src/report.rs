// Path: crates/types/src/report.rs

//! The reconciled report payload and the terminal submission artifact.

use crate::error::ConfigError;
use alloy_primitives::{B256, U256};

/// A 32-byte feed identifier.
///
/// Configured as a hex string; values shorter than 32 bytes are right-padded
/// with zeros into the high-order bytes of the slot, matching the on-chain
/// registry's convention for short identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeedId(pub B256);

impl FeedId {
    /// Parses a `0x`-prefixed hex feed identifier of up to 32 bytes.
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: String| ConfigError::Invalid {
            field: "feed_id",
            reason,
        };
        let stripped = value
            .strip_prefix("0x")
            .ok_or_else(|| invalid(format!("expected 0x-prefixed hex, got {value:?}")))?;
        let bytes = hex::decode(stripped).map_err(|e| invalid(e.to_string()))?;
        if bytes.len() > 32 {
            return Err(invalid(format!("{} bytes exceeds the 32-byte slot", bytes.len())));
        }
        let mut slot = [0u8; 32];
        slot[..bytes.len()].copy_from_slice(&bytes);
        Ok(Self(B256::from(slot)))
    }

    /// The identifier as a fixed 32-byte value.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0 .0
    }
}

impl std::fmt::Display for FeedId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// The single reconciled value set produced per run.
///
/// Immutable once produced; the encoder is its only consumer. Range checks
/// against the wire fields (32-bit timestamp, 224-bit price) happen at
/// encoding time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciledPrice {
    /// The feed this report publishes under.
    pub feed_id: FeedId,
    /// Reconciled source timestamp, unix seconds, truncated not rounded.
    pub timestamp: i64,
    /// Reconciled reserve scaled to 18 decimal places.
    pub price: U256,
}

/// The canonical binary encoding of a one-element report tuple array.
///
/// Produced once per run, handed to the signing collaborator exactly once,
/// and never decoded again inside the kernel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedReport(pub Vec<u8>);

impl EncodedReport {
    /// The encoded payload bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// The terminal artifact of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionResult {
    /// Hash of the committed report transaction.
    pub tx_hash: B256,
}

impl SubmissionResult {
    /// The transaction hash as a `0x`-prefixed hex string, the shape the
    /// trigger boundary returns to the runtime.
    pub fn tx_hash_hex(&self) -> String {
        format!("0x{}", hex::encode(self.tx_hash))
    }
}
