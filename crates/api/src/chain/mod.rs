// Path: crates/api/src/chain/mod.rs
//! Defines the chain read and write boundaries the workflow consumes.

use crate::report::SignedReport;
use crate::BoundaryError;
use alloy_primitives::{Address, B256, U256};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Selects the block a read executes against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockSelector {
    /// The chain's current view.
    Latest,
    /// The last finalized block — guaranteed not to revert, so two
    /// executions of the same read stay reproducible for auditors.
    Finalized,
}

/// A read-only contract call payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallMsg {
    /// The contract to call.
    pub to: Address,
    /// ABI-packed calldata.
    pub data: Vec<u8>,
}

/// Gas budget for a report write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasConfig {
    /// The gas limit attached to the write transaction.
    pub gas_limit: u64,
}

/// Terminal status of a report write transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TxStatus {
    /// The transaction was included and succeeded.
    Success,
    /// The transaction was included but reverted.
    Reverted,
    /// The transaction could not be included.
    Fatal,
}

impl std::fmt::Display for TxStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => f.write_str("success"),
            Self::Reverted => f.write_str("reverted"),
            Self::Fatal => f.write_str("fatal"),
        }
    }
}

/// The write path's definitive outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteReportReceipt {
    /// Terminal transaction status.
    pub tx_status: TxStatus,
    /// Hash of the transaction, when one was produced.
    pub tx_hash: Option<B256>,
    /// The chain's error message for non-success outcomes, when available.
    pub error_message: Option<String>,
}

/// Read access to the chain.
#[async_trait]
pub trait ChainReader: Send + Sync + Debug {
    /// Returns the native-asset balance of `account` at the chain's current
    /// view.
    async fn balance_at(&self, account: Address) -> Result<U256, BoundaryError>;

    /// Executes a read-only contract call against the selected block and
    /// returns the raw return data.
    async fn call_contract(
        &self,
        call: CallMsg,
        block: BlockSelector,
    ) -> Result<Vec<u8>, BoundaryError>;
}

/// Write access to the chain's reporting log.
#[async_trait]
pub trait ChainWriter: Send + Sync + Debug {
    /// Submits a signed report envelope to `receiver` and waits for the
    /// definitive outcome. Implementations must not leave partial state in
    /// the reporting log: the write either reaches a terminal status or
    /// fails as a whole.
    async fn write_report(
        &self,
        receiver: Address,
        report: &SignedReport,
        gas: GasConfig,
    ) -> Result<WriteReportReceipt, BoundaryError>;
}
