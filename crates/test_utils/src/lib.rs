// Path: crates/test_utils/src/lib.rs

//! Programmable mock implementations of every `por-api` boundary.
//!
//! Each mock records the calls it receives so tests can assert not just on
//! outcomes but on which boundaries were (or were not) touched — the
//! ripcord and validation properties hinge on proving the absence of calls.

use alloy_primitives::{Address, B256, U256};
use async_trait::async_trait;
use por_api::chain::{
    BlockSelector, CallMsg, ChainReader, ChainWriter, GasConfig, TxStatus, WriteReportReceipt,
};
use por_api::http::{HttpResponse, NodeHttp};
use por_api::report::{ReportSigner, SignSpec, SignedReport};
use por_api::BoundaryError;
use por_types::EncodedReport;
use std::collections::HashMap;
use std::sync::Mutex;

/// One boundary interaction observed by [`MockChain`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    /// A direct balance query.
    BalanceAt {
        /// Queried account.
        account: Address,
    },
    /// A read-only contract call.
    CallContract {
        /// Target contract.
        to: Address,
        /// Raw calldata.
        data: Vec<u8>,
        /// Block the call executed against.
        block: BlockSelector,
    },
    /// A report write.
    WriteReport {
        /// Receiver contract.
        receiver: Address,
        /// Envelope bytes.
        report: Vec<u8>,
        /// Gas limit attached.
        gas_limit: u64,
    },
}

#[derive(Debug, Default)]
struct MockChainState {
    balances: HashMap<Address, U256>,
    call_results: HashMap<BlockSelector, Vec<u8>>,
    write_receipt: Option<WriteReportReceipt>,
    balance_failure: Option<String>,
    call_failure: Option<String>,
    calls: Vec<RecordedCall>,
}

/// A programmable chain collaborator implementing both the read and the
/// write boundary.
#[derive(Debug, Default)]
pub struct MockChain {
    state: Mutex<MockChainState>,
}

impl MockChain {
    /// Creates an empty mock: unknown balances read as zero, contract calls
    /// return empty data, and writes fail until a receipt is programmed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Programs the balance returned for `account`.
    pub fn set_balance(&self, account: Address, balance: U256) {
        self.state.lock().unwrap().balances.insert(account, balance);
    }

    /// Programs the raw return data for contract calls against `block`.
    pub fn set_call_result(&self, block: BlockSelector, data: Vec<u8>) {
        self.state.lock().unwrap().call_results.insert(block, data);
    }

    /// Makes every balance query fail with `message`.
    pub fn fail_balance_queries(&self, message: &str) {
        self.state.lock().unwrap().balance_failure = Some(message.to_string());
    }

    /// Makes every contract call fail with `message`.
    pub fn fail_contract_calls(&self, message: &str) {
        self.state.lock().unwrap().call_failure = Some(message.to_string());
    }

    /// Programs the receipt returned by the next report write.
    pub fn set_write_receipt(&self, receipt: WriteReportReceipt) {
        self.state.lock().unwrap().write_receipt = Some(receipt);
    }

    /// Programs a successful write returning `tx_hash`.
    pub fn succeed_writes(&self, tx_hash: B256) {
        self.set_write_receipt(WriteReportReceipt {
            tx_status: TxStatus::Success,
            tx_hash: Some(tx_hash),
            error_message: None,
        });
    }

    /// Every boundary interaction observed so far, in order.
    pub fn recorded(&self) -> Vec<RecordedCall> {
        self.state.lock().unwrap().calls.clone()
    }

    /// How many report writes were attempted.
    pub fn write_count(&self) -> usize {
        self.recorded()
            .iter()
            .filter(|c| matches!(c, RecordedCall::WriteReport { .. }))
            .count()
    }
}

#[async_trait]
impl ChainReader for MockChain {
    async fn balance_at(&self, account: Address) -> Result<U256, BoundaryError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(RecordedCall::BalanceAt { account });
        if let Some(message) = &state.balance_failure {
            return Err(BoundaryError::new(message.clone()));
        }
        Ok(state.balances.get(&account).copied().unwrap_or(U256::ZERO))
    }

    async fn call_contract(
        &self,
        call: CallMsg,
        block: BlockSelector,
    ) -> Result<Vec<u8>, BoundaryError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(RecordedCall::CallContract {
            to: call.to,
            data: call.data,
            block,
        });
        if let Some(message) = &state.call_failure {
            return Err(BoundaryError::new(message.clone()));
        }
        Ok(state.call_results.get(&block).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl ChainWriter for MockChain {
    async fn write_report(
        &self,
        receiver: Address,
        report: &SignedReport,
        gas: GasConfig,
    ) -> Result<WriteReportReceipt, BoundaryError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(RecordedCall::WriteReport {
            receiver,
            report: report.as_bytes().to_vec(),
            gas_limit: gas.gas_limit,
        });
        state
            .write_receipt
            .clone()
            .ok_or_else(|| BoundaryError::new("no write receipt programmed"))
    }
}

#[derive(Debug)]
struct MockNodeState {
    response: Result<HttpResponse, String>,
    requests: Vec<String>,
}

/// One participating node's HTTP executor, answering every GET with a
/// pre-programmed response.
#[derive(Debug)]
pub struct MockNodeHttp {
    state: Mutex<MockNodeState>,
}

impl MockNodeHttp {
    /// A node answering with `status` and `body`.
    pub fn with_response(status: u16, body: Vec<u8>) -> Self {
        Self {
            state: Mutex::new(MockNodeState {
                response: Ok(HttpResponse { status, body }),
                requests: Vec::new(),
            }),
        }
    }

    /// A node answering 200 with the given JSON value.
    pub fn with_json(value: &serde_json::Value) -> Self {
        Self::with_response(200, value.to_string().into_bytes())
    }

    /// A node whose transport fails outright.
    pub fn with_transport_error(message: &str) -> Self {
        Self {
            state: Mutex::new(MockNodeState {
                response: Err(message.to_string()),
                requests: Vec::new(),
            }),
        }
    }

    /// The URLs this node was asked to fetch, in order.
    pub fn requests(&self) -> Vec<String> {
        self.state.lock().unwrap().requests.clone()
    }
}

#[async_trait]
impl NodeHttp for MockNodeHttp {
    async fn get(&self, url: &str) -> Result<HttpResponse, BoundaryError> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(url.to_string());
        state
            .response
            .clone()
            .map_err(BoundaryError::new)
    }
}

/// A signing collaborator that wraps payloads in a recognizable envelope,
/// recording what it signed.
#[derive(Debug, Default)]
pub struct MockSigner {
    failure: Mutex<Option<String>>,
    signed: Mutex<Vec<(Vec<u8>, SignSpec)>>,
}

impl MockSigner {
    /// A signer that succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every signing attempt fail with `message`.
    pub fn fail_with(&self, message: &str) {
        *self.failure.lock().unwrap() = Some(message.to_string());
    }

    /// The payloads and specs signed so far.
    pub fn signed(&self) -> Vec<(Vec<u8>, SignSpec)> {
        self.signed.lock().unwrap().clone()
    }

    /// How many envelopes were produced.
    pub fn sign_count(&self) -> usize {
        self.signed.lock().unwrap().len()
    }
}

#[async_trait]
impl ReportSigner for MockSigner {
    async fn sign(
        &self,
        payload: &EncodedReport,
        spec: SignSpec,
    ) -> Result<SignedReport, BoundaryError> {
        if let Some(message) = self.failure.lock().unwrap().clone() {
            return Err(BoundaryError::new(message));
        }
        self.signed
            .lock()
            .unwrap()
            .push((payload.as_bytes().to_vec(), spec));
        let mut envelope = b"signed:".to_vec();
        envelope.extend_from_slice(payload.as_bytes());
        Ok(SignedReport(envelope))
    }
}

/// Builds a well-formed reserve source body for tests.
pub fn reserve_body(total_token: f64, ripcord: bool, updated_at: &str) -> serde_json::Value {
    serde_json::json!({
        "accountName": "TrueUSD",
        "totalTrust": total_token,
        "totalToken": total_token,
        "ripcord": ripcord,
        "updatedAt": updated_at,
    })
}
