// Path: crates/node/src/gateway.rs

//! Boundary adapters over the external oracle runtime gateway.
//!
//! The gateway owns everything this kernel treats as a collaborator: chain
//! RPC access with finality tracking, quorum report signing, and the write
//! path. This adapter only shapes requests and replies; it performs no
//! retries — a failed boundary call fails the run, and the scheduler's next
//! trigger is the retry policy.

use alloy_primitives::{Address, B256, U256};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as B64, Engine as _};
use por_api::chain::{
    BlockSelector, CallMsg, ChainReader, ChainWriter, GasConfig, TxStatus, WriteReportReceipt,
};
use por_api::http::{HttpResponse, NodeHttp};
use por_api::report::{ReportSigner, SignSpec, SignedReport};
use por_api::BoundaryError;
use por_types::EncodedReport;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// A client for the runtime gateway's boundary endpoints.
#[derive(Debug, Clone)]
pub struct RuntimeGateway {
    base: String,
    client: Client,
}

impl RuntimeGateway {
    /// Creates a gateway client against `base` (e.g. `http://127.0.0.1:8550`).
    pub fn new(base: String) -> Self {
        Self {
            base,
            client: Client::new(),
        }
    }

    async fn post<Req: Serialize, Reply: DeserializeOwned>(
        &self,
        path: &str,
        request: &Req,
    ) -> Result<Reply, BoundaryError> {
        let url = format!("{}{}", self.base, path);
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| BoundaryError::new(format!("gateway send failed: {e}")))?;

        let status = response.status();
        let body = response.bytes().await.unwrap_or_default();
        if !status.is_success() {
            return Err(BoundaryError::new(format!(
                "gateway HTTP {} from {}: {}",
                status.as_u16(),
                path,
                ascii_snippet(&body)
            )));
        }
        serde_json::from_slice(&body)
            .map_err(|e| BoundaryError::new(format!("gateway reply from {path} undecodable: {e}")))
    }
}

fn ascii_snippet(bytes: &[u8]) -> String {
    let s = String::from_utf8_lossy(bytes);
    let s: String = s.trim().chars().take(160).collect();
    s.replace('\n', "\\n").replace('\r', "\\r").replace('\t', "\\t")
}

fn parse_u256_hex(value: &str) -> Result<U256, BoundaryError> {
    let digits = value.strip_prefix("0x").unwrap_or(value);
    U256::from_str_radix(digits, 16)
        .map_err(|e| BoundaryError::new(format!("bad quantity {value:?}: {e}")))
}

fn parse_b256_hex(value: &str) -> Result<B256, BoundaryError> {
    let digits = value.strip_prefix("0x").unwrap_or(value);
    let bytes = hex::decode(digits)
        .map_err(|e| BoundaryError::new(format!("bad hash {value:?}: {e}")))?;
    if bytes.len() != 32 {
        return Err(BoundaryError::new(format!(
            "bad hash {value:?}: expected 32 bytes, got {}",
            bytes.len()
        )));
    }
    Ok(B256::from_slice(&bytes))
}

#[derive(Serialize)]
struct BalanceQuery<'a> {
    account: &'a str,
}

#[derive(Deserialize)]
struct BalanceReply {
    balance: String,
}

#[derive(Serialize)]
struct CallQuery<'a> {
    to: &'a str,
    data: String,
    block: BlockSelector,
}

#[derive(Deserialize)]
struct CallReply {
    data: String,
}

#[async_trait]
impl ChainReader for RuntimeGateway {
    async fn balance_at(&self, account: Address) -> Result<U256, BoundaryError> {
        let reply: BalanceReply = self
            .post(
                "/v1/evm/balance",
                &BalanceQuery {
                    account: &account.to_string(),
                },
            )
            .await?;
        parse_u256_hex(&reply.balance)
    }

    async fn call_contract(
        &self,
        call: CallMsg,
        block: BlockSelector,
    ) -> Result<Vec<u8>, BoundaryError> {
        let reply: CallReply = self
            .post(
                "/v1/evm/call",
                &CallQuery {
                    to: &call.to.to_string(),
                    data: format!("0x{}", hex::encode(&call.data)),
                    block,
                },
            )
            .await?;
        let digits = reply.data.strip_prefix("0x").unwrap_or(&reply.data);
        hex::decode(digits)
            .map_err(|e| BoundaryError::new(format!("bad call return data: {e}")))
    }
}

#[derive(Serialize)]
struct SignRequest<'a> {
    payload: String,
    encoder_name: &'a str,
    signing_algo: &'a str,
    hashing_algo: &'a str,
}

#[derive(Deserialize)]
struct SignReply {
    report: String,
}

#[async_trait]
impl ReportSigner for RuntimeGateway {
    async fn sign(
        &self,
        payload: &EncodedReport,
        spec: SignSpec,
    ) -> Result<SignedReport, BoundaryError> {
        let reply: SignReply = self
            .post(
                "/v1/report/sign",
                &SignRequest {
                    payload: B64.encode(payload.as_bytes()),
                    encoder_name: spec.encoder_name,
                    signing_algo: spec.signing_algo,
                    hashing_algo: spec.hashing_algo,
                },
            )
            .await?;
        let envelope = B64
            .decode(&reply.report)
            .map_err(|e| BoundaryError::new(format!("bad report envelope: {e}")))?;
        Ok(SignedReport(envelope))
    }
}

#[derive(Serialize)]
struct WriteRequest<'a> {
    receiver: &'a str,
    report: String,
    gas_limit: u64,
}

#[derive(Deserialize)]
struct WriteReply {
    tx_status: TxStatus,
    #[serde(default)]
    tx_hash: Option<String>,
    #[serde(default)]
    error_message: Option<String>,
}

#[async_trait]
impl ChainWriter for RuntimeGateway {
    async fn write_report(
        &self,
        receiver: Address,
        report: &SignedReport,
        gas: GasConfig,
    ) -> Result<WriteReportReceipt, BoundaryError> {
        let reply: WriteReply = self
            .post(
                "/v1/evm/write-report",
                &WriteRequest {
                    receiver: &receiver.to_string(),
                    report: B64.encode(report.as_bytes()),
                    gas_limit: gas.gas_limit,
                },
            )
            .await?;
        let tx_hash = reply.tx_hash.as_deref().map(parse_b256_hex).transpose()?;
        Ok(WriteReportReceipt {
            tx_status: reply.tx_status,
            tx_hash,
            error_message: reply.error_message,
        })
    }
}

/// This node's own HTTP executor for the reserve source.
///
/// In a deployed network each execution node fetches the source itself and
/// the runtime replays the sub-step; a single operator node is simply a
/// network of one.
#[derive(Debug, Clone, Default)]
pub struct DirectNodeHttp {
    client: Client,
}

impl DirectNodeHttp {
    /// Creates an executor with a fresh HTTP client.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NodeHttp for DirectNodeHttp {
    async fn get(&self, url: &str) -> Result<HttpResponse, BoundaryError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| BoundaryError::new(format!("GET {url} failed: {e}")))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| BoundaryError::new(format!("GET {url} body read failed: {e}")))?
            .to_vec();
        Ok(HttpResponse { status, body })
    }
}
