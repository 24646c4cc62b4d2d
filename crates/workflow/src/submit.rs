// Path: crates/workflow/src/submit.rs

//! Report signing and submission.
//!
//! The final two steps of a successful run: wrap the encoded payload in a
//! signed envelope, then commit it to the receiver contract. The write is
//! the run's last action; any non-success outcome aborts the run and retry
//! policy, if any, belongs to the scheduler's next trigger.

use alloy_primitives::{Address, B256};
use por_api::chain::{ChainWriter, GasConfig, TxStatus};
use por_api::report::{ReportSigner, EVM_SIGN_SPEC};
use por_types::error::SubmissionError;
use por_types::report::{EncodedReport, SubmissionResult};

/// Gas budget attached to every report write.
pub const REPORT_GAS_LIMIT: u64 = 5_000_000;

/// Signs the encoded payload and writes it to the receiver contract,
/// returning the committed transaction hash.
pub async fn submit_report(
    signer: &dyn ReportSigner,
    writer: &dyn ChainWriter,
    receiver: Address,
    payload: &EncodedReport,
) -> Result<SubmissionResult, SubmissionError> {
    let envelope = signer
        .sign(payload, EVM_SIGN_SPEC)
        .await
        .map_err(|e| SubmissionError::Signing(e.to_string()))?;
    tracing::info!("final report generated");

    let receipt = writer
        .write_report(
            receiver,
            &envelope,
            GasConfig {
                gas_limit: REPORT_GAS_LIMIT,
            },
        )
        .await
        .map_err(|e| SubmissionError::Failed {
            status: "unsubmitted".to_string(),
            message: e.to_string(),
        })?;

    match receipt.tx_status {
        TxStatus::Success => {
            // The write path may omit the hash; fall back to the zero hash
            // rather than inventing one.
            let tx_hash = receipt.tx_hash.unwrap_or(B256::ZERO);
            tracing::info!(tx_hash = %format!("0x{}", hex::encode(tx_hash)), "write report transaction succeeded");
            Ok(SubmissionResult { tx_hash })
        }
        status => {
            let message = receipt
                .error_message
                .unwrap_or_else(|| status.to_string());
            tracing::error!(%status, message = %message, "failed to write report on-chain");
            Err(SubmissionError::Failed {
                status: status.to_string(),
                message,
            })
        }
    }
}
