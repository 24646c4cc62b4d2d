// Path: crates/api/src/report/mod.rs
//! Defines the report signing boundary.

use crate::BoundaryError;
use async_trait::async_trait;
use por_types::EncodedReport;
use serde::Serialize;
use std::fmt::Debug;

/// Names the encoder, signing and hashing algorithms a report is produced
/// under. The signing collaborator interprets these; the kernel only carries
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SignSpec {
    /// Wire encoder the envelope targets.
    pub encoder_name: &'static str,
    /// Signature algorithm.
    pub signing_algo: &'static str,
    /// Digest algorithm.
    pub hashing_algo: &'static str,
}

/// The spec every EVM-bound report in this kernel is signed under.
pub const EVM_SIGN_SPEC: SignSpec = SignSpec {
    encoder_name: "evm",
    signing_algo: "ecdsa",
    hashing_algo: "keccak256",
};

/// An opaque signed report envelope, ready for on-chain submission.
///
/// The envelope's internals (quorum signatures, encoder framing) belong to
/// the signing collaborator; the kernel treats it as bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedReport(pub Vec<u8>);

impl SignedReport {
    /// The envelope bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// The signing collaborator: encoded bytes in, opaque signed envelope out,
/// or failure.
#[async_trait]
pub trait ReportSigner: Send + Sync + Debug {
    /// Wraps the encoded payload in a signed report envelope.
    async fn sign(
        &self,
        payload: &EncodedReport,
        spec: SignSpec,
    ) -> Result<SignedReport, BoundaryError>;
}
