// Path: crates/types/src/error/mod.rs
//! Core error types for the PoR attestation kernel.

use thiserror::Error;

/// A trait for assigning a stable, machine-readable string code to an error.
pub trait ErrorCode {
    /// Returns the unique, stable string identifier for this error variant.
    fn code(&self) -> &'static str;
}

/// Errors raised while validating or parsing the run configuration.
///
/// These are fatal and never retried: they are caught before any network I/O
/// starts, so an aborted run leaves no partial evidence behind.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required configuration field is absent or blank after trimming.
    #[error("config value '{field}' cannot be empty")]
    Missing {
        /// Name of the offending field.
        field: &'static str,
    },
    /// A configuration field is present but cannot be interpreted (e.g. a
    /// malformed hex address or feed identifier).
    #[error("config value '{field}' is invalid: {reason}")]
    Invalid {
        /// Name of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
    /// The raw configuration payload did not deserialize into the record.
    #[error("failed to parse config: {0}")]
    Parse(String),
}

impl ErrorCode for ConfigError {
    fn code(&self) -> &'static str {
        match self {
            Self::Missing { .. } => "CONFIG_MISSING_FIELD",
            Self::Invalid { .. } => "CONFIG_INVALID_FIELD",
            Self::Parse(_) => "CONFIG_PARSE_FAILED",
        }
    }
}

/// Errors raised while collecting balance or reserve evidence.
///
/// Evidence is all-or-nothing: any variant here aborts the run before a
/// report is encoded.
#[derive(Debug, Error)]
pub enum EvidenceError {
    /// An on-chain read (balance query or contract call) failed.
    #[error("chain query for {address} failed: {reason}")]
    ChainQuery {
        /// The account or contract address the query targeted.
        address: String,
        /// The chain client's failure description.
        reason: String,
    },
    /// The balance reader contract returned an empty result list.
    #[error("no balances returned from contract {contract}")]
    EmptyResult {
        /// The balance reader contract address.
        contract: String,
    },
    /// The off-chain source could not be reached at the transport level.
    #[error("off-chain source unreachable: {0}")]
    HttpTransport(String),
    /// The off-chain source answered with a non-200 HTTP status.
    #[error("HTTP request failed with status: {status}")]
    HttpStatus {
        /// The HTTP status code received.
        status: u16,
    },
    /// The off-chain source's body did not match the expected record.
    #[error("malformed reserve response: {0}")]
    MalformedResponse(String),
    /// The off-chain source self-reported an unsafe condition. This is the
    /// safety interlock working as intended, not a bug: no report may be
    /// published this cycle.
    #[error("ripcord is true")]
    RipcordTripped,
    /// Reconciliation was attempted with zero observations.
    #[error("no reserve observations to reconcile")]
    NoObservations,
}

impl ErrorCode for EvidenceError {
    fn code(&self) -> &'static str {
        match self {
            Self::ChainQuery { .. } => "EVIDENCE_CHAIN_QUERY_FAILED",
            Self::EmptyResult { .. } => "EVIDENCE_EMPTY_RESULT",
            Self::HttpTransport(_) => "EVIDENCE_HTTP_TRANSPORT",
            Self::HttpStatus { .. } => "EVIDENCE_HTTP_STATUS",
            Self::MalformedResponse(_) => "EVIDENCE_MALFORMED_RESPONSE",
            Self::RipcordTripped => "EVIDENCE_RIPCORD_TRIPPED",
            Self::NoObservations => "EVIDENCE_NO_OBSERVATIONS",
        }
    }
}

/// Errors raised while scaling and encoding the reconciled report.
///
/// The encoder range-checks instead of truncating: a value that does not fit
/// its wire field fails the run loudly.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The reconciled timestamp does not fit the report's unsigned 32-bit
    /// timestamp field.
    #[error("report timestamp {seconds} does not fit in 32 bits")]
    TimestampOutOfRange {
        /// The out-of-range unix timestamp, in seconds.
        seconds: i64,
    },
    /// The scaled price does not fit the report's 224-bit price field.
    #[error("scaled price {price} does not fit in 224 bits")]
    PriceOutOfRange {
        /// The out-of-range scaled price, decimal-rendered.
        price: String,
    },
    /// The reserve figure cannot be scaled to 18 decimals (negative, or too
    /// large for the fixed-point range).
    #[error("reserve amount {amount} cannot be scaled to 18 decimals")]
    ReserveOutOfRange {
        /// The offending reserve amount, decimal-rendered.
        amount: String,
    },
}

impl ErrorCode for EncodeError {
    fn code(&self) -> &'static str {
        match self {
            Self::TimestampOutOfRange { .. } => "REPORT_TIMESTAMP_RANGE",
            Self::PriceOutOfRange { .. } => "REPORT_PRICE_RANGE",
            Self::ReserveOutOfRange { .. } => "REPORT_RESERVE_RANGE",
        }
    }
}

/// Errors raised on the signing and write path.
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// The signing collaborator failed to produce a report envelope.
    #[error("failed to generate report: {0}")]
    Signing(String),
    /// The write transaction did not report success. Carries the chain's own
    /// error message when one was provided, otherwise the raw status.
    #[error("failed to write report: {message}")]
    Failed {
        /// The terminal transaction status, rendered.
        status: String,
        /// The chain's error message, or the status when none was present.
        message: String,
    },
}

impl ErrorCode for SubmissionError {
    fn code(&self) -> &'static str {
        match self {
            Self::Signing(_) => "SUBMIT_SIGNING_FAILED",
            Self::Failed { .. } => "SUBMIT_WRITE_FAILED",
        }
    }
}

/// The run-level error: any sub-step failure aborts the entire run with one
/// of these. There is no local recovery or partial-result fallback anywhere
/// in the pipeline.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Configuration validation or parsing failed.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Evidence collection failed (on-chain or off-chain).
    #[error(transparent)]
    Evidence(#[from] EvidenceError),
    /// Report scaling or encoding failed.
    #[error(transparent)]
    Encode(#[from] EncodeError),
    /// Report signing or submission failed.
    #[error(transparent)]
    Submission(#[from] SubmissionError),
}

impl ErrorCode for WorkflowError {
    fn code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.code(),
            Self::Evidence(e) => e.code(),
            Self::Encode(e) => e.code(),
            Self::Submission(e) => e.code(),
        }
    }
}
