// Path: crates/workflow/src/tests/mod.rs

//! End-to-end pipeline tests over programmable boundary mocks.

use crate::{encode, run_attestation, submit, WorkflowDeps};
use alloy_primitives::{Address, B256, U256};
use por_api::chain::{BlockSelector, TxStatus, WriteReportReceipt};
use por_api::http::NodeHttp;
use por_test_utils::{reserve_body, MockChain, MockNodeHttp, MockSigner, RecordedCall};
use por_types::config::RunConfig;
use por_types::error::{ConfigError, EvidenceError, SubmissionError, WorkflowError};
use por_types::report::{FeedId, ReconciledPrice};
use std::str::FromStr;
use std::sync::Arc;

const WORD: usize = 32;

fn test_config() -> RunConfig {
    RunConfig {
        schedule: "0 */6 * * *".into(),
        url: "https://por.example/reserve".into(),
        balance_reader_address: "0xbeef000000000000000000000000000000000000".into(),
        address_one: "0x1111000000000000000000000000000000000000".into(),
        address_two: "0x2222000000000000000000000000000000000000".into(),
        data_feeds_cache_address: "0xcafe000000000000000000000000000000000000".into(),
        feed_id: "0xfeed".into(),
    }
}

/// ABI return data for a `uint256[]` result.
fn balance_return_data(balances: &[U256]) -> Vec<u8> {
    let mut data = U256::from(WORD).to_be_bytes::<WORD>().to_vec();
    data.extend_from_slice(&U256::from(balances.len()).to_be_bytes::<WORD>());
    for balance in balances {
        data.extend_from_slice(&balance.to_be_bytes::<WORD>());
    }
    data
}

struct Harness {
    chain: Arc<MockChain>,
    nodes: Vec<Arc<MockNodeHttp>>,
    signer: Arc<MockSigner>,
}

impl Harness {
    /// A harness wired for the reference scenario: 1 and 2 native units
    /// on chain, two nodes declaring 100.0 and 102.0 a minute apart, and a
    /// write path that succeeds.
    fn happy() -> Self {
        let chain = Arc::new(MockChain::new());
        chain.set_balance(
            Address::from_str("0x1111000000000000000000000000000000000000").unwrap(),
            U256::from_str_radix("1000000000000000000", 10).unwrap(),
        );
        chain.set_call_result(
            BlockSelector::Finalized,
            balance_return_data(&[U256::from_str_radix("2000000000000000000", 10).unwrap()]),
        );
        chain.succeed_writes(B256::from([0xab; 32]));
        Self {
            chain,
            nodes: vec![
                Arc::new(MockNodeHttp::with_json(&reserve_body(
                    100.0,
                    false,
                    "2024-01-01T00:00:00Z",
                ))),
                Arc::new(MockNodeHttp::with_json(&reserve_body(
                    102.0,
                    false,
                    "2024-01-01T00:01:00Z",
                ))),
            ],
            signer: Arc::new(MockSigner::new()),
        }
    }

    fn deps(&self) -> WorkflowDeps {
        WorkflowDeps {
            chain_reader: self.chain.clone(),
            chain_writer: self.chain.clone(),
            nodes: self
                .nodes
                .iter()
                .map(|n| n.clone() as Arc<dyn NodeHttp>)
                .collect(),
            signer: self.signer.clone(),
        }
    }
}

#[tokio::test]
async fn the_reference_scenario_commits_the_expected_report() {
    let harness = Harness::happy();
    let result = run_attestation(&test_config(), &harness.deps()).await.unwrap();

    assert_eq!(result.tx_hash_hex(), format!("0x{}", "ab".repeat(32)));

    // The signed payload is the canonical encoding of the reconciled report:
    // median timestamp of the two updates, 101.0 scaled to 18 decimals.
    let expected = encode::encode_reports(&[ReconciledPrice {
        feed_id: FeedId::parse("0xfeed").unwrap(),
        timestamp: 1_704_067_230,
        price: U256::from_str_radix("101000000000000000000", 10).unwrap(),
    }])
    .unwrap();
    let signed = harness.signer.signed();
    assert_eq!(signed.len(), 1);
    assert_eq!(signed[0].0, expected.as_bytes());
    assert_eq!(signed[0].1.encoder_name, "evm");
    assert_eq!(signed[0].1.signing_algo, "ecdsa");
    assert_eq!(signed[0].1.hashing_algo, "keccak256");

    // Exactly one write, to the configured receiver, with the fixed budget.
    let writes: Vec<_> = harness
        .chain
        .recorded()
        .into_iter()
        .filter_map(|c| match c {
            RecordedCall::WriteReport {
                receiver,
                gas_limit,
                ..
            } => Some((receiver, gas_limit)),
            _ => None,
        })
        .collect();
    assert_eq!(
        writes,
        vec![(
            Address::from_str("0xcafe000000000000000000000000000000000000").unwrap(),
            submit::REPORT_GAS_LIMIT,
        )]
    );

    // Each node was consulted exactly once, with the configured URL.
    for node in &harness.nodes {
        assert_eq!(node.requests(), vec!["https://por.example/reserve"]);
    }
}

#[tokio::test]
async fn blank_config_fields_abort_before_any_boundary_call() {
    let fields: [fn(&mut RunConfig); 7] = [
        |c| c.schedule = "  ".into(),
        |c| c.url = String::new(),
        |c| c.balance_reader_address = "\t".into(),
        |c| c.address_one = String::new(),
        |c| c.address_two = " ".into(),
        |c| c.data_feeds_cache_address = String::new(),
        |c| c.feed_id = "  ".into(),
    ];
    for blank in fields {
        let harness = Harness::happy();
        let mut config = test_config();
        blank(&mut config);

        let err = run_attestation(&config, &harness.deps()).await.unwrap_err();
        assert!(matches!(
            err,
            WorkflowError::Config(ConfigError::Missing { .. })
        ));
        assert!(harness.chain.recorded().is_empty());
        assert_eq!(harness.signer.sign_count(), 0);
        for node in &harness.nodes {
            assert!(node.requests().is_empty());
        }
    }
}

#[tokio::test]
async fn a_malformed_address_aborts_before_any_boundary_call() {
    let harness = Harness::happy();
    let mut config = test_config();
    config.address_two = "0x123".into();

    let err = run_attestation(&config, &harness.deps()).await.unwrap_err();
    match err {
        WorkflowError::Config(ConfigError::Invalid { field, .. }) => {
            assert_eq!(field, "address_two")
        }
        other => panic!("expected Invalid, got {other:?}"),
    }
    assert!(harness.chain.recorded().is_empty());
}

#[tokio::test]
async fn a_tripped_ripcord_halts_the_run_before_any_report_work() {
    let mut harness = Harness::happy();
    harness.nodes[1] = Arc::new(MockNodeHttp::with_json(&reserve_body(
        250.0,
        true,
        "2024-01-01T00:01:00Z",
    )));

    let err = run_attestation(&test_config(), &harness.deps()).await.unwrap_err();
    assert!(matches!(
        err,
        WorkflowError::Evidence(EvidenceError::RipcordTripped)
    ));
    assert_eq!(harness.signer.sign_count(), 0);
    assert_eq!(harness.chain.write_count(), 0);
}

#[tokio::test]
async fn a_non_200_status_aborts_the_run() {
    let mut harness = Harness::happy();
    harness.nodes[0] = Arc::new(MockNodeHttp::with_response(503, Vec::new()));

    let err = run_attestation(&test_config(), &harness.deps()).await.unwrap_err();
    assert!(matches!(
        err,
        WorkflowError::Evidence(EvidenceError::HttpStatus { status: 503 })
    ));
    assert_eq!(harness.chain.write_count(), 0);
}

#[tokio::test]
async fn an_unparsable_body_aborts_the_run() {
    let mut harness = Harness::happy();
    harness.nodes[0] = Arc::new(MockNodeHttp::with_response(200, b"not json".to_vec()));

    let err = run_attestation(&test_config(), &harness.deps()).await.unwrap_err();
    assert!(matches!(
        err,
        WorkflowError::Evidence(EvidenceError::MalformedResponse(_))
    ));
}

#[tokio::test]
async fn an_unreachable_source_aborts_the_run() {
    let mut harness = Harness::happy();
    harness.nodes[1] = Arc::new(MockNodeHttp::with_transport_error("connection refused"));

    let err = run_attestation(&test_config(), &harness.deps()).await.unwrap_err();
    assert!(matches!(
        err,
        WorkflowError::Evidence(EvidenceError::HttpTransport(_))
    ));
}

#[tokio::test]
async fn a_failed_balance_query_aborts_the_run() {
    let harness = Harness::happy();
    harness.chain.fail_balance_queries("rpc timeout");

    let err = run_attestation(&test_config(), &harness.deps()).await.unwrap_err();
    match err {
        WorkflowError::Evidence(EvidenceError::ChainQuery { address, reason: source }) => {
            assert!(address.starts_with("0x1111"));
            assert!(source.contains("rpc timeout"));
        }
        other => panic!("expected ChainQuery, got {other:?}"),
    }
    // The off-chain sources were never consulted.
    for node in &harness.nodes {
        assert!(node.requests().is_empty());
    }
}

#[tokio::test]
async fn an_empty_contract_result_aborts_the_run() {
    let harness = Harness::happy();
    harness
        .chain
        .set_call_result(BlockSelector::Finalized, balance_return_data(&[]));

    let err = run_attestation(&test_config(), &harness.deps()).await.unwrap_err();
    assert!(matches!(
        err,
        WorkflowError::Evidence(EvidenceError::EmptyResult { .. })
    ));
}

#[tokio::test]
async fn contract_reads_are_pinned_to_the_finalized_block() {
    let harness = Harness::happy();
    // A diverging chain tip must not be observable: the finalized view is
    // what the collector reads.
    harness.chain.set_call_result(
        BlockSelector::Latest,
        balance_return_data(&[U256::from(999u64)]),
    );

    run_attestation(&test_config(), &harness.deps()).await.unwrap();
    run_attestation(&test_config(), &harness.deps()).await.unwrap();

    let contract_calls: Vec<_> = harness
        .chain
        .recorded()
        .into_iter()
        .filter_map(|c| match c {
            RecordedCall::CallContract { block, data, .. } => Some((block, data)),
            _ => None,
        })
        .collect();
    assert_eq!(contract_calls.len(), 2);
    assert!(contract_calls
        .iter()
        .all(|(block, _)| *block == BlockSelector::Finalized));
    // Same finalized block, same calldata; and the two regenerated reports
    // agree byte for byte.
    assert_eq!(contract_calls[0], contract_calls[1]);
    let signed = harness.signer.signed();
    assert_eq!(signed.len(), 2);
    assert_eq!(signed[0].0, signed[1].0);
}

#[tokio::test]
async fn a_reverted_write_surfaces_the_chain_message() {
    let harness = Harness::happy();
    harness.chain.set_write_receipt(WriteReportReceipt {
        tx_status: TxStatus::Reverted,
        tx_hash: Some(B256::from([0x01; 32])),
        error_message: Some("stale report".into()),
    });

    let err = run_attestation(&test_config(), &harness.deps()).await.unwrap_err();
    match err {
        WorkflowError::Submission(SubmissionError::Failed { status, message }) => {
            assert_eq!(status, "reverted");
            assert_eq!(message, "stale report");
        }
        other => panic!("expected Failed, got {other:?}"),
    }
}

#[tokio::test]
async fn a_failed_write_without_a_message_reports_the_status() {
    let harness = Harness::happy();
    harness.chain.set_write_receipt(WriteReportReceipt {
        tx_status: TxStatus::Fatal,
        tx_hash: None,
        error_message: None,
    });

    let err = run_attestation(&test_config(), &harness.deps()).await.unwrap_err();
    match err {
        WorkflowError::Submission(SubmissionError::Failed { status, message }) => {
            assert_eq!(status, "fatal");
            assert_eq!(message, "fatal");
        }
        other => panic!("expected Failed, got {other:?}"),
    }
}

#[tokio::test]
async fn a_signing_failure_prevents_the_write() {
    let harness = Harness::happy();
    harness.signer.fail_with("quorum not reached");

    let err = run_attestation(&test_config(), &harness.deps()).await.unwrap_err();
    assert!(matches!(
        err,
        WorkflowError::Submission(SubmissionError::Signing(_))
    ));
    assert_eq!(harness.chain.write_count(), 0);
}

#[tokio::test]
async fn a_single_node_runs_end_to_end() {
    let mut harness = Harness::happy();
    harness.nodes = vec![Arc::new(MockNodeHttp::with_json(&reserve_body(
        100.5,
        false,
        "2024-01-01T00:00:00Z",
    )))];

    let result = run_attestation(&test_config(), &harness.deps()).await.unwrap();
    assert_eq!(result.tx_hash_hex(), format!("0x{}", "ab".repeat(32)));

    let expected = encode::encode_reports(&[ReconciledPrice {
        feed_id: FeedId::parse("0xfeed").unwrap(),
        timestamp: 1_704_067_200,
        price: U256::from_str_radix("100500000000000000000", 10).unwrap(),
    }])
    .unwrap();
    assert_eq!(harness.signer.signed()[0].0, expected.as_bytes());
}

#[tokio::test]
async fn zero_participating_nodes_is_an_error() {
    let mut harness = Harness::happy();
    harness.nodes = Vec::new();

    let err = run_attestation(&test_config(), &harness.deps()).await.unwrap_err();
    assert!(matches!(
        err,
        WorkflowError::Evidence(EvidenceError::NoObservations)
    ));
    assert_eq!(harness.chain.write_count(), 0);
}
