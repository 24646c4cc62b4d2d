// Path: crates/node/src/main.rs

//! Operator entry point: one attestation run per invocation.
//!
//! The external scheduler invokes this binary on the configured cadence;
//! the process runs exactly one pipeline and exits. Success prints the
//! committed transaction hash to stdout; any abort exits non-zero with the
//! failure logged.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use por_api::http::NodeHttp;
use por_node::{DirectNodeHttp, RuntimeGateway};
use por_types::{ErrorCode, RunConfig};
use por_workflow::{run_attestation, WorkflowDeps};
use std::path::PathBuf;
use std::sync::Arc;

/// Options for the operator binary.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct NodeOpts {
    /// Path to the run configuration (JSON).
    #[arg(long, env = "POR_CONFIG")]
    config: PathBuf,

    /// Base URL of the oracle runtime gateway.
    #[arg(long, env = "POR_GATEWAY_URL", default_value = "http://127.0.0.1:8550")]
    gateway_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    por_telemetry::init_tracing()?;
    let opts = NodeOpts::parse();

    let raw = std::fs::read(&opts.config)
        .with_context(|| format!("reading config {:?}", opts.config))?;
    let config = RunConfig::from_json_slice(&raw)?;

    let gateway = Arc::new(RuntimeGateway::new(opts.gateway_url));
    let deps = WorkflowDeps {
        chain_reader: gateway.clone(),
        chain_writer: gateway.clone(),
        nodes: vec![Arc::new(DirectNodeHttp::new()) as Arc<dyn NodeHttp>],
        signer: gateway,
    };

    match run_attestation(&config, &deps).await {
        Ok(result) => {
            println!("{}", result.tx_hash_hex());
            Ok(())
        }
        Err(err) => {
            tracing::error!(code = err.code(), error = %err, "attestation run failed");
            Err(anyhow!("attestation run failed: {err}"))
        }
    }
}
