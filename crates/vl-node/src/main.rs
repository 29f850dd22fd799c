//! # Voter-Ledger Node Binary
//!
//! Reads newline-delimited `CommandEnvelope` JSON on stdin and writes one
//! `CommandResponse` JSON line per command on stdout. Logs go to stderr.

use anyhow::{Context, Result};
use tokio::io::{stdin, stdout, BufReader};
use tracing::{info, warn};
use vl_node::{GenesisConfig, LedgerNode, NodeConfig};
use vl_telemetry::{encode_metrics, init_telemetry, TelemetryConfig};

/// Load genesis from the configured path, or fall back to devnet.
fn load_genesis(config: &NodeConfig) -> Result<GenesisConfig> {
    match &config.genesis_path {
        Some(path) => {
            let genesis = GenesisConfig::load(path)
                .with_context(|| format!("loading genesis from {}", path.display()))?;
            info!(path = %path.display(), "genesis loaded");
            Ok(genesis)
        }
        None => {
            warn!("VL_GENESIS_PATH not set, using devnet genesis");
            Ok(GenesisConfig::devnet())
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let _telemetry =
        init_telemetry(TelemetryConfig::from_env()).context("initializing telemetry")?;

    info!(version = vl_registration::VERSION, "starting {}", vl_registration::SUBSYSTEM_NAME);

    // Load configuration
    let config = NodeConfig::from_env();
    let genesis = load_genesis(&config)?;

    let node = LedgerNode::build(&config, &genesis)
        .await
        .context("building ledger node")?;

    let summary = node.run(BufReader::new(stdin()), stdout()).await?;
    info!(
        processed = summary.processed,
        failed = summary.failed,
        "node stopped"
    );

    if config.dump_metrics {
        eprintln!("{}", encode_metrics().context("encoding metrics")?);
    }

    Ok(())
}
