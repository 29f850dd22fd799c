//! # Ledger Node Runtime
//!
//! Wires the registration service to in-memory collaborators and runs the
//! line-oriented command loop.
//!
//! ## Loop Semantics
//!
//! - One JSON envelope per line; blank lines are skipped
//! - Each command executes at the current block height, after which the
//!   clock advances by one
//! - Exactly one JSON response line is written per non-blank input line
//! - Undecodable lines are answered with code 0 and the loop continues

use crate::config::NodeConfig;
use crate::genesis::{GenesisConfig, GenesisError};
use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};
use vl_registration::prelude::*;

/// Totals for one run of the command loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Lines answered.
    pub processed: u64,
    /// Lines answered with an error.
    pub failed: u64,
}

/// A running ledger node.
pub struct LedgerNode {
    handler: LedgerCommandHandler<RegistrationService>,
    collaborators: InMemoryCollaborators,
}

impl LedgerNode {
    /// Build a node from configuration and genesis.
    ///
    /// Environment overrides in `config` take precedence over genesis settings.
    pub async fn build(config: &NodeConfig, genesis: &GenesisConfig) -> Result<Self, GenesisError> {
        let collaborators = InMemoryCollaborators::new();
        genesis.seed(&collaborators);
        collaborators.clock.set(config.start_height);

        let mut settings = genesis.settings();
        if let Some(max) = config.max_registrations {
            settings.max_registrations = max;
        }
        if let Some(fee) = config.registration_fee {
            settings.registration_fee = fee;
        }

        let service = RegistrationService::with_settings(collaborators.as_collaborators(), settings);
        genesis.bootstrap(&service).await?;

        let settings = service.get_settings().await;
        info!(
            max_registrations = settings.max_registrations,
            registration_fee = settings.registration_fee,
            authority = ?settings.authority_contract,
            start_height = config.start_height,
            "ledger node ready"
        );

        Ok(Self {
            handler: LedgerCommandHandler::new(Arc::new(service)),
            collaborators,
        })
    }

    /// The command handler.
    #[must_use]
    pub fn handler(&self) -> &LedgerCommandHandler<RegistrationService> {
        &self.handler
    }

    /// The collaborator tables.
    #[must_use]
    pub fn collaborators(&self) -> &InMemoryCollaborators {
        &self.collaborators
    }

    /// Handle one input line and advance the clock.
    pub async fn process_line(&self, line: &str) -> CommandResponse {
        let response = self.handler.handle_line(line).await;
        let height = self.collaborators.clock.advance(1);
        debug!(
            correlation_id = %response.correlation_id,
            ok = response.is_ok(),
            next_height = height,
            "command processed"
        );
        response
    }

    /// Serve commands from `reader` until end of input.
    pub async fn run<R, W>(&self, reader: R, mut writer: W) -> Result<RunSummary>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        let mut summary = RunSummary::default();

        while let Some(line) = lines.next_line().await.context("reading command")? {
            if line.trim().is_empty() {
                continue;
            }

            let response = self.process_line(&line).await;
            summary.processed += 1;
            if !response.is_ok() {
                summary.failed += 1;
            }

            let mut encoded =
                serde_json::to_vec(&response).context("encoding response")?;
            encoded.push(b'\n');
            writer
                .write_all(&encoded)
                .await
                .context("writing response")?;
            writer.flush().await.context("flushing response")?;
        }

        info!(
            processed = summary.processed,
            failed = summary.failed,
            "command stream closed"
        );
        Ok(summary)
    }
}
