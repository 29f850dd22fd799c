//! # Command Handler Adapter
//!
//! Decodes [`CommandEnvelope`]s, dispatches them to a [`RegistrationApi`], and
//! builds one [`CommandResponse`] per envelope.
//!
//! - Wire-level conversions happen here: a negative `new_fee` becomes
//!   `InvalidFee`, a negative `new_max` becomes `InvalidMaxRegistrations`
//! - The response always echoes the envelope's `correlation_id`
//! - Undecodable input is answered with code 0 and a nil correlation id

use crate::errors::RegistrationError;
use crate::events::{
    CommandEnvelope, CommandOutcome, CommandResponse, ErrorPayload, LedgerCommand, LedgerReply,
};
use crate::ports::inbound::RegistrationApi;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

/// Dispatches ledger commands to the registration API.
pub struct LedgerCommandHandler<T: RegistrationApi> {
    api: Arc<T>,
}

impl<T: RegistrationApi> LedgerCommandHandler<T> {
    /// Create a handler over `api`.
    pub fn new(api: Arc<T>) -> Self {
        Self { api }
    }

    /// The wrapped API.
    #[must_use]
    pub fn api(&self) -> &Arc<T> {
        &self.api
    }

    /// Handle one decoded envelope.
    pub async fn handle(&self, envelope: CommandEnvelope) -> CommandResponse {
        let CommandEnvelope {
            correlation_id,
            command,
        } = envelope;
        let op = command.name();

        let result = self.dispatch(command).await;
        if let Err(err) = &result {
            debug!(%correlation_id, op, code = err.code(), "command rejected");
        }

        CommandResponse {
            correlation_id,
            outcome: CommandOutcome::from(result),
        }
    }

    /// Handle one JSON-encoded envelope.
    pub async fn handle_line(&self, line: &str) -> CommandResponse {
        match serde_json::from_str::<CommandEnvelope>(line) {
            Ok(envelope) => self.handle(envelope).await,
            Err(err) => {
                warn!(error = %err, "malformed command");
                CommandResponse {
                    correlation_id: Uuid::nil(),
                    outcome: CommandOutcome::Err(ErrorPayload::malformed(err.to_string())),
                }
            }
        }
    }

    /// Execute a command against the API.
    pub async fn dispatch(&self, command: LedgerCommand) -> Result<LedgerReply, RegistrationError> {
        match command {
            LedgerCommand::SetAuthorityContract { caller, authority } => {
                self.api.set_authority_contract(&caller, authority).await?;
                Ok(LedgerReply::Done)
            }
            LedgerCommand::SetMaxRegistrations { caller, new_max } => {
                let new_max =
                    u64::try_from(new_max).map_err(|_| RegistrationError::InvalidMaxRegistrations)?;
                self.api.set_max_registrations(&caller, new_max).await?;
                Ok(LedgerReply::Done)
            }
            LedgerCommand::SetRegistrationFee { caller, new_fee } => {
                let new_fee = u64::try_from(new_fee).map_err(|_| RegistrationError::InvalidFee)?;
                self.api.set_registration_fee(&caller, new_fee).await?;
                Ok(LedgerReply::Done)
            }
            LedgerCommand::RegisterVoter { caller, request } => self
                .api
                .register_voter(&caller, request)
                .await
                .map(LedgerReply::Registered),
            LedgerCommand::UpdateRegistration {
                caller,
                user_id,
                jurisdiction_id,
                new_title,
                new_description,
            } => {
                self.api
                    .update_registration(
                        &caller,
                        &user_id,
                        &jurisdiction_id,
                        new_title,
                        new_description,
                    )
                    .await?;
                Ok(LedgerReply::Done)
            }
            LedgerCommand::UpdateRegistrationStatus {
                caller,
                user_id,
                jurisdiction_id,
                new_status,
            } => {
                self.api
                    .update_registration_status(&caller, &user_id, &jurisdiction_id, &new_status)
                    .await?;
                Ok(LedgerReply::Done)
            }
            LedgerCommand::GetRegistration {
                user_id,
                jurisdiction_id,
            } => Ok(LedgerReply::Registration(
                self.api.get_registration(&user_id, &jurisdiction_id).await,
            )),
            LedgerCommand::GetRegistrationUpdate {
                user_id,
                jurisdiction_id,
            } => Ok(LedgerReply::Update(
                self.api
                    .get_registration_update(&user_id, &jurisdiction_id)
                    .await,
            )),
            LedgerCommand::GetRegistrationCount => {
                Ok(LedgerReply::Count(self.api.get_registration_count().await))
            }
            LedgerCommand::GetJurisdictionRegCount { jurisdiction_id } => Ok(LedgerReply::Count(
                self.api.get_jurisdiction_reg_count(&jurisdiction_id).await,
            )),
            LedgerCommand::GetSettings => Ok(LedgerReply::Settings(self.api.get_settings().await)),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
