//! # Command Schema
//!
//! Wire payloads for driving the ledger from outside the process.
//!
//! - Every request is a [`CommandEnvelope`] carrying a `correlation_id`
//! - Every command names its caller explicitly
//! - Every envelope produces exactly one [`CommandResponse`] with the same
//!   `correlation_id`
//!
//! Amounts that the domain keeps unsigned (`new_fee`, `new_max`) are signed on
//! the wire so that a negative value reaches the handler and is rejected with
//! its own error code instead of a decode failure.

use crate::domain::entities::{LedgerSettings, Registration, RegistrationUpdate};
use crate::domain::value_objects::{JurisdictionId, Principal};
use crate::errors::RegistrationError;
use crate::ports::inbound::RegisterVoterRequest;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Error code used for envelopes that could not be decoded.
pub const MALFORMED_COMMAND_CODE: u16 = 0;

// =============================================================================
// INBOUND COMMANDS
// =============================================================================

/// One ledger operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum LedgerCommand {
    /// `set_authority_contract`.
    SetAuthorityContract {
        /// Acting principal.
        caller: Principal,
        /// Principal to install as authority.
        authority: Principal,
    },
    /// `set_max_registrations`.
    SetMaxRegistrations {
        /// Acting principal.
        caller: Principal,
        /// New cap.
        new_max: i64,
    },
    /// `set_registration_fee`.
    SetRegistrationFee {
        /// Acting principal.
        caller: Principal,
        /// New fee.
        new_fee: i64,
    },
    /// `register_voter`.
    RegisterVoter {
        /// Acting principal (pays the fee).
        caller: Principal,
        /// Registration arguments.
        #[serde(flatten)]
        request: RegisterVoterRequest,
    },
    /// `update_registration`.
    UpdateRegistration {
        /// Acting principal.
        caller: Principal,
        /// Registration owner.
        user_id: String,
        /// Registration jurisdiction.
        jurisdiction_id: JurisdictionId,
        /// Replacement title.
        new_title: String,
        /// Replacement description.
        #[serde(default)]
        new_description: String,
    },
    /// `update_registration_status`.
    UpdateRegistrationStatus {
        /// Acting principal.
        caller: Principal,
        /// Registration owner.
        user_id: String,
        /// Registration jurisdiction.
        jurisdiction_id: JurisdictionId,
        /// Status label.
        new_status: String,
    },
    /// `get_registration`.
    GetRegistration {
        /// Registration owner.
        user_id: String,
        /// Registration jurisdiction.
        jurisdiction_id: JurisdictionId,
    },
    /// `get_registration_update`.
    GetRegistrationUpdate {
        /// Registration owner.
        user_id: String,
        /// Registration jurisdiction.
        jurisdiction_id: JurisdictionId,
    },
    /// `get_registration_count`.
    GetRegistrationCount,
    /// `get_jurisdiction_reg_count`.
    GetJurisdictionRegCount {
        /// Jurisdiction to count.
        jurisdiction_id: JurisdictionId,
    },
    /// `get_settings`.
    GetSettings,
}

impl LedgerCommand {
    /// Operation name, as used in the `op` tag.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetAuthorityContract { .. } => "set_authority_contract",
            Self::SetMaxRegistrations { .. } => "set_max_registrations",
            Self::SetRegistrationFee { .. } => "set_registration_fee",
            Self::RegisterVoter { .. } => "register_voter",
            Self::UpdateRegistration { .. } => "update_registration",
            Self::UpdateRegistrationStatus { .. } => "update_registration_status",
            Self::GetRegistration { .. } => "get_registration",
            Self::GetRegistrationUpdate { .. } => "get_registration_update",
            Self::GetRegistrationCount => "get_registration_count",
            Self::GetJurisdictionRegCount { .. } => "get_jurisdiction_reg_count",
            Self::GetSettings => "get_settings",
        }
    }

    /// Returns true for commands that can change ledger state.
    #[must_use]
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Self::SetAuthorityContract { .. }
                | Self::SetMaxRegistrations { .. }
                | Self::SetRegistrationFee { .. }
                | Self::RegisterVoter { .. }
                | Self::UpdateRegistration { .. }
                | Self::UpdateRegistrationStatus { .. }
        )
    }
}

/// A command plus its correlation id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandEnvelope {
    /// Echoed back in the response.
    pub correlation_id: Uuid,
    /// The operation.
    pub command: LedgerCommand,
}

impl CommandEnvelope {
    /// Wrap a command with a fresh correlation id.
    #[must_use]
    pub fn new(command: LedgerCommand) -> Self {
        Self {
            correlation_id: Uuid::new_v4(),
            command,
        }
    }
}

// =============================================================================
// OUTBOUND RESPONSES
// =============================================================================

/// Successful result of a command.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum LedgerReply {
    /// Mutation without a return value.
    Done,
    /// The created registration.
    Registered(Registration),
    /// Result of `get_registration`.
    Registration(Option<Registration>),
    /// Result of `get_registration_update`.
    Update(Option<RegistrationUpdate>),
    /// A counter value.
    Count(u64),
    /// Current settings.
    Settings(LedgerSettings),
}

/// Failed result of a command.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    /// Numeric error code (0 for undecodable input).
    pub code: u16,
    /// snake_case error kind.
    pub kind: String,
    /// Human-readable message.
    pub message: String,
}

impl ErrorPayload {
    /// Payload for input that could not be decoded.
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self {
            code: MALFORMED_COMMAND_CODE,
            kind: "malformed_command".to_string(),
            message: message.into(),
        }
    }
}

impl From<&RegistrationError> for ErrorPayload {
    fn from(err: &RegistrationError) -> Self {
        Self {
            code: err.code(),
            kind: err.kind().to_string(),
            message: err.to_string(),
        }
    }
}

/// Result of a command on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandOutcome {
    /// The command succeeded.
    Ok(LedgerReply),
    /// The command failed; the ledger is unchanged.
    Err(ErrorPayload),
}

impl From<Result<LedgerReply, RegistrationError>> for CommandOutcome {
    fn from(result: Result<LedgerReply, RegistrationError>) -> Self {
        match result {
            Ok(reply) => Self::Ok(reply),
            Err(err) => Self::Err(ErrorPayload::from(&err)),
        }
    }
}

/// Response to one envelope.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandResponse {
    /// Copied from the envelope; nil when the envelope was undecodable.
    pub correlation_id: Uuid,
    /// Outcome.
    pub outcome: CommandOutcome,
}

impl CommandResponse {
    /// Returns the error code, if the command failed.
    #[must_use]
    pub fn error_code(&self) -> Option<u16> {
        match &self.outcome {
            CommandOutcome::Ok(_) => None,
            CommandOutcome::Err(e) => Some(e.code),
        }
    }

    /// Returns true if the command succeeded.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        matches!(self.outcome, CommandOutcome::Ok(_))
    }
}

// =============================================================================
// TESTS
// =============================================================================
