//! # Recording Fee Transfer
//!
//! Fee transfer adapter that keeps an ordered record of every accepted
//! transfer. Balances are optional: a principal without a configured balance
//! can always pay.

use crate::errors::TransferError;
use crate::domain::value_objects::Principal;
use crate::ports::outbound::FeeTransfer;
use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One accepted fee transfer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeTransferRecord {
    /// Amount moved.
    pub amount: u64,
    /// Payer.
    pub from: Principal,
    /// Recipient (the authority contract).
    pub to: Principal,
}

#[derive(Debug, Default)]
struct FeeLedgerState {
    records: Vec<FeeTransferRecord>,
    balances: HashMap<Principal, u64>,
    halted: Option<String>,
}

/// In-memory fee transfer with a transfer log.
#[derive(Debug, Default)]
pub struct RecordingFeeTransfer {
    state: RwLock<FeeLedgerState>,
}

impl RecordingFeeTransfer {
    /// Create a transfer adapter with no balances and an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the balance of a principal. Principals with a balance are debited
    /// and the recipient is credited when it also has one.
    pub fn set_balance(&self, principal: Principal, amount: u64) {
        self.state.write().balances.insert(principal, amount);
    }

    /// Balance of a principal, if tracked.
    #[must_use]
    pub fn balance_of(&self, principal: &Principal) -> Option<u64> {
        self.state.read().balances.get(principal).copied()
    }

    /// Reject every subsequent transfer with `reason`.
    pub fn halt(&self, reason: impl Into<String>) {
        self.state.write().halted = Some(reason.into());
    }

    /// Accept transfers again.
    pub fn resume(&self) {
        self.state.write().halted = None;
    }

    /// Accepted transfers, oldest first.
    #[must_use]
    pub fn transfers(&self) -> Vec<FeeTransferRecord> {
        self.state.read().records.clone()
    }

    /// Sum of all accepted transfers.
    #[must_use]
    pub fn total_collected(&self) -> u64 {
        self.state
            .read()
            .records
            .iter()
            .map(|r| r.amount)
            .fold(0u64, u64::saturating_add)
    }
}

#[async_trait]
impl FeeTransfer for RecordingFeeTransfer {
    async fn transfer(
        &self,
        amount: u64,
        from: &Principal,
        to: &Principal,
    ) -> Result<(), TransferError> {
        let mut state = self.state.write();

        if let Some(reason) = &state.halted {
            return Err(TransferError::Rejected(reason.clone()));
        }

        if let Some(available) = state.balances.get(from).copied() {
            if available < amount {
                return Err(TransferError::InsufficientFunds {
                    required: amount,
                    available,
                });
            }
            state.balances.insert(from.clone(), available - amount);
            if let Some(credit) = state.balances.get_mut(to) {
                *credit = credit.saturating_add(amount);
            }
        }

        state.records.push(FeeTransferRecord {
            amount,
            from: from.clone(),
            to: to.clone(),
        });
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
