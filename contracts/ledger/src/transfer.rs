//! Outbound value transfer
//!
//! The ledger decides how much is owed; the host moves the funds. A
//! withdrawal calls the hook before committing, and a hook failure aborts
//! the withdrawal with the ledger untouched.

use ethpool_common::{types::Address, Vec};

/// Reason the host could not deliver a payout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferError {
    pub reason: &'static str,
}

impl TransferError {
    pub const fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// Host hook that delivers payouts
pub trait ValueTransfer {
    /// Send `amount` base units to `to`
    fn transfer(&mut self, to: &Address, amount: u64) -> Result<(), TransferError>;
}

impl<F> ValueTransfer for F
where
    F: FnMut(&Address, u64) -> Result<(), TransferError>,
{
    fn transfer(&mut self, to: &Address, amount: u64) -> Result<(), TransferError> {
        self(to, amount)
    }
}

/// In-memory hook that records every delivered payout
///
/// Can be told to refuse transfers, which lets hosts rehearse the abort
/// path.
#[derive(Debug, Clone, Default)]
pub struct RecordingTransfer {
    sent: Vec<(Address, u64)>,
    refuse: bool,
}

impl RecordingTransfer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hook that refuses every transfer
    pub fn refusing() -> Self {
        Self {
            sent: Vec::new(),
            refuse: true,
        }
    }

    /// Toggle refusal
    pub fn set_refuse(&mut self, refuse: bool) {
        self.refuse = refuse;
    }

    /// Delivered payouts in order
    pub fn sent(&self) -> &[(Address, u64)] {
        &self.sent
    }

    /// Sum of everything delivered to `to`
    pub fn total_to(&self, to: &Address) -> u64 {
        self.sent
            .iter()
            .filter(|(recipient, _)| recipient == to)
            .map(|(_, amount)| *amount)
            .sum()
    }
}

impl ValueTransfer for RecordingTransfer {
    fn transfer(&mut self, to: &Address, amount: u64) -> Result<(), TransferError> {
        if self.refuse {
            return Err(TransferError::new("transfer refused by host"));
        }
        self.sent.push((*to, amount));
        Ok(())
    }
}
