//! Error Types for the ETHPool ledger
//!
//! Typed errors give callers the exact reason a transition was refused.
//! A failed call never leaves partial state behind, so every variant
//! describes a rejected request rather than a damaged ledger.

use core::fmt;

use crate::types::Address;

/// Result type alias for pool operations
pub type PoolResult<T> = Result<T, PoolError>;

/// Main error enum for all pool errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    // ============ Authorization Errors ============
    /// Caller is not the owner or lacks the reward-depositor role
    Unauthorized { expected: Address, actual: Address },

    /// Address is not acceptable for the requested role
    InvalidAddress { reason: &'static str },

    // ============ Amount Errors ============
    /// Amount is zero, below the minimum, or rounds to no shares
    InvalidAmount { amount: u64, reason: AmountErrorReason },

    // ============ Pool Errors ============
    /// Caller holds no position
    NothingToWithdraw { depositor: Address },

    /// Reward offered while no position is outstanding
    EmptyPool,

    /// Environment could not deliver the payout
    TransferFailed { to: Address, amount: u64 },

    // ============ Math Errors ============
    /// Arithmetic overflow occurred
    Overflow,

    /// Arithmetic underflow occurred
    Underflow,

    /// Division by zero
    DivisionByZero,

    // ============ State Errors ============
    /// Restored state violates a ledger invariant
    CorruptState { reason: &'static str },
}

/// Reasons for amount-related errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountErrorReason {
    /// Amount is zero when non-zero required
    Zero,
    /// Amount below the configured minimum, or too small to mint a share
    TooSmall,
    /// Amount does not fit the ledger's integer range
    TooLarge,
}

impl PoolError {
    /// Returns a stable error code for logging/debugging
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unauthorized { .. } => "E020_UNAUTHORIZED",
            Self::InvalidAddress { .. } => "E021_INVALID_ADDRESS",
            Self::InvalidAmount { .. } => "E010_INVALID_AMOUNT",
            Self::NothingToWithdraw { .. } => "E050_NOTHING_TO_WITHDRAW",
            Self::EmptyPool => "E051_EMPTY_POOL",
            Self::TransferFailed { .. } => "E070_TRANSFER_FAILED",
            Self::Overflow => "E080_OVERFLOW",
            Self::Underflow => "E081_UNDERFLOW",
            Self::DivisionByZero => "E082_DIV_ZERO",
            Self::CorruptState { .. } => "E101_CORRUPT_STATE",
        }
    }

    /// Returns true if the caller can fix the request and try again
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::InvalidAmount { .. } => true, // Deposit more
            Self::TransferFailed { .. } => true, // Retry once the environment recovers
            Self::EmptyPool => true,             // Wait for a depositor
            _ => false,
        }
    }
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthorized { .. } => write!(f, "{}: caller is not authorized", self.code()),
            Self::InvalidAddress { reason } => write!(f, "{}: {}", self.code(), reason),
            Self::InvalidAmount { amount, reason } => {
                write!(f, "{}: amount {} rejected ({:?})", self.code(), amount, reason)
            }
            Self::NothingToWithdraw { .. } => write!(f, "{}: no position to withdraw", self.code()),
            Self::EmptyPool => write!(f, "{}: no outstanding positions", self.code()),
            Self::TransferFailed { amount, .. } => {
                write!(f, "{}: transfer of {} failed", self.code(), amount)
            }
            Self::CorruptState { reason } => write!(f, "{}: {}", self.code(), reason),
            Self::Overflow | Self::Underflow | Self::DivisionByZero => f.write_str(self.code()),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PoolError {}
