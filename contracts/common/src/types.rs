//! Core Types for the ETHPool ledger
//!
//! Identities, aggregate pool state and the action vocabulary shared by
//! the ledger and whatever transport wraps it.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// Type alias for identities (32-byte authenticated actor reference)
pub type Address = [u8; 32];

// ============ Pool Types ============

/// Aggregate pool totals
///
/// `total_shares` is the sum of every outstanding position. `pool_balance`
/// is the value backing those shares, deposits plus rewards minus payouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct PoolTotals {
    /// Sum of all recorded positions
    pub total_shares: u64,
    /// Redeemable value held by the pool
    pub pool_balance: u64,
}

impl PoolTotals {
    /// Creates empty totals
    pub fn new() -> Self {
        Self::default()
    }

    /// True when nobody holds a position
    pub fn is_empty(&self) -> bool {
        self.total_shares == 0
    }
}

/// Ledger configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct PoolConfig {
    /// Smallest deposit accepted, in base units (never zero)
    pub min_deposit: u64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            min_deposit: crate::constants::pool::MIN_DEPOSIT,
        }
    }
}

// ============ Action Types ============

/// Actions accepted by the share ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub enum PoolAction {
    /// Add value and receive shares at the current price
    Deposit { amount: u64 },
    /// Add value without receiving shares (reward-depositors only)
    DepositRewards { amount: u64 },
    /// Redeem the caller's whole position
    Withdraw,
    /// Give an address the reward-depositor role (owner only)
    GrantRewardRole { account: Address },
    /// Take the reward-depositor role from an address (owner only)
    RevokeRewardRole { account: Address },
    /// Hand ownership to another address (owner only)
    TransferOwnership { new_owner: Address },
}

/// Successful result of a [`PoolAction`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub enum PoolOutcome {
    /// Deposit accepted, `shares` minted to the caller
    Deposited { shares: u64 },
    /// Reward folded into the pool balance
    RewardAccepted { pool_balance: u64 },
    /// Position redeemed, `payout` handed to the transfer hook
    Withdrawn { payout: u64 },
    /// Role call succeeded; `changed` is false for an idempotent no-op
    RoleUpdated { changed: bool },
    /// Ownership moved
    OwnershipTransferred,
}
