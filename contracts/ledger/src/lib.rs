//! ETHPool Share Ledger
//!
//! Depositors put value into a shared pool and receive shares.
//! Reward-depositors add value without receiving shares, so every share
//! outstanding at that moment becomes worth proportionally more. A
//! withdrawal redeems the caller's whole position at the live price.
//!
//! ## Accounting
//!
//! ```text
//! deposit(a):        shares = a * total_shares / pool_balance   (1:1 when empty)
//! deposit_rewards(r): pool_balance += r                          (members only)
//! withdraw():        payout = pool_balance * shares / total_shares
//! ```
//!
//! Positions deposited after a reward buy in at the raised price and so
//! receive no part of it. Divisions round down, and the last withdrawer
//! holds `total_shares` and receives `pool_balance` exactly.
//!
//! ## Atomicity
//!
//! Every operation computes its new state before touching the ledger.
//! Withdrawals call the host's [`ValueTransfer`] hook before committing,
//! so a refused transfer leaves state and events exactly as they were.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod snapshot;
pub mod transfer;

#[cfg(feature = "std")]
pub mod shared;

#[cfg(test)]
mod integration_tests;

use tracing::{debug, warn};

use ethpool_common::{
    access_control::AccessRegistry,
    constants::address::ZERO,
    errors::{AmountErrorReason, PoolError, PoolResult},
    events::{EventLog, PoolEvent},
    math::{payout_for_shares, safe_add, safe_sub, shares_for_deposit},
    types::{Address, PoolAction, PoolConfig, PoolOutcome, PoolTotals},
    BTreeMap, BTreeSet, Vec,
};

pub use snapshot::LedgerSnapshot;
pub use transfer::{RecordingTransfer, TransferError, ValueTransfer};

#[cfg(feature = "std")]
pub use shared::SharedLedger;

// ============ Share Ledger ============

/// Pool state: registry, positions and totals
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLedger {
    /// Reward-depositor registry
    registry: AccessRegistry,
    /// Non-zero positions by depositor
    positions: BTreeMap<Address, u64>,
    /// Share supply and pool value
    totals: PoolTotals,
    /// Configuration
    config: PoolConfig,
    /// Events of committed transitions, drained by the host
    events: EventLog,
}

impl ShareLedger {
    /// Create an empty ledger owned by `owner`
    ///
    /// The owner starts with the reward-depositor role.
    pub fn new(owner: Address, config: PoolConfig) -> PoolResult<Self> {
        if owner == ZERO {
            return Err(PoolError::InvalidAddress {
                reason: "owner is the zero address",
            });
        }
        if config.min_deposit == 0 {
            return Err(PoolError::InvalidAmount {
                amount: 0,
                reason: AmountErrorReason::Zero,
            });
        }

        let mut events = EventLog::new();
        events.emit(PoolEvent::RoleGranted {
            account: owner,
            sender: owner,
        });

        Ok(Self {
            registry: AccessRegistry::new(owner),
            positions: BTreeMap::new(),
            totals: PoolTotals::new(),
            config,
            events,
        })
    }

    // ============ Operations ============

    /// Route an action to its operation
    pub fn execute<T>(
        &mut self,
        caller: &Address,
        action: &PoolAction,
        transfer: &mut T,
    ) -> PoolResult<PoolOutcome>
    where
        T: ValueTransfer + ?Sized,
    {
        match action {
            PoolAction::Deposit { amount } => {
                let shares = self.deposit(caller, *amount)?;
                Ok(PoolOutcome::Deposited { shares })
            }
            PoolAction::DepositRewards { amount } => {
                let pool_balance = self.deposit_rewards(caller, *amount)?;
                Ok(PoolOutcome::RewardAccepted { pool_balance })
            }
            PoolAction::Withdraw => {
                let payout = self.withdraw(caller, transfer)?;
                Ok(PoolOutcome::Withdrawn { payout })
            }
            PoolAction::GrantRewardRole { account } => {
                let changed = self.grant_reward_role(caller, *account)?;
                Ok(PoolOutcome::RoleUpdated { changed })
            }
            PoolAction::RevokeRewardRole { account } => {
                let changed = self.revoke_reward_role(caller, account)?;
                Ok(PoolOutcome::RoleUpdated { changed })
            }
            PoolAction::TransferOwnership { new_owner } => {
                self.transfer_ownership(caller, *new_owner)?;
                Ok(PoolOutcome::OwnershipTransferred)
            }
        }
    }

    /// Deposit `amount` and credit shares to `caller`
    ///
    /// Returns the shares minted.
    pub fn deposit(&mut self, caller: &Address, amount: u64) -> PoolResult<u64> {
        // 1. Amount must be positive and above the minimum
        if amount == 0 {
            return Err(PoolError::InvalidAmount {
                amount,
                reason: AmountErrorReason::Zero,
            });
        }
        if amount < self.config.min_deposit {
            return Err(PoolError::InvalidAmount {
                amount,
                reason: AmountErrorReason::TooSmall,
            });
        }

        // 2. Price the deposit against the current pool
        let shares = shares_for_deposit(amount, self.totals.total_shares, self.totals.pool_balance)?;
        if shares == 0 {
            // Would donate the deposit to existing holders
            return Err(PoolError::InvalidAmount {
                amount,
                reason: AmountErrorReason::TooSmall,
            });
        }

        // 3. Compute new state
        let position = safe_add(self.position(caller), shares)?;
        let total_shares = safe_add(self.totals.total_shares, shares)?;
        let pool_balance = safe_add(self.totals.pool_balance, amount)?;

        // 4. Commit
        self.positions.insert(*caller, position);
        self.totals = PoolTotals { total_shares, pool_balance };

        self.events.emit(PoolEvent::Deposited {
            depositor: *caller,
            amount,
            shares,
        });
        debug!(amount, shares, total_shares, pool_balance, "deposit committed");

        Ok(shares)
    }

    /// Add `amount` to the pool without minting shares
    ///
    /// Only reward-depositors may call this. Returns the new pool balance.
    pub fn deposit_rewards(&mut self, caller: &Address, amount: u64) -> PoolResult<u64> {
        self.registry.ensure_member(caller)?;

        if amount == 0 {
            return Err(PoolError::InvalidAmount {
                amount,
                reason: AmountErrorReason::Zero,
            });
        }

        // Nobody to share with; the next depositor would capture it
        if self.totals.is_empty() {
            return Err(PoolError::EmptyPool);
        }

        let pool_balance = safe_add(self.totals.pool_balance, amount)?;
        self.totals.pool_balance = pool_balance;

        self.events.emit(PoolEvent::RewardDeposited {
            depositor: *caller,
            amount,
        });
        debug!(amount, pool_balance, total_shares = self.totals.total_shares, "reward committed");

        Ok(pool_balance)
    }

    /// Redeem the caller's whole position
    ///
    /// The payout is handed to `transfer` before anything is committed; if
    /// the hook fails the call returns [`PoolError::TransferFailed`] and the
    /// ledger is unchanged.
    pub fn withdraw<T>(&mut self, caller: &Address, transfer: &mut T) -> PoolResult<u64>
    where
        T: ValueTransfer + ?Sized,
    {
        // 1. Must hold a position
        let shares = self.position(caller);
        if shares == 0 {
            return Err(PoolError::NothingToWithdraw { depositor: *caller });
        }

        // 2. Price the position against the live pool
        let payout = payout_for_shares(shares, self.totals.total_shares, self.totals.pool_balance)?;
        let total_shares = safe_sub(self.totals.total_shares, shares)?;
        let pool_balance = safe_sub(self.totals.pool_balance, payout)?;

        // 3. Deliver before committing
        if let Err(err) = transfer.transfer(caller, payout) {
            warn!(payout, reason = err.reason, "payout transfer failed, withdrawal aborted");
            return Err(PoolError::TransferFailed {
                to: *caller,
                amount: payout,
            });
        }

        // 4. Commit
        self.positions.remove(caller);
        self.totals = PoolTotals { total_shares, pool_balance };

        self.events.emit(PoolEvent::Withdrawn {
            depositor: *caller,
            payout,
            shares,
        });
        debug!(payout, shares, total_shares, pool_balance, "withdrawal committed");

        Ok(payout)
    }

    /// Give `account` the reward-depositor role (owner only)
    ///
    /// Returns false when `account` already had it.
    pub fn grant_reward_role(&mut self, caller: &Address, account: Address) -> PoolResult<bool> {
        let changed = self.registry.grant(caller, account)?;
        if changed {
            self.events.emit(PoolEvent::RoleGranted {
                account,
                sender: *caller,
            });
        }
        Ok(changed)
    }

    /// Take the reward-depositor role from `account` (owner only)
    ///
    /// Returns false when `account` did not have it.
    pub fn revoke_reward_role(&mut self, caller: &Address, account: &Address) -> PoolResult<bool> {
        let changed = self.registry.revoke(caller, account)?;
        if changed {
            self.events.emit(PoolEvent::RoleRevoked {
                account: *account,
                sender: *caller,
            });
        }
        Ok(changed)
    }

    /// Hand ownership of the registry to `new_owner` (owner only)
    pub fn transfer_ownership(&mut self, caller: &Address, new_owner: Address) -> PoolResult<()> {
        let previous_owner = self.registry.transfer_ownership(caller, new_owner)?;
        self.events.emit(PoolEvent::OwnershipTransferred {
            previous_owner,
            new_owner,
        });
        Ok(())
    }

    // ============ Queries ============

    /// Recorded shares of `account` (zero if none)
    pub fn position(&self, account: &Address) -> u64 {
        self.positions.get(account).copied().unwrap_or(0)
    }

    /// Sum of all positions
    pub fn pool_total(&self) -> u64 {
        self.totals.total_shares
    }

    /// Value backing the positions
    pub fn pool_balance(&self) -> u64 {
        self.totals.pool_balance
    }

    pub fn totals(&self) -> PoolTotals {
        self.totals
    }

    pub fn config(&self) -> PoolConfig {
        self.config
    }

    pub fn owner(&self) -> Address {
        self.registry.owner()
    }

    pub fn is_member(&self, account: &Address) -> bool {
        self.registry.is_member(account)
    }

    /// Number of addresses holding a position
    pub fn depositor_count(&self) -> usize {
        self.positions.len()
    }

    /// Positions in ascending address order
    pub fn positions(&self) -> impl Iterator<Item = (&Address, &u64)> {
        self.positions.iter()
    }

    /// Payout a withdrawal by `account` would produce right now
    pub fn preview_withdraw(&self, account: &Address) -> PoolResult<u64> {
        let shares = self.position(account);
        if shares == 0 {
            return Ok(0);
        }
        payout_for_shares(shares, self.totals.total_shares, self.totals.pool_balance)
    }

    /// Events of committed transitions not yet drained
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Drain pending events
    pub fn take_events(&mut self) -> Vec<PoolEvent> {
        self.events.drain()
    }

    /// Verify the ledger invariants
    ///
    /// - positions sum to `total_shares` and none is zero
    /// - `pool_balance >= total_shares`
    /// - the pool holds value iff it has shares
    pub fn check_invariants(&self) -> PoolResult<()> {
        if self.config.min_deposit == 0 {
            return Err(PoolError::CorruptState {
                reason: "minimum deposit is zero",
            });
        }

        let mut sum = 0u64;
        for shares in self.positions.values() {
            if *shares == 0 {
                return Err(PoolError::CorruptState {
                    reason: "zero position recorded",
                });
            }
            sum = sum.checked_add(*shares).ok_or(PoolError::CorruptState {
                reason: "positions overflow",
            })?;
        }

        if sum != self.totals.total_shares {
            return Err(PoolError::CorruptState {
                reason: "positions do not sum to pool total",
            });
        }
        if self.totals.pool_balance < self.totals.total_shares {
            return Err(PoolError::CorruptState {
                reason: "pool balance below share supply",
            });
        }
        if (self.totals.total_shares == 0) != (self.totals.pool_balance == 0) {
            return Err(PoolError::CorruptState {
                reason: "pool balance without shares",
            });
        }

        Ok(())
    }

    // ============ Persistence ============

    /// Capture the persisted layout
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            owner: self.registry.owner(),
            members: self.registry.members(),
            positions: self.positions.iter().map(|(k, v)| (*k, *v)).collect(),
            totals: self.totals,
            config: self.config,
        }
    }

    /// Rebuild a ledger from a snapshot, re-checking every invariant
    pub fn restore(snapshot: LedgerSnapshot) -> PoolResult<Self> {
        if snapshot.owner == ZERO {
            return Err(PoolError::CorruptState {
                reason: "owner is the zero address",
            });
        }

        let member_count = snapshot.members.len();
        let members: BTreeSet<Address> = snapshot.members.into_iter().collect();
        if members.len() != member_count {
            return Err(PoolError::CorruptState {
                reason: "duplicate member",
            });
        }

        let position_count = snapshot.positions.len();
        let positions: BTreeMap<Address, u64> = snapshot.positions.into_iter().collect();
        if positions.len() != position_count {
            return Err(PoolError::CorruptState {
                reason: "duplicate position",
            });
        }

        let ledger = Self {
            registry: AccessRegistry::from_parts(snapshot.owner, members),
            positions,
            totals: snapshot.totals,
            config: snapshot.config,
            events: EventLog::new(),
        };
        ledger.check_invariants()?;

        debug!(
            depositors = ledger.depositor_count(),
            total_shares = ledger.totals.total_shares,
            pool_balance = ledger.totals.pool_balance,
            "ledger restored"
        );
        Ok(ledger)
    }
}

// ============ Tests ============
