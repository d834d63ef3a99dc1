//! Serialized access for multi-threaded hosts
//!
//! One mutex guards the whole ledger. Each call, including the payout
//! transfer inside a withdrawal, runs to completion under that lock, so
//! concurrent callers observe transitions in a single total order.

use std::sync::Arc;

use parking_lot::Mutex;

use ethpool_common::{
    errors::PoolResult,
    events::PoolEvent,
    types::{Address, PoolAction, PoolConfig, PoolOutcome},
};

use crate::{LedgerSnapshot, ShareLedger, ValueTransfer};

/// Cloneable handle to a ledger behind a single lock
#[derive(Debug, Clone)]
pub struct SharedLedger {
    inner: Arc<Mutex<ShareLedger>>,
}

impl SharedLedger {
    pub fn new(owner: Address, config: PoolConfig) -> PoolResult<Self> {
        Ok(Self::from_ledger(ShareLedger::new(owner, config)?))
    }

    pub fn from_ledger(ledger: ShareLedger) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ledger)),
        }
    }

    pub fn execute<T>(&self, caller: &Address, action: &PoolAction, transfer: &mut T) -> PoolResult<PoolOutcome>
    where
        T: ValueTransfer + ?Sized,
    {
        self.inner.lock().execute(caller, action, transfer)
    }

    pub fn deposit(&self, caller: &Address, amount: u64) -> PoolResult<u64> {
        self.inner.lock().deposit(caller, amount)
    }

    pub fn deposit_rewards(&self, caller: &Address, amount: u64) -> PoolResult<u64> {
        self.inner.lock().deposit_rewards(caller, amount)
    }

    pub fn withdraw<T>(&self, caller: &Address, transfer: &mut T) -> PoolResult<u64>
    where
        T: ValueTransfer + ?Sized,
    {
        self.inner.lock().withdraw(caller, transfer)
    }

    pub fn grant_reward_role(&self, caller: &Address, account: Address) -> PoolResult<bool> {
        self.inner.lock().grant_reward_role(caller, account)
    }

    pub fn revoke_reward_role(&self, caller: &Address, account: &Address) -> PoolResult<bool> {
        self.inner.lock().revoke_reward_role(caller, account)
    }

    pub fn transfer_ownership(&self, caller: &Address, new_owner: Address) -> PoolResult<()> {
        self.inner.lock().transfer_ownership(caller, new_owner)
    }

    /// Run a read-only query against a consistent view
    pub fn read<R>(&self, f: impl FnOnce(&ShareLedger) -> R) -> R {
        let guard = self.inner.lock();
        f(&*guard)
    }

    pub fn position(&self, account: &Address) -> u64 {
        self.read(|ledger| ledger.position(account))
    }

    pub fn pool_total(&self) -> u64 {
        self.read(ShareLedger::pool_total)
    }

    pub fn pool_balance(&self) -> u64 {
        self.read(ShareLedger::pool_balance)
    }

    pub fn is_member(&self, account: &Address) -> bool {
        self.read(|ledger| ledger.is_member(account))
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        self.read(ShareLedger::snapshot)
    }

    pub fn take_events(&self) -> Vec<PoolEvent> {
        self.inner.lock().take_events()
    }
}
