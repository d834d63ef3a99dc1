//! Access Control Module
//!
//! Owner-managed registry of reward-depositor identities.
//!
//! ## Rules
//!
//! - **Single Owner**: only the owner grants, revokes or transfers ownership
//! - **Boolean Membership**: an address either holds the role or not
//! - **Idempotent Updates**: granting a member or revoking a non-member
//!   succeeds and changes nothing
//! - **Owner Starts as Member**: the owner holds the role at creation but
//!   may revoke it from itself like any other address

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::constants::address::ZERO;
use crate::types::Address;
use crate::{BTreeSet, PoolError, PoolResult, Vec};

/// Access registry state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct AccessRegistry {
    /// Address allowed to manage membership
    owner: Address,
    /// Current reward-depositors
    members: BTreeSet<Address>,
}

impl AccessRegistry {
    /// Create a registry owned by `owner`, who also receives the role
    pub fn new(owner: Address) -> Self {
        let mut members = BTreeSet::new();
        members.insert(owner);
        Self { owner, members }
    }

    /// Rebuild a registry from persisted parts without granting anything
    pub fn from_parts(owner: Address, members: BTreeSet<Address>) -> Self {
        Self { owner, members }
    }

    /// Current owner
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// Check if address holds the reward-depositor role
    pub fn is_member(&self, account: &Address) -> bool {
        self.members.contains(account)
    }

    /// Members in ascending address order
    pub fn members(&self) -> Vec<Address> {
        self.members.iter().copied().collect()
    }

    /// Fail unless `caller` is the owner
    pub fn ensure_owner(&self, caller: &Address) -> PoolResult<()> {
        if *caller != self.owner {
            return Err(PoolError::Unauthorized {
                expected: self.owner,
                actual: *caller,
            });
        }
        Ok(())
    }

    /// Fail unless `caller` holds the reward-depositor role
    pub fn ensure_member(&self, caller: &Address) -> PoolResult<()> {
        if !self.is_member(caller) {
            return Err(PoolError::Unauthorized {
                expected: self.owner,
                actual: *caller,
            });
        }
        Ok(())
    }

    /// Grant the role to `account`
    ///
    /// Returns whether membership changed.
    pub fn grant(&mut self, caller: &Address, account: Address) -> PoolResult<bool> {
        self.ensure_owner(caller)?;
        Ok(self.members.insert(account))
    }

    /// Revoke the role from `account`
    ///
    /// Returns whether membership changed.
    pub fn revoke(&mut self, caller: &Address, account: &Address) -> PoolResult<bool> {
        self.ensure_owner(caller)?;
        Ok(self.members.remove(account))
    }

    /// Move ownership to `new_owner`
    ///
    /// Membership is left untouched; the new owner grants itself the role
    /// if it wants to deposit rewards.
    pub fn transfer_ownership(&mut self, caller: &Address, new_owner: Address) -> PoolResult<Address> {
        self.ensure_owner(caller)?;

        if new_owner == ZERO {
            return Err(PoolError::InvalidAddress {
                reason: "new owner is the zero address",
            });
        }

        let previous = self.owner;
        self.owner = new_owner;
        Ok(previous)
    }
}

// ============================================================================
// Tests
// ============================================================================
