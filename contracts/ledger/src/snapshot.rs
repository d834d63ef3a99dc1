//! Persisted ledger layout
//!
//! A snapshot holds exactly what is needed to resume after a restart:
//! owner, reward-depositors, non-zero positions, the two pool totals and
//! the configuration. Collections are stored in ascending address order so
//! equal ledgers always encode to equal bytes.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use ethpool_common::{
    errors::{PoolError, PoolResult},
    types::{Address, PoolConfig, PoolTotals},
    Vec,
};

/// Canonical persisted form of a [`crate::ShareLedger`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct LedgerSnapshot {
    /// Registry owner
    pub owner: Address,
    /// Reward-depositors, ascending
    pub members: Vec<Address>,
    /// Non-zero positions, ascending by address
    pub positions: Vec<(Address, u64)>,
    /// Share supply and pool value
    pub totals: PoolTotals,
    /// Ledger configuration
    pub config: PoolConfig,
}

impl LedgerSnapshot {
    /// Encode with borsh
    pub fn to_bytes(&self) -> Vec<u8> {
        borsh::to_vec(self).unwrap_or_default()
    }

    /// Decode from borsh bytes
    pub fn from_bytes(bytes: &[u8]) -> PoolResult<Self> {
        borsh::from_slice(bytes).map_err(|_| PoolError::CorruptState {
            reason: "snapshot bytes do not decode",
        })
    }

    /// SHA-256 commitment over the canonical encoding
    pub fn state_root(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(self.to_bytes());
        let result = hasher.finalize();
        let mut root = [0u8; 32];
        root.copy_from_slice(&result);
        root
    }
}
