//! Pool Events
//!
//! Events are emitted by committed transitions only and can be indexed
//! off-chain by the host. A rejected call emits nothing.

use crate::Vec;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use crate::types::Address;

/// Event types for indexing and filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
#[borsh(use_discriminant = true)]
#[repr(u8)]
pub enum EventType {
    // Pool Events (0x20 - 0x3F)
    Deposited = 0x20,
    RewardDeposited = 0x21,
    Withdrawn = 0x22,

    // Access Events (0x80 - 0x9F)
    RoleGranted = 0x80,
    RoleRevoked = 0x81,
    OwnershipTransferred = 0x82,
}

/// Main event enum containing all possible pool events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub enum PoolEvent {
    // ============ Pool Events ============

    /// Emitted when value is deposited for shares
    Deposited {
        depositor: Address,
        amount: u64,
        shares: u64,
    },

    /// Emitted when a reward-depositor adds value to the pool
    RewardDeposited {
        depositor: Address,
        amount: u64,
    },

    /// Emitted when a position is redeemed
    Withdrawn {
        depositor: Address,
        payout: u64,
        shares: u64,
    },

    // ============ Access Events ============

    /// Emitted when an address gains the reward-depositor role
    RoleGranted {
        account: Address,
        sender: Address,
    },

    /// Emitted when an address loses the reward-depositor role
    RoleRevoked {
        account: Address,
        sender: Address,
    },

    /// Emitted when ownership changes hands
    OwnershipTransferred {
        previous_owner: Address,
        new_owner: Address,
    },
}

impl PoolEvent {
    /// Get the event type for filtering
    pub fn event_type(&self) -> EventType {
        match self {
            Self::Deposited { .. } => EventType::Deposited,
            Self::RewardDeposited { .. } => EventType::RewardDeposited,
            Self::Withdrawn { .. } => EventType::Withdrawn,
            Self::RoleGranted { .. } => EventType::RoleGranted,
            Self::RoleRevoked { .. } => EventType::RoleRevoked,
            Self::OwnershipTransferred { .. } => EventType::OwnershipTransferred,
        }
    }

    /// Serialize event to bytes for storage/transmission
    pub fn to_bytes(&self) -> Vec<u8> {
        borsh::to_vec(self).unwrap_or_default()
    }

    /// Deserialize event from bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        borsh::from_slice(bytes).ok()
    }
}

/// Event log for collecting events during execution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<PoolEvent>,
}

impl EventLog {
    /// Create a new empty event log
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Emit an event (add to log)
    pub fn emit(&mut self, event: PoolEvent) {
        self.events.push(event);
    }

    /// Get all events
    pub fn events(&self) -> &[PoolEvent] {
        &self.events
    }

    /// Most recent event, if any
    pub fn last(&self) -> Option<&PoolEvent> {
        self.events.last()
    }

    /// Take all events, leaving the log empty
    pub fn drain(&mut self) -> Vec<PoolEvent> {
        core::mem::take(&mut self.events)
    }

    /// Filter events by type
    pub fn filter_by_type(&self, event_type: EventType) -> Vec<&PoolEvent> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Check if any events were emitted
    pub fn has_events(&self) -> bool {
        !self.events.is_empty()
    }

    /// Get number of events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True when nothing was emitted
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
