//! ETHPool Common Library
//!
//! Shared types, constants, and utilities for the ETHPool share ledger.
//!
//! ## Pool Model
//!
//! Depositors receive **shares** priced at the pool's current value per
//! share. Reward-depositors add value without receiving shares, which
//! raises the price of every outstanding share at once. A withdrawal
//! redeems a whole position at the live price.
//!
//! - **Share Math**: checked u128 conversions that round toward the pool
//! - **Access Control**: owner-managed reward-depositor registry
//! - **Events**: typed, borsh-encodable event log
//! - **Errors**: one error enum with stable codes
//!
//! This crate is `no_std` compatible when built without the `std`
//! feature.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

// Re-export collections for submodules based on feature
#[cfg(not(feature = "std"))]
pub use alloc::{
    collections::{BTreeMap, BTreeSet},
    vec::Vec,
};
#[cfg(feature = "std")]
pub use std::{
    collections::{BTreeMap, BTreeSet},
    vec::Vec,
};

pub mod constants;
pub mod errors;
pub mod types;
pub mod math;
pub mod events;
pub mod access_control;

// Re-exports for convenience
pub use errors::*;
pub use types::*;
pub use events::*;
pub use access_control::AccessRegistry;
