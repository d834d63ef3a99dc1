//! Share Math for the ETHPool ledger
//!
//! Checked conversions between deposited value and pool shares.
//! Intermediates are widened to u128 and every division rounds down, so
//! rounding always favours the shares that stay in the pool.

use crate::constants::pool::INITIAL_SHARES_PER_UNIT;
use crate::errors::{PoolError, PoolResult};

/// Calculate shares minted for a deposit
///
/// shares = amount * total_shares / pool_balance
///
/// The first deposit into an empty pool mints shares 1:1.
///
/// # Arguments
/// * `amount` - Value deposited in base units
/// * `total_shares` - Share supply before the deposit
/// * `pool_balance` - Pool value before the deposit
///
/// # Returns
/// Shares to credit to the depositor (may be zero for dust amounts)
pub fn shares_for_deposit(amount: u64, total_shares: u64, pool_balance: u64) -> PoolResult<u64> {
    if total_shares == 0 {
        return amount
            .checked_mul(INITIAL_SHARES_PER_UNIT)
            .ok_or(PoolError::Overflow);
    }

    let shares = (amount as u128)
        .checked_mul(total_shares as u128)
        .ok_or(PoolError::Overflow)?
        .checked_div(pool_balance as u128)
        .ok_or(PoolError::DivisionByZero)?;

    u64::try_from(shares).map_err(|_| PoolError::Overflow)
}

/// Calculate the value redeemable for a position
///
/// payout = pool_balance * shares / total_shares
///
/// When `shares == total_shares` the result is exactly `pool_balance`,
/// so the last withdrawer drains the pool with no remainder.
///
/// # Arguments
/// * `shares` - Position being redeemed
/// * `total_shares` - Share supply before the withdrawal
/// * `pool_balance` - Pool value before the withdrawal
///
/// # Returns
/// Payout in base units
pub fn payout_for_shares(shares: u64, total_shares: u64, pool_balance: u64) -> PoolResult<u64> {
    if shares > total_shares {
        return Err(PoolError::Underflow);
    }

    let payout = (pool_balance as u128)
        .checked_mul(shares as u128)
        .ok_or(PoolError::Overflow)?
        .checked_div(total_shares as u128)
        .ok_or(PoolError::DivisionByZero)?;

    // payout <= pool_balance, always fits
    u64::try_from(payout).map_err(|_| PoolError::Overflow)
}

/// Add two amounts, failing on overflow
pub fn safe_add(a: u64, b: u64) -> PoolResult<u64> {
    a.checked_add(b).ok_or(PoolError::Overflow)
}

/// Subtract two amounts, failing on underflow
pub fn safe_sub(a: u64, b: u64) -> PoolResult<u64> {
    a.checked_sub(b).ok_or(PoolError::Underflow)
}
