//! Pool Constants
//!
//! Configuration values for the ETHPool ledger.
//!
//! # Network Configuration
//!
//! Use feature flags to compile for different networks:
//! - `mainnet` - Production values (higher minimum deposit)
//! - Default (no feature) - Testnet values (any non-zero deposit)
//!
//! ```toml
//! # For mainnet deployment:
//! ethpool-common = { path = "...", features = ["mainnet"] }
//! ```

/// Value units
pub mod units {
    /// Decimal places of the smallest indivisible unit
    pub const DECIMALS: u8 = 8;
    /// One whole unit expressed in base units
    pub const ONE: u64 = 100_000_000;
}

/// Share pool parameters
pub mod pool {
    /// Minimum accepted deposit in base units
    #[cfg(feature = "mainnet")]
    pub const MIN_DEPOSIT: u64 = super::units::ONE / 1_000;

    /// Minimum accepted deposit in base units
    #[cfg(not(feature = "mainnet"))]
    pub const MIN_DEPOSIT: u64 = 1;

    /// Share supply minted 1:1 for the first deposit into an empty pool
    pub const INITIAL_SHARES_PER_UNIT: u64 = 1;
}

/// Address constants
pub mod address {
    use crate::types::Address;

    /// The all-zero address, never a valid owner
    pub const ZERO: Address = [0u8; 32];
}
