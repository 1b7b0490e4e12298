//! Re-exported types from external crates for convenience.
//!
//! These types are commonly used in this crate and are re-exported here
//! so users don't need to add these dependencies to their `Cargo.toml`.

/// Ethereum address type and the [`address!`] macro for compile-time address literals.
/// [`ChainId`] is a type alias for `u64` representing EVM chain IDs.
/// [`U256`] holds raw token amounts (wei-level granularity).
pub use alloy::primitives::{Address, ChainId, U256, address};
/// Date and time types for cache expiry timestamps.
pub use chrono::{DateTime, Utc};
/// Identifier shared by the classic and Dutch-auction legs of one user request.
pub use uuid::Uuid;
