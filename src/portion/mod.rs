//! Fee portion lookup for token pairs.
//!
//! A portion is a protocol fee, in basis points plus a recipient, attached to the
//! quote that is finally served. Whether a pair carries one is answered by an
//! external portion service; [`PortionFetcher`] fronts it with a cache.
//!
//! # Lookup order
//!
//! [`PortionFetcher::get_portion`] resolves a pair by the first step that answers:
//!
//! 1. an active [`PortionOverride`], returned as is and never cached;
//! 2. `enabled: false` in [`Config`], which answers "no portion";
//! 3. a live cache entry;
//! 4. one `GET /portion` call, cached for [`Config`]'s positive or negative TTL
//!    depending on the answer;
//! 5. on any failure, [`PortionResponse::none`], not cached.
//!
//! Failures never reach the caller: an unknown fee status is priced as no fee.
//!
//! # Example
//!
//! ```no_run
//! use unified_routing_core::MAINNET;
//! use unified_routing_core::portion::{Config, PortionFetcher};
//! use unified_routing_core::portion::types::PortionRequest;
//! use unified_routing_core::types::address;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let fetcher = PortionFetcher::new("https://portion.example.org", Config::default())?;
//!
//! let request = PortionRequest::builder()
//!     .token_in_chain_id(MAINNET)
//!     .token_in_address(address!("1f9840a85d5aF5bf1D1762F925BDADdC4201F984"))
//!     .token_out_chain_id(MAINNET)
//!     .token_out_address(address!("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"))
//!     .build();
//!
//! let response = fetcher.get_portion(&request).await;
//! if let Some(portion) = response.portion {
//!     println!("{} bps to {}", portion.bps, portion.recipient);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
mod force;
pub mod types;

use std::time::Duration;

pub use client::{Config, PortionFetcher};
pub use force::PortionOverride;
pub use types::{Portion, PortionResponse};

/// How long a "portion applies" answer is cached.
pub const DEFAULT_POSITIVE_CACHE_ENTRY_TTL: Duration = Duration::from_secs(600);

/// Cache misses between two sweeps of expired cache entries.
pub const DEFAULT_PURGE_INTERVAL: u64 = 256;

/// How long a "no portion" answer is cached. Shorter than the positive TTL so a
/// newly configured fee is picked up quickly.
pub const DEFAULT_NEGATIVE_CACHE_ENTRY_TTL: Duration = Duration::from_secs(300);
