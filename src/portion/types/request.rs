use std::fmt;

use bon::Builder;

use crate::quote::QuoteRequest;
use crate::types::{Address, ChainId};

/// Identifies the token pair whose portion is requested.
///
/// # Example
///
/// ```
/// use unified_routing_core::MAINNET;
/// use unified_routing_core::portion::types::PortionRequest;
/// use unified_routing_core::types::address;
///
/// let request = PortionRequest::builder()
///     .token_in_chain_id(MAINNET)
///     .token_in_address(address!("1f9840a85d5aF5bf1D1762F925BDADdC4201F984"))
///     .token_out_chain_id(MAINNET)
///     .token_out_address(address!("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"))
///     .build();
///
/// assert_eq!(
///     request.key().to_string(),
///     "PortionFetcher-1-0x1f9840a85d5af5bf1d1762f925bdaddc4201f984-1-0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"
/// );
/// ```
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Builder)]
pub struct PortionRequest {
    pub token_in_chain_id: ChainId,
    pub token_in_address: Address,
    pub token_out_chain_id: ChainId,
    pub token_out_address: Address,
}

impl PortionRequest {
    /// The normalized cache key for this pair.
    #[must_use]
    pub fn key(&self) -> PortionKey {
        PortionKey(format!(
            "PortionFetcher-{}-{}-{}-{}",
            self.token_in_chain_id,
            lowercase(self.token_in_address),
            self.token_out_chain_id,
            lowercase(self.token_out_address),
        ))
    }

    /// Query parameters understood by the portion service.
    pub(crate) fn query(&self) -> [(&'static str, String); 4] {
        [
            ("tokenInChainId", self.token_in_chain_id.to_string()),
            ("tokenInAddress", lowercase(self.token_in_address)),
            ("tokenOutChainId", self.token_out_chain_id.to_string()),
            ("tokenOutAddress", lowercase(self.token_out_address)),
        ]
    }
}

impl From<&QuoteRequest> for PortionRequest {
    fn from(request: &QuoteRequest) -> Self {
        Self {
            token_in_chain_id: request.token_in_chain_id,
            token_in_address: request.token_in,
            token_out_chain_id: request.token_out_chain_id,
            token_out_address: request.token_out,
        }
    }
}

fn lowercase(address: Address) -> String {
    address.to_string().to_lowercase()
}

/// Cache key for a token pair, with both addresses lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PortionKey(String);

impl PortionKey {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PortionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
