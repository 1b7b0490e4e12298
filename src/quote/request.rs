use bon::Builder;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use super::{RoutingType, TradeType};
use crate::serde_helpers::AmountFromAny;
use crate::types::{Address, ChainId, U256, Uuid};

/// One routing leg of a user's swap request.
///
/// # Example
///
/// ```
/// use unified_routing_core::MAINNET;
/// use unified_routing_core::quote::{QuoteRequest, RoutingType, TradeType};
/// use unified_routing_core::types::{U256, Uuid, address};
///
/// let request = QuoteRequest::builder()
///     .request_id(Uuid::nil())
///     .token_in_chain_id(MAINNET)
///     .token_out_chain_id(MAINNET)
///     .token_in(address!("1f9840a85d5aF5bf1D1762F925BDADdC4201F984"))
///     .token_out(address!("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"))
///     .amount(U256::from(1_000_000))
///     .trade_type(TradeType::ExactInput)
///     .routing_type(RoutingType::DutchLimit)
///     .build();
///
/// assert!(request.matches(RoutingType::DutchLimit, TradeType::ExactInput));
/// ```
#[serde_as]
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    /// Shared by every routing leg of the same user ask.
    pub request_id: Uuid,
    pub token_in_chain_id: ChainId,
    pub token_out_chain_id: ChainId,
    pub token_in: Address,
    pub token_out: Address,
    /// Raw amount of `token_in` for exact-input, of `token_out` for exact-output.
    #[serde_as(as = "AmountFromAny")]
    pub amount: U256,
    #[serde(rename = "type")]
    pub trade_type: TradeType,
    pub routing_type: RoutingType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swapper: Option<Address>,
}

impl QuoteRequest {
    /// Whether a quote with the given routing and trade type answers this request.
    #[must_use]
    pub fn matches(&self, routing_type: RoutingType, trade_type: TradeType) -> bool {
        self.routing_type == routing_type && self.trade_type == trade_type
    }

    /// Returns a copy of this request re-targeted at another quoter family.
    #[must_use]
    pub fn with_routing_type(&self, routing_type: RoutingType) -> Self {
        Self {
            routing_type,
            ..self.clone()
        }
    }
}
