//! Quote requests and the quotes competing to fill them.
//!
//! A user ask is fanned out to several quoters. Each fan-out leg is a
//! [`QuoteRequest`] with its own [`RoutingType`]; all legs of the same ask share a
//! `request_id` and a [`TradeType`]. Quoters answer with a [`Quote`], which is either
//! an on-chain routed [`ClassicQuote`] or an off-chain Dutch-auction [`DutchQuote`].
//!
//! Quotes carry no pointer back to the request they answer. They are paired with a
//! request by matching routing type and trade type, see [`QuoteRequest::matches`].
//!
//! # Example
//!
//! ```
//! use unified_routing_core::quote::{ClassicQuote, Quote, RoutingType, TradeType};
//! use unified_routing_core::types::{U256, Uuid};
//!
//! let quote = Quote::Classic(
//!     ClassicQuote::builder()
//!         .request_id(Uuid::nil())
//!         .trade_type(TradeType::ExactInput)
//!         .amount(U256::from(1_000))
//!         .quote(U256::from(990))
//!         .quote_gas_adjusted(U256::from(980))
//!         .build(),
//! );
//!
//! assert_eq!(quote.routing_type(), RoutingType::Classic);
//! ```

pub mod request;
pub mod response;

use serde::{Deserialize, Serialize};
use strum_macros::Display;

pub use request::QuoteRequest;
pub use response::{ClassicQuote, DutchQuote, Quote};

/// Which side of the swap the user fixed.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeType {
    /// The input amount is fixed; quotes compete on output amount.
    ExactInput,
    /// The output amount is fixed; quotes compete on input amount.
    ExactOutput,
}

/// Which quoter family a request or quote belongs to.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum RoutingType {
    /// On-chain routed swap; the trader pays gas.
    Classic,
    /// Off-chain Dutch-auction order; gas-free for the requester.
    DutchLimit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trade_type_wire_format() {
        assert_eq!(
            serde_json::to_value(TradeType::ExactInput).expect("serialize"),
            serde_json::json!("EXACT_INPUT")
        );
        assert_eq!(TradeType::ExactOutput.to_string(), "EXACT_OUTPUT");
    }

    #[test]
    fn routing_type_wire_format() {
        let routing: RoutingType =
            serde_json::from_value(serde_json::json!("DUTCH_LIMIT")).expect("deserialize");
        assert_eq!(routing, RoutingType::DutchLimit);
        assert_eq!(RoutingType::Classic.to_string(), "CLASSIC");
    }
}
