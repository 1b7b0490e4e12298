use bon::Builder;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use super::{RoutingType, TradeType};
use crate::serde_helpers::AmountFromAny;
use crate::types::{Address, U256, Uuid};

/// A quote for an on-chain routed swap.
///
/// For [`TradeType::ExactInput`], `quote` is the output amount and `quote_gas_adjusted`
/// is that amount minus the gas cost expressed in the output token. For
/// [`TradeType::ExactOutput`], `quote` is the input amount and `quote_gas_adjusted` adds
/// the gas cost. Equal amounts mean the router had no gas estimate.
#[serde_as]
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[serde(rename_all = "camelCase")]
pub struct ClassicQuote {
    pub request_id: Uuid,
    pub trade_type: TradeType,
    /// The amount fixed by the request.
    #[serde_as(as = "AmountFromAny")]
    pub amount: U256,
    #[serde_as(as = "AmountFromAny")]
    pub quote: U256,
    #[serde_as(as = "AmountFromAny")]
    pub quote_gas_adjusted: U256,
    /// Gas units the route is expected to consume.
    #[serde_as(as = "Option<AmountFromAny>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_use_estimate: Option<U256>,
}

impl ClassicQuote {
    /// Whether the router attached a gas estimate to this quote.
    #[must_use]
    pub fn has_gas_estimate(&self) -> bool {
        self.quote != self.quote_gas_adjusted
    }

    /// Gas cost of the route, denominated in the same token as [`ClassicQuote::quote`].
    #[must_use]
    pub fn gas_cost(&self) -> U256 {
        self.quote.abs_diff(self.quote_gas_adjusted)
    }
}

/// A quote for an off-chain Dutch-auction order. Fillers pay gas, so there is no
/// gas-adjusted amount.
#[serde_as]
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[serde(rename_all = "camelCase")]
pub struct DutchQuote {
    pub request_id: Uuid,
    pub trade_type: TradeType,
    pub token_in: Address,
    pub token_out: Address,
    #[serde_as(as = "AmountFromAny")]
    pub amount_in: U256,
    #[serde_as(as = "AmountFromAny")]
    pub amount_out: U256,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filler: Option<Address>,
}

impl DutchQuote {
    /// The quoted amount on the side the user did not fix: `amount_out` for exact-input,
    /// `amount_in` for exact-output. This is the same token a [`ClassicQuote::quote`]
    /// for the same request is denominated in.
    #[must_use]
    pub fn notional(&self) -> U256 {
        match self.trade_type {
            TradeType::ExactInput => self.amount_out,
            TradeType::ExactOutput => self.amount_in,
        }
    }
}

/// A quote from either quoter family, tagged on the wire by `routing`.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "routing")]
pub enum Quote {
    #[serde(rename = "CLASSIC")]
    Classic(ClassicQuote),
    #[serde(rename = "DUTCH_LIMIT")]
    Dutch(DutchQuote),
}

impl Quote {
    #[must_use]
    pub fn routing_type(&self) -> RoutingType {
        match self {
            Quote::Classic(_) => RoutingType::Classic,
            Quote::Dutch(_) => RoutingType::DutchLimit,
        }
    }

    #[must_use]
    pub fn trade_type(&self) -> TradeType {
        match self {
            Quote::Classic(quote) => quote.trade_type,
            Quote::Dutch(quote) => quote.trade_type,
        }
    }

    #[must_use]
    pub fn request_id(&self) -> Uuid {
        match self {
            Quote::Classic(quote) => quote.request_id,
            Quote::Dutch(quote) => quote.request_id,
        }
    }

    #[must_use]
    pub fn as_classic(&self) -> Option<&ClassicQuote> {
        match self {
            Quote::Classic(quote) => Some(quote),
            Quote::Dutch(_) => None,
        }
    }

    #[must_use]
    pub fn as_dutch(&self) -> Option<&DutchQuote> {
        match self {
            Quote::Dutch(quote) => Some(quote),
            Quote::Classic(_) => None,
        }
    }
}

impl From<ClassicQuote> for Quote {
    fn from(quote: ClassicQuote) -> Self {
        Quote::Classic(quote)
    }
}

impl From<DutchQuote> for Quote {
    fn from(quote: DutchQuote) -> Self {
        Quote::Dutch(quote)
    }
}
