#![allow(
    unused,
    reason = "Each integration test binary uses a different subset of the fixtures"
)]

use unified_routing_core::MAINNET;
use unified_routing_core::portion::types::PortionRequest;
use unified_routing_core::quote::{
    ClassicQuote, DutchQuote, Quote, QuoteRequest, RoutingType, TradeType,
};
use unified_routing_core::types::{Address, U256, Uuid, address};

pub const TOKEN_IN: Address = address!("1f9840a85d5aF5bf1D1762F925BDADdC4201F984");
pub const TOKEN_OUT: Address = address!("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2");

pub const TOKEN_IN_LOWER: &str = "0x1f9840a85d5af5bf1d1762f925bdaddc4201f984";
pub const TOKEN_OUT_LOWER: &str = "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2";

pub const PORTION_RECIPIENT: &str = "0x7FFC3DBF3B2b50Ff3A1D5523bc24Bb5043837B14";

pub const REQUEST_ID: Uuid = Uuid::nil();

/// `n` whole tokens at 18 decimals.
#[must_use]
pub fn ether(n: u64) -> U256 {
    U256::from(n) * U256::from(10_u64).pow(U256::from(18))
}

#[must_use]
pub fn quote_request(trade_type: TradeType, routing_type: RoutingType) -> QuoteRequest {
    QuoteRequest::builder()
        .request_id(REQUEST_ID)
        .token_in_chain_id(MAINNET)
        .token_out_chain_id(MAINNET)
        .token_in(TOKEN_IN)
        .token_out(TOKEN_OUT)
        .amount(ether(1))
        .trade_type(trade_type)
        .routing_type(routing_type)
        .build()
}

/// The classic and Dutch-auction legs of one user ask.
#[must_use]
pub fn multi_request(trade_type: TradeType) -> Vec<QuoteRequest> {
    vec![
        quote_request(trade_type, RoutingType::Classic),
        quote_request(trade_type, RoutingType::DutchLimit),
    ]
}

#[must_use]
pub fn classic_quote(trade_type: TradeType, quote: U256, quote_gas_adjusted: U256) -> Quote {
    ClassicQuote::builder()
        .request_id(REQUEST_ID)
        .trade_type(trade_type)
        .amount(ether(1))
        .quote(quote)
        .quote_gas_adjusted(quote_gas_adjusted)
        .build()
        .into()
}

/// A classic quote whose gas cost is `percent`% of `notional`, applied in the
/// direction the trade type dictates.
#[must_use]
pub fn classic_quote_with_gas_percent(
    trade_type: TradeType,
    notional: U256,
    percent: u64,
) -> Quote {
    let gas = notional * U256::from(percent) / U256::from(100);
    let adjusted = match trade_type {
        TradeType::ExactInput => notional - gas,
        _ => notional + gas,
    };

    classic_quote(trade_type, notional, adjusted)
}

/// A Dutch quote whose amount on the side the user did not fix is `notional`.
#[must_use]
pub fn dutch_quote(trade_type: TradeType, notional: U256) -> Quote {
    let (amount_in, amount_out) = match trade_type {
        TradeType::ExactInput => (ether(1), notional),
        _ => (notional, ether(1)),
    };

    DutchQuote::builder()
        .request_id(REQUEST_ID)
        .trade_type(trade_type)
        .token_in(TOKEN_IN)
        .token_out(TOKEN_OUT)
        .amount_in(amount_in)
        .amount_out(amount_out)
        .build()
        .into()
}

#[must_use]
pub fn portion_request() -> PortionRequest {
    PortionRequest::builder()
        .token_in_chain_id(MAINNET)
        .token_in_address(TOKEN_IN)
        .token_out_chain_id(MAINNET)
        .token_out_address(TOKEN_OUT)
        .build()
}
