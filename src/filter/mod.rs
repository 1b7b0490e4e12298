//! Pruning of candidate quotes before the best one is selected.
//!
//! Every filter is a pure, synchronous function of the original requests and the
//! candidate quotes. Filters never fail: input they cannot make sense of passes
//! through untouched. Survivors keep their relative order.
//!
//! # Example
//!
//! ```
//! use unified_routing_core::filter::{
//!     CompoundFilter, GoudaOrderSizeFilter, OnlyConfiguredQuotersFilter, QuoteFilter as _,
//! };
//!
//! let filter = CompoundFilter::new(vec![
//!     Box::new(OnlyConfiguredQuotersFilter),
//!     Box::new(GoudaOrderSizeFilter::default()),
//! ]);
//!
//! assert!(filter.filter(&[], Vec::new()).is_empty());
//! ```

mod gouda_order_size;

pub use gouda_order_size::{DEFAULT_GAS_COST_THRESHOLD_BPS, GasCostBasis, GoudaOrderSizeFilter};

use crate::quote::{Quote, QuoteRequest};

/// A step in the quote selection pipeline.
pub trait QuoteFilter: Send + Sync {
    /// Returns the subset of `quotes` that survive this filter, in their original order.
    fn filter(&self, requests: &[QuoteRequest], quotes: Vec<Quote>) -> Vec<Quote>;
}

/// Runs a sequence of filters, feeding each one the survivors of the previous.
#[derive(Default)]
pub struct CompoundFilter {
    filters: Vec<Box<dyn QuoteFilter>>,
}

impl CompoundFilter {
    #[must_use]
    pub fn new(filters: Vec<Box<dyn QuoteFilter>>) -> Self {
        Self { filters }
    }

    /// Appends a filter to the end of the pipeline.
    #[must_use]
    pub fn with<F: QuoteFilter + 'static>(mut self, filter: F) -> Self {
        self.filters.push(Box::new(filter));
        self
    }
}

impl QuoteFilter for CompoundFilter {
    fn filter(&self, requests: &[QuoteRequest], quotes: Vec<Quote>) -> Vec<Quote> {
        self.filters
            .iter()
            .fold(quotes, |quotes, filter| filter.filter(requests, quotes))
    }
}

/// Drops quotes that do not answer any of the requests, e.g. a Dutch-auction quote
/// returned for an ask that only requested classic routing.
#[derive(Clone, Copy, Debug, Default)]
pub struct OnlyConfiguredQuotersFilter;

impl QuoteFilter for OnlyConfiguredQuotersFilter {
    fn filter(&self, requests: &[QuoteRequest], quotes: Vec<Quote>) -> Vec<Quote> {
        let before = quotes.len();

        let kept: Vec<Quote> = quotes
            .into_iter()
            .filter(|quote| {
                requests
                    .iter()
                    .any(|request| request.matches(quote.routing_type(), quote.trade_type()))
            })
            .collect();

        #[cfg(feature = "tracing")]
        if kept.len() < before {
            tracing::debug!(
                removed = before - kept.len(),
                "removed quotes from unrequested quoters"
            );
        }
        #[cfg(not(feature = "tracing"))]
        let _: usize = before;

        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quote::{ClassicQuote, DutchQuote, RoutingType, TradeType};
    use crate::types::{U256, Uuid, address};

    fn request(routing_type: RoutingType) -> QuoteRequest {
        QuoteRequest::builder()
            .request_id(Uuid::nil())
            .token_in_chain_id(crate::MAINNET)
            .token_out_chain_id(crate::MAINNET)
            .token_in(address!("1f9840a85d5aF5bf1D1762F925BDADdC4201F984"))
            .token_out(address!("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"))
            .amount(U256::from(1_000))
            .trade_type(TradeType::ExactInput)
            .routing_type(routing_type)
            .build()
    }

    fn classic() -> Quote {
        ClassicQuote::builder()
            .request_id(Uuid::nil())
            .trade_type(TradeType::ExactInput)
            .amount(U256::from(1_000))
            .quote(U256::from(1_000))
            .quote_gas_adjusted(U256::from(500))
            .build()
            .into()
    }

    fn dutch() -> Quote {
        DutchQuote::builder()
            .request_id(Uuid::nil())
            .trade_type(TradeType::ExactInput)
            .token_in(address!("1f9840a85d5aF5bf1D1762F925BDADdC4201F984"))
            .token_out(address!("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"))
            .amount_in(U256::from(1_000))
            .amount_out(U256::from(1_000))
            .build()
            .into()
    }

    #[test]
    fn only_configured_quoters_drops_unrequested_routing() {
        let requests = [request(RoutingType::Classic)];

        let filtered = OnlyConfiguredQuotersFilter.filter(&requests, vec![dutch(), classic()]);

        assert_eq!(filtered, vec![classic()]);
    }

    #[test]
    fn only_configured_quoters_drops_mismatched_trade_type() {
        let requests = [request(RoutingType::Classic)];
        let Quote::Classic(mut exact_out) = classic() else {
            unreachable!("fixture is a classic quote")
        };
        exact_out.trade_type = TradeType::ExactOutput;

        let filtered = OnlyConfiguredQuotersFilter.filter(&requests, vec![exact_out.into()]);

        assert!(filtered.is_empty(), "exact-output quote answers no request");
    }

    #[test]
    fn empty_compound_filter_is_identity() {
        let quotes = vec![dutch(), classic()];

        let filtered = CompoundFilter::default().filter(&[], quotes.clone());

        assert_eq!(filtered, quotes);
    }

    #[test]
    fn compound_filter_applies_filters_in_order() {
        let requests = [request(RoutingType::Classic), request(RoutingType::DutchLimit)];
        let filter = CompoundFilter::default()
            .with(OnlyConfiguredQuotersFilter)
            .with(GoudaOrderSizeFilter::default());

        // classic gas cost is 50% of its quote, so the Dutch quote goes
        let filtered = filter.filter(&requests, vec![dutch(), classic()]);

        assert_eq!(filtered, vec![classic()]);
    }
}
