use alloy::primitives::U512;
use bon::Builder;

use super::QuoteFilter;
use crate::quote::{ClassicQuote, DutchQuote, Quote, QuoteRequest, RoutingType, TradeType};
use crate::types::U256;

/// Gas cost share, in basis points, at or above which a Dutch-auction quote is dropped.
pub const DEFAULT_GAS_COST_THRESHOLD_BPS: u32 = 1_000;

const BPS_DENOMINATOR: u32 = 10_000;

/// The amount the classic route's gas cost is measured against.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GasCostBasis {
    /// The classic quote's own `quote` amount.
    #[default]
    ClassicNotional,
    /// The competing Dutch quote's [`DutchQuote::notional`]. A classic route whose gas
    /// is negligible against its own size can still be expensive relative to a small
    /// Dutch order.
    DutchNotional,
}

/// Removes Dutch-auction quotes when the competing classic route spends too large a
/// share of the trade on gas.
///
/// Quotes are grouped by trade type. A group is only considered when it holds a
/// classic quote that carries a gas estimate and at least one Dutch quote, each
/// answering one of the requests. Classic quotes are never removed.
///
/// # Example
///
/// ```
/// use unified_routing_core::filter::{GasCostBasis, GoudaOrderSizeFilter};
///
/// let filter = GoudaOrderSizeFilter::builder()
///     .threshold_bps(1_000)
///     .basis(GasCostBasis::DutchNotional)
///     .build();
///
/// assert_eq!(filter.threshold_bps(), 1_000);
/// ```
#[derive(Clone, Copy, Debug, Builder)]
pub struct GoudaOrderSizeFilter {
    #[builder(default = DEFAULT_GAS_COST_THRESHOLD_BPS)]
    threshold_bps: u32,
    #[builder(default)]
    basis: GasCostBasis,
}

impl Default for GoudaOrderSizeFilter {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Gas figures of the classic quote heading one trade-type group.
#[derive(Clone, Copy)]
struct ClassicReference {
    trade_type: TradeType,
    gas_cost: U256,
    notional: U256,
}

impl GoudaOrderSizeFilter {
    #[must_use]
    pub fn threshold_bps(&self) -> u32 {
        self.threshold_bps
    }

    #[must_use]
    pub fn basis(&self) -> GasCostBasis {
        self.basis
    }

    /// Whether `gas_cost / denominator >= threshold_bps / 10_000`, evaluated exactly.
    fn exceeds_threshold(&self, gas_cost: U256, denominator: U256) -> bool {
        U512::from(gas_cost) * U512::from(BPS_DENOMINATOR)
            >= U512::from(self.threshold_bps) * U512::from(denominator)
    }

    fn should_drop(&self, reference: &ClassicReference, dutch: &DutchQuote) -> bool {
        let denominator = match self.basis {
            GasCostBasis::ClassicNotional => reference.notional,
            GasCostBasis::DutchNotional => dutch.notional(),
        };

        self.exceeds_threshold(reference.gas_cost, denominator)
    }

    fn references(requests: &[QuoteRequest], quotes: &[Quote]) -> Vec<ClassicReference> {
        [TradeType::ExactInput, TradeType::ExactOutput]
            .into_iter()
            .filter(|trade_type| {
                [RoutingType::Classic, RoutingType::DutchLimit]
                    .into_iter()
                    .all(|routing_type| {
                        requests
                            .iter()
                            .any(|request| request.matches(routing_type, *trade_type))
                    })
            })
            .filter_map(|trade_type| {
                let classics: Vec<&ClassicQuote> = quotes
                    .iter()
                    .filter_map(Quote::as_classic)
                    .filter(|quote| quote.trade_type == trade_type)
                    .collect();

                let Some(classic) = classics.iter().find(|quote| quote.has_gas_estimate()) else {
                    #[cfg(feature = "tracing")]
                    if !classics.is_empty() {
                        tracing::debug!(trade_type = %trade_type, "no classic quote has a gas estimate, skipping");
                    }
                    return None;
                };

                Some(reference(classic))
            })
            .collect()
    }
}

fn reference(classic: &ClassicQuote) -> ClassicReference {
    ClassicReference {
        trade_type: classic.trade_type,
        gas_cost: classic.gas_cost(),
        notional: classic.quote,
    }
}

impl QuoteFilter for GoudaOrderSizeFilter {
    fn filter(&self, requests: &[QuoteRequest], quotes: Vec<Quote>) -> Vec<Quote> {
        let references = Self::references(requests, &quotes);
        if references.is_empty() {
            return quotes;
        }

        quotes
            .into_iter()
            .filter(|quote| {
                let Quote::Dutch(dutch) = quote else {
                    return true;
                };
                let Some(reference) = references
                    .iter()
                    .find(|reference| reference.trade_type == dutch.trade_type)
                else {
                    return true;
                };

                let remove = self.should_drop(reference, dutch);

                #[cfg(feature = "tracing")]
                if remove {
                    tracing::debug!(
                        request_id = %dutch.request_id,
                        trade_type = %dutch.trade_type,
                        gas_cost = %reference.gas_cost,
                        classic_notional = %reference.notional,
                        dutch_notional = %dutch.notional(),
                        threshold_bps = self.threshold_bps,
                        "removing Dutch quote, classic gas cost exceeds threshold"
                    );
                }

                !remove
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_threshold_is_ten_percent_of_classic() {
        let filter = GoudaOrderSizeFilter::default();

        assert_eq!(filter.threshold_bps(), 1_000);
        assert_eq!(filter.basis(), GasCostBasis::ClassicNotional);
    }

    #[test]
    fn threshold_is_inclusive() {
        let filter = GoudaOrderSizeFilter::default();

        assert!(filter.exceeds_threshold(U256::from(100), U256::from(1_000)));
        assert!(!filter.exceeds_threshold(U256::from(99), U256::from(1_000)));
    }

    #[test]
    fn threshold_does_not_overflow_on_max_amounts() {
        let filter = GoudaOrderSizeFilter::default();

        assert!(filter.exceeds_threshold(U256::MAX, U256::MAX));
        assert!(!filter.exceeds_threshold(U256::MAX / U256::from(11), U256::MAX));
    }

    #[test]
    fn zero_denominator_with_gas_drops() {
        let filter = GoudaOrderSizeFilter::default();

        assert!(filter.exceeds_threshold(U256::from(1), U256::ZERO));
    }
}
