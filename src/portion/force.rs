use std::sync::{Arc, PoisonError, RwLock};

use super::types::{Portion, PortionResponse};

/// Operator-controlled switch that forces one portion answer for every token pair.
///
/// While active, [`PortionFetcher::get_portion`](super::PortionFetcher::get_portion)
/// returns the forced response without touching its cache or the network. There is
/// no expiry: the override stays in effect until [`PortionOverride::clear`] is called,
/// so leaving it on in a long-running process silently mis-prices every quote.
///
/// Clones share state. Hand one clone to the fetcher's [`Config`](super::Config) and
/// keep another wherever the override is toggled.
///
/// # Example
///
/// ```
/// use unified_routing_core::portion::PortionOverride;
///
/// let portion_override = PortionOverride::default();
/// let handle = portion_override.clone();
///
/// handle.force_flat();
/// assert!(portion_override.is_active());
///
/// handle.clear();
/// assert_eq!(portion_override.current(), None);
/// ```
#[derive(Clone, Debug, Default)]
pub struct PortionOverride {
    forced: Arc<RwLock<Option<PortionResponse>>>,
}

impl PortionOverride {
    /// Forces `response` for every subsequent lookup.
    pub fn force(&self, response: PortionResponse) {
        #[cfg(feature = "tracing")]
        tracing::warn!(?response, "portion override enabled");

        *self.forced.write().unwrap_or_else(PoisonError::into_inner) = Some(response);
    }

    /// Forces the flat rollout portion, see [`Portion::flat`].
    pub fn force_flat(&self) {
        self.force(PortionResponse::with_portion(Portion::flat()));
    }

    pub fn clear(&self) {
        #[cfg(feature = "tracing")]
        tracing::info!("portion override cleared");

        *self.forced.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// The forced response, if the override is active.
    #[must_use]
    pub fn current(&self) -> Option<PortionResponse> {
        *self.forced.read().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.current().is_some()
    }
}
