use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use bon::Builder;
use reqwest::{
    Client as ReqwestClient, Method,
    header::{HeaderMap, HeaderValue},
};
use url::Url;

use super::types::{PortionKey, PortionRequest, PortionResponse};
use super::{
    DEFAULT_NEGATIVE_CACHE_ENTRY_TTL, DEFAULT_POSITIVE_CACHE_ENTRY_TTL, DEFAULT_PURGE_INTERVAL,
    PortionOverride,
};
use crate::cache::{Cache, TtlCache};
use crate::error::Error;
use crate::{ENABLE_PORTION_VAR, PORTION_API_URL_VAR, Result};

/// Configuration for [`PortionFetcher`]
#[derive(Clone, Debug, Builder)]
pub struct Config {
    /// TTL of cached responses with `has_portion: true`.
    #[builder(default = DEFAULT_POSITIVE_CACHE_ENTRY_TTL)]
    positive_ttl: Duration,
    /// TTL of cached responses with `has_portion: false`.
    #[builder(default = DEFAULT_NEGATIVE_CACHE_ENTRY_TTL)]
    negative_ttl: Duration,
    /// When false, every pair resolves to no portion unless the override is active.
    #[builder(default = true)]
    enabled: bool,
    /// Number of cache misses between sweeps of expired entries. Zero disables sweeping.
    #[builder(default = DEFAULT_PURGE_INTERVAL)]
    purge_interval: u64,
    #[builder(default)]
    portion_override: PortionOverride,
}

impl Default for Config {
    fn default() -> Self {
        Config::builder().build()
    }
}

impl Config {
    #[must_use]
    pub fn positive_ttl(&self) -> Duration {
        self.positive_ttl
    }

    #[must_use]
    pub fn negative_ttl(&self) -> Duration {
        self.negative_ttl
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub fn purge_interval(&self) -> u64 {
        self.purge_interval
    }

    fn ttl_for(&self, response: &PortionResponse) -> Duration {
        if response.has_portion {
            self.positive_ttl
        } else {
            self.negative_ttl
        }
    }
}

/// Client for the portion service with a response cache in front of it.
///
/// The cache defaults to an in-memory [`TtlCache`]; any [`Cache`] keyed by
/// [`PortionKey`] can be supplied through [`PortionFetcher::with_cache`]. Every
/// [`Config::purge_interval`] cache misses the fetcher calls [`Cache::purge_expired`],
/// so entries for pairs that are never asked about again do not pile up.
///
/// The host is treated as a directory: `https://example.org/api` and
/// `https://example.org/api/` both resolve the endpoint to `https://example.org/api/portion`.
#[derive(Clone, Debug)]
pub struct PortionFetcher<C = TtlCache<PortionKey, PortionResponse>> {
    host: Url,
    client: ReqwestClient,
    config: Config,
    cache: C,
    misses: Arc<AtomicU64>,
}

impl PortionFetcher {
    /// Creates a fetcher with a fresh in-memory cache.
    ///
    /// # Errors
    ///
    /// Returns an error if the host URL is invalid or the HTTP client fails to build.
    pub fn new(host: &str, config: Config) -> Result<Self> {
        Self::with_cache(host, config, TtlCache::new())
    }

    /// Creates a fetcher from [`PORTION_API_URL_VAR`] and [`ENABLE_PORTION_VAR`].
    ///
    /// # Errors
    ///
    /// Returns an error if the host variable is unset or not a valid URL.
    pub fn from_env() -> Result<Self> {
        let host = std::env::var(PORTION_API_URL_VAR)
            .map_err(|e| Error::validation(format!("{PORTION_API_URL_VAR}: {e}")))?;
        let enabled = enabled_from(std::env::var(ENABLE_PORTION_VAR).ok().as_deref());

        Self::new(&host, Config::builder().enabled(enabled).build())
    }
}

/// Parses `host` and makes sure its path ends with `/`, so relative endpoints are
/// appended to it rather than replacing its last segment.
fn base_url(host: &str) -> Result<Url> {
    let mut url = Url::parse(host)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

fn enabled_from(value: Option<&str>) -> bool {
    value.is_some_and(|value| value.trim().eq_ignore_ascii_case("true"))
}

impl<C: Cache<PortionKey, PortionResponse>> PortionFetcher<C> {
    /// Creates a fetcher backed by `cache`.
    ///
    /// # Errors
    ///
    /// Returns an error if the host URL is invalid or the HTTP client fails to build.
    pub fn with_cache(host: &str, config: Config, cache: C) -> Result<Self> {
        let mut headers = HeaderMap::new();

        headers.insert("User-Agent", HeaderValue::from_static("unified_routing_core"));
        headers.insert("Accept", HeaderValue::from_static("application/json"));
        headers.insert("Connection", HeaderValue::from_static("keep-alive"));
        let client = ReqwestClient::builder().default_headers(headers).build()?;

        Ok(Self {
            host: base_url(host)?,
            client,
            config,
            cache,
            misses: Arc::new(AtomicU64::new(0)),
        })
    }

    /// Returns the host URL for the fetcher.
    #[must_use]
    pub fn host(&self) -> &Url {
        &self.host
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// The override handle consulted before anything else.
    #[must_use]
    pub fn portion_override(&self) -> &PortionOverride {
        &self.config.portion_override
    }

    /// Resolves the portion for a token pair. Never fails; see the
    /// [module documentation](super) for the lookup order.
    pub async fn get_portion(&self, request: &PortionRequest) -> PortionResponse {
        let key = request.key();

        if let Some(forced) = self.config.portion_override.current() {
            #[cfg(feature = "tracing")]
            tracing::debug!(key = %key, "portion override active");
            return forced;
        }

        if !self.config.enabled {
            return PortionResponse::none();
        }

        if let Some(cached) = self.cache.get(&key) {
            #[cfg(feature = "tracing")]
            tracing::trace!(key = %key, has_portion = cached.has_portion, "cache hit: portion");
            return cached;
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(key = %key, "cache miss: portion");

        self.sweep_on_miss();

        match self.fetch(request).await {
            Ok(response) => {
                let ttl = self.config.ttl_for(&response);
                self.cache.set(key, response, ttl);

                #[cfg(feature = "tracing")]
                tracing::trace!(ttl_secs = ttl.as_secs(), "cached portion");

                response
            }
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(key = %key, error = %err, "portion lookup failed, assuming no portion");
                #[cfg(not(feature = "tracing"))]
                let _: Error = err;

                PortionResponse::none()
            }
        }
    }

    fn sweep_on_miss(&self) {
        let interval = self.config.purge_interval;
        if interval == 0 {
            return;
        }

        let misses = self.misses.fetch_add(1, Ordering::Relaxed) + 1;
        if misses.is_multiple_of(interval) {
            #[cfg(feature = "tracing")]
            tracing::trace!(misses, "purging expired portion cache entries");

            self.cache.purge_expired();
        }
    }

    /// Makes a single request to the portion service, bypassing cache and override.
    pub async fn fetch(&self, request: &PortionRequest) -> Result<PortionResponse> {
        let request = self
            .client
            .request(Method::GET, self.host.join("portion")?)
            .query(&request.query())
            .build()?;

        crate::request::<PortionResponse>(&self.client, request)
            .await?
            .validate()
    }
}
