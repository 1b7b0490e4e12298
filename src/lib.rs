#![cfg_attr(doc, doc = include_str!("../README.md"))]

pub mod cache;
pub mod error;
pub mod filter;
pub mod portion;
pub mod quote;
pub(crate) mod serde_helpers;
pub mod types;

use reqwest::Request;
use serde::de::DeserializeOwned;

use crate::error::Error;
use crate::types::ChainId;

pub type Result<T> = std::result::Result<T, Error>;

/// [`ChainId`] for Ethereum mainnet
pub const MAINNET: ChainId = 1;

/// [`ChainId`] for Arbitrum One
pub const ARBITRUM: ChainId = 42_161;

/// [`ChainId`] for Base
pub const BASE: ChainId = 8_453;

/// Environment variable holding the base URL of the portion service.
pub const PORTION_API_URL_VAR: &str = "PORTION_API_URL";

/// Environment variable that turns portion lookups on when set to `"true"`.
pub const ENABLE_PORTION_VAR: &str = "ENABLE_PORTION";

#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        level = "debug",
        skip(client, request),
        fields(
            method = %request.method(),
            path = request.url().path(),
            status_code
        )
    )
)]
async fn request<Response: DeserializeOwned>(
    client: &reqwest::Client,
    request: Request,
) -> Result<Response> {
    let method = request.method().clone();
    let path = request.url().path().to_owned();

    let response = client.execute(request).await?;
    let status_code = response.status();

    #[cfg(feature = "tracing")]
    tracing::Span::current().record("status_code", status_code.as_u16());

    if !status_code.is_success() {
        let message = response.text().await.unwrap_or_default();

        #[cfg(feature = "tracing")]
        tracing::warn!(
            status = %status_code,
            method = %method,
            path = %path,
            message = %message,
            "API request failed"
        );

        return Err(Error::status(status_code, method, path, message));
    }

    let json_value = response.json::<serde_json::Value>().await?;
    serde_helpers::deserialize_with_warnings(json_value)
}
