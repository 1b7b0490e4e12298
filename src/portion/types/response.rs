use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::error::Error;
use crate::types::{Address, address};

/// Basis points charged by the flat portion used for staged rollouts.
pub const FLAT_PORTION_BPS: u32 = 15;

/// Recipient of the flat portion used for staged rollouts.
pub const FLAT_PORTION_RECIPIENT: Address = address!("0000000000000000000000000000000000000001");

/// A protocol fee taken on a swap.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Builder)]
pub struct Portion {
    /// Fee in basis points of the swapped amount.
    pub bps: u32,
    pub recipient: Address,
}

impl Portion {
    #[must_use]
    pub fn flat() -> Self {
        Self {
            bps: FLAT_PORTION_BPS,
            recipient: FLAT_PORTION_RECIPIENT,
        }
    }
}

/// Whether a portion applies to a token pair.
///
/// `has_portion: false` is a definitive answer and is cached like a positive one.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[serde(rename_all = "camelCase")]
pub struct PortionResponse {
    pub has_portion: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portion: Option<Portion>,
}

impl PortionResponse {
    /// The canonical "no portion" answer, also returned when the lookup fails.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            has_portion: false,
            portion: None,
        }
    }

    #[must_use]
    pub const fn with_portion(portion: Portion) -> Self {
        Self {
            has_portion: true,
            portion: Some(portion),
        }
    }

    /// Rejects a positive answer that does not say what the portion is.
    pub(crate) fn validate(self) -> Result<Self> {
        if self.has_portion && self.portion.is_none() {
            return Err(Error::validation("hasPortion is true but portion is missing"));
        }

        Ok(self)
    }
}

impl Default for PortionResponse {
    fn default() -> Self {
        Self::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Kind;

    #[test]
    fn deserialize_positive_response_should_succeed() {
        let json = serde_json::json!({
            "hasPortion": true,
            "portion": {
                "bps": 25,
                "recipient": "0x7FFC3DBF3B2b50Ff3A1D5523bc24Bb5043837B14"
            }
        });

        let response: PortionResponse = serde_json::from_value(json).expect("deserialize");

        let expected = PortionResponse::with_portion(
            Portion::builder()
                .bps(25)
                .recipient(address!("7FFC3DBF3B2b50Ff3A1D5523bc24Bb5043837B14"))
                .build(),
        );
        assert_eq!(response, expected);
    }

    #[test]
    fn deserialize_negative_response_should_succeed() {
        let json = serde_json::json!({ "hasPortion": false });

        let response: PortionResponse = serde_json::from_value(json).expect("deserialize");

        assert_eq!(response, PortionResponse::none());
        assert_eq!(
            serde_json::to_value(response).expect("serialize"),
            serde_json::json!({ "hasPortion": false })
        );
    }

    #[test]
    fn positive_without_portion_is_invalid() {
        let response = PortionResponse {
            has_portion: true,
            portion: None,
        };

        let err = response.validate().unwrap_err();
        assert_eq!(err.kind(), Kind::Validation);
    }

    #[test]
    fn flat_portion_is_positive() {
        let response = PortionResponse::with_portion(Portion::flat());

        assert!(response.has_portion);
        assert_eq!(response.portion.map(|p| p.bps), Some(FLAT_PORTION_BPS));
        response.validate().expect("flat portion is valid");
    }
}
