//! Serde helpers for token amounts and tolerant response decoding.
//!
//! When the `tracing` feature is enabled, [`deserialize_with_warnings`] also logs
//! any unknown fields returned by an upstream service, which is usually the first
//! sign that its response shape changed.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::types::U256;

/// A `serde_as` type for raw token amounts.
///
/// Deserializes a decimal string (`"1000000000000000000"`), a `0x`-prefixed hex string
/// or a JSON integer into [`U256`], and always serializes back to a decimal string, which
/// is how quoters put amounts on the wire.
///
/// Use with `#[serde_as(as = "AmountFromAny")]`.
pub struct AmountFromAny;

impl<'de> serde_with::DeserializeAs<'de, U256> for AmountFromAny {
    fn deserialize_as<D>(deserializer: D) -> std::result::Result<U256, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use std::fmt;
        use std::str::FromStr as _;

        use serde::de::{self, Visitor};

        struct AmountVisitor;

        impl Visitor<'_> for AmountVisitor {
            type Value = U256;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a non-negative integer amount as string or number")
            }

            fn visit_str<E>(self, v: &str) -> std::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                U256::from_str(v.trim()).map_err(|e| E::custom(format!("invalid amount {v:?}: {e}")))
            }

            fn visit_u64<E>(self, v: u64) -> std::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(U256::from(v))
            }

            fn visit_i64<E>(self, v: i64) -> std::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                u64::try_from(v)
                    .map(U256::from)
                    .map_err(|_e| E::custom(format!("negative amount {v}")))
            }
        }

        deserializer.deserialize_any(AmountVisitor)
    }
}

impl serde_with::SerializeAs<U256> for AmountFromAny {
    fn serialize_as<S>(source: &U256, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(source)
    }
}

/// Deserialize JSON with unknown field warnings.
///
/// Unknown fields trigger warnings but do not cause deserialization to fail. On
/// failure, the offending path and value are logged before the error is returned.
#[cfg(feature = "tracing")]
pub fn deserialize_with_warnings<T: DeserializeOwned>(value: Value) -> crate::Result<T> {
    use std::any::type_name;

    tracing::trace!(
        type_name = %type_name::<T>(),
        json = %value,
        "deserializing JSON"
    );

    let original = value.clone();
    let mut unknown_paths: Vec<String> = Vec::new();

    let result: T = serde_ignored::deserialize(value, |path| {
        unknown_paths.push(path.to_string());
    })
    .inspect_err(|_| {
        let json_str = original.to_string();
        let jd = &mut serde_json::Deserializer::from_str(&json_str);
        let path_result: Result<T, _> = serde_path_to_error::deserialize(jd);
        if let Err(path_err) = path_result {
            let path = path_err.path().to_string();
            tracing::error!(
                type_name = %type_name::<T>(),
                path = %path,
                value = %format_value(lookup_value(&original, &path)),
                error = %path_err.inner(),
                "deserialization failed"
            );
        }
    })?;

    for path in unknown_paths {
        tracing::warn!(
            type_name = %type_name::<T>(),
            field = %path,
            value = %format_value(lookup_value(&original, &path)),
            "unknown field in API response"
        );
    }

    Ok(result)
}

/// Pass-through deserialization when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub fn deserialize_with_warnings<T: DeserializeOwned>(value: Value) -> crate::Result<T> {
    Ok(serde_json::from_value(value)?)
}

/// Look up a value in a JSON object by a `serde_ignored` / `serde_path_to_error` path.
///
/// Portion responses are flat objects with one nested level, so only dotted object
/// paths are resolved; `?` segments (Option wrappers) are skipped.
#[cfg(feature = "tracing")]
fn lookup_value<'value>(value: &'value Value, path: &str) -> Option<&'value Value> {
    path.split('.')
        .filter(|segment| !segment.is_empty() && *segment != "?")
        .try_fold(value, |current, segment| match current {
            Value::Object(map) => map.get(segment),
            Value::Array(arr) => arr.get(segment.parse::<usize>().ok()?),
            _ => None,
        })
}

#[cfg(feature = "tracing")]
fn format_value(value: Option<&Value>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "<unable to retrieve>".to_owned(),
    }
}
