//! Forgiving decoders for backend documents.
//!
//! The backend stores loosely typed documents: `null` where a value is expected, numbers
//! sent as strings, integral values sent as floats. Fields decoded through these helpers
//! fall back to a default instead of failing the surrounding record.

use crate::types::{ProductId, Timestamp};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Deserializer};

/// A value that decoded as `T`, or anything else.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Lenient<T> {
    Valid(T),
    Invalid(IgnoredAny),
}

impl<T> Lenient<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Valid(value) => Some(value),
            Self::Invalid(_) => None,
        }
    }
}

/// Decodes a JSON array of records, dropping elements that are not records at all.
///
/// Returns the records and the number of dropped elements. Fails only when the body is
/// not a JSON array.
pub fn decode_collection<T: DeserializeOwned>(bytes: &[u8]) -> serde_json::Result<(Vec<T>, usize)> {
    let raw: Vec<Lenient<T>> = serde_json::from_slice(bytes)?;
    let total = raw.len();
    let records: Vec<T> = raw.into_iter().filter_map(Lenient::into_option).collect();
    let dropped = total - records.len();
    Ok((records, dropped))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Bool(bool),
    Int(i64),
    Unsigned(u64),
    Float(f64),
    Text(String),
    Other(IgnoredAny),
}

fn integral(value: f64) -> Option<i64> {
    let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64;
    (value.is_finite() && value.fract() == 0.0 && in_range).then_some(value as i64)
}

impl Scalar {
    fn into_text(self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text),
            Self::Int(n) => Some(n.to_string()),
            Self::Unsigned(n) => Some(n.to_string()),
            Self::Float(f) => Some(f.to_string()),
            Self::Bool(_) | Self::Other(_) => None,
        }
    }

    fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Unsigned(n) => i64::try_from(*n).ok(),
            Self::Float(f) => integral(*f),
            Self::Text(text) => {
                let text = text.trim();
                text.parse::<i64>()
                    .ok()
                    .or_else(|| text.parse::<f64>().ok().and_then(integral))
            }
            Self::Bool(_) | Self::Other(_) => None,
        }
    }

    fn as_float(&self) -> Option<f64> {
        match self {
            Self::Int(n) => Some(*n as f64),
            Self::Unsigned(n) => Some(*n as f64),
            Self::Float(f) => Some(*f),
            Self::Text(text) => text.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
            Self::Bool(_) | Self::Other(_) => None,
        }
    }

    fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Int(n) => Some(*n != 0),
            Self::Unsigned(n) => Some(*n != 0),
            Self::Text(text) => match text.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => Some(true),
                "false" | "0" | "no" | "" => Some(false),
                _ => None,
            },
            Self::Float(_) | Self::Other(_) => None,
        }
    }
}

fn scalar<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Scalar>, D::Error> {
    Option::<Scalar>::deserialize(deserializer)
}

/// Text or number as a string; anything else is empty.
pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(opt_text(deserializer)?.unwrap_or_default())
}

pub fn opt_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(scalar(deserializer)?.and_then(Scalar::into_text))
}

pub fn product_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ProductId, D::Error> {
    text(deserializer).map(ProductId)
}

/// Non-negative whole number; `2`, `2.0` and `"2"` all read as 2. Anything else is 0.
pub fn quantity<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let count = match scalar(deserializer)? {
        Some(Scalar::Unsigned(n)) => Some(n),
        Some(value) => value.as_int().and_then(|n| u64::try_from(n).ok()),
        None => None,
    };
    Ok(count.unwrap_or(0))
}

/// Whole number, `None` when absent or not numeric.
pub fn opt_int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    Ok(scalar(deserializer)?.and_then(|value| value.as_int()))
}

pub fn opt_float<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(scalar(deserializer)?.and_then(|value| value.as_float()))
}

pub fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(scalar(deserializer)?
        .and_then(|value| value.as_flag())
        .unwrap_or(false))
}

/// A list of records. `null` or a non-list is empty; undecodable elements are dropped.
pub fn records<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let list = Option::<Lenient<Vec<Lenient<T>>>>::deserialize(deserializer)?
        .and_then(Lenient::into_option)
        .unwrap_or_default();
    Ok(list.into_iter().filter_map(Lenient::into_option).collect())
}

/// A timestamp, `None` when absent or of an unusable type.
pub fn timestamp<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Timestamp>, D::Error> {
    Ok(Option::<Lenient<Timestamp>>::deserialize(deserializer)?.and_then(Lenient::into_option))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Product, Review};

    #[test]
    fn test_integral_floats() {
        assert_eq!(integral(2.0), Some(2));
        assert_eq!(integral(-3.0), Some(-3));
        assert_eq!(integral(2.5), None);
        assert_eq!(integral(f64::NAN), None);
        assert_eq!(integral(1e30), None);
    }

    #[test]
    fn test_collection_drops_non_records() {
        let (reviews, dropped) = decode_collection::<Review>(
            br#"[{"productName": "Soap", "note": 4}, null, "junk", {"productName": "Oil"}]"#,
        )
        .unwrap();
        assert_eq!(reviews.len(), 2);
        assert_eq!(dropped, 2);
    }

    #[test]
    fn test_collection_must_be_an_array() {
        assert!(decode_collection::<Product>(br#"{"error": "nope"}"#).is_err());
    }
}
