use serde::de::{Deserialize, Deserializer};
use serde::ser::{Error, Serializer};

/// Strings that may be sent as `null`
///
/// A `null` is read as the empty string, which is also what an omitted key gives.
pub fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.unwrap_or_default())
}

/// Numbers that must have a json representation
///
/// NaN and infinities fail to encode instead of silently becoming `null`.
/// How the number is written is up to the json formatter in `codec`.
pub fn finite_number<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match *value {
        None => serializer.serialize_none(),
        Some(n) if !n.is_finite() => Err(S::Error::custom(format!("unsupported value: {}", n))),
        Some(n) => serializer.serialize_f64(n),
    }
}
