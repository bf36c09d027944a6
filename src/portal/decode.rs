//! Lenient decoding for the export API's numeric fields.
//!
//! The feed is not consistent about field types: `forbrukning` arrives
//! sometimes as a JSON number and sometimes as a numeric string, and the
//! date fields follow suit. Record types deserialize through these helpers
//! so either form is accepted.

use serde::{Deserialize as _, Deserializer};
use serde_derive::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Number(f64),
    Text(String),
}

impl RawNumber {
    fn into_f64<E: serde::de::Error>(self) -> Result<f64, E> {
        match self {
            RawNumber::Number(n) => Ok(n),
            RawNumber::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| E::custom(format!("failed to parse number from '{text}'"))),
        }
    }
}

/// Deserializes an `f64` from a JSON number or a numeric string.
pub fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    RawNumber::deserialize(deserializer)?.into_f64()
}

/// Deserializes an `i32` from a JSON number or a numeric string.
pub fn lenient_i32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    let value = RawNumber::deserialize(deserializer)?.into_f64::<D::Error>()?;
    Ok(value as i32)
}

/// Deserializes a `u32` from a JSON number or a numeric string.
pub fn lenient_u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = RawNumber::deserialize(deserializer)?.into_f64::<D::Error>()?;
    Ok(value as u32)
}
