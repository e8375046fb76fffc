//! Serde helpers for on-chain amounts, which travel as decimal integer strings.

use num_bigint::BigUint;
use serde::{self, Deserialize, Deserializer, Serializer};
use std::str::FromStr;

pub fn serialize<S>(amount: &BigUint, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&amount.to_string())
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<BigUint, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    BigUint::from_str(&raw)
        .map_err(|_| serde::de::Error::custom(format!("expecting integer string, got {:?}", raw)))
}
