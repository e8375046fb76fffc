use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnstakeMode {
    /// Swap through the liquidity pool now, paying the pool fee.
    Instant,
    /// Wait out the unbonding period, no fee.
    Delayed,
}

impl fmt::Display for UnstakeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnstakeMode::Instant => f.write_str("instant"),
            UnstakeMode::Delayed => f.write_str("delayed"),
        }
    }
}

/// A validated unstake, built right before dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnstakeRequest {
    pub amount: String,
    pub amount_yocto: BigUint,
    pub mode: UnstakeMode,
    pub min_expected_output: Option<BigUint>,
}
