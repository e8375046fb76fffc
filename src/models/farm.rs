use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use super::amount_serde;
use super::FeeFraction;

/// One entry of a staking-farm pool's `get_farms` listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Farm {
    pub farm_id: u64,
    #[serde(default)]
    pub name: String,
    pub token_id: String,
    pub active: bool,
}

/// Unclaimed balance of one farm for one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnclaimedReward {
    pub farm_id: u64,
    pub token_id: String,
    pub active: bool,
    #[serde(with = "amount_serde")]
    pub balance: BigUint,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSummary {
    pub owner: String,
    #[serde(with = "amount_serde")]
    pub total_staked_balance: BigUint,
    pub reward_fee_fraction: FeeFraction,
}
