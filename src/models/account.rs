use chrono::{DateTime, Utc};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use super::amount_serde;

/// Native balances of an account, as returned by a `view_account` query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountView {
    pub amount: BigUint,
    pub locked: BigUint,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountBalanceSnapshot {
    pub account_id: String,
    #[serde(with = "amount_serde")]
    pub available: BigUint,
    #[serde(with = "amount_serde")]
    pub locked: BigUint,
    /// Liquid staking token balance, the upper bound for an unstake.
    #[serde(with = "amount_serde")]
    pub st_near: BigUint,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub refreshed_at: DateTime<Utc>,
}
