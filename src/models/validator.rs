use serde::{Deserialize, Serialize};

use super::Network;
use crate::utils::validator_versions::validator_version;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidatorVersion {
    Legacy,
    Farming,
}

/// Reward fee as returned by `get_reward_fee_fraction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeFraction {
    pub numerator: u64,
    pub denominator: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RewardFee {
    pub numerator: u64,
    pub denominator: u64,
    /// Percent with two decimals, e.g. `7.5` for 3/40.
    pub percentage: f64,
}

impl RewardFee {
    pub fn fraction(&self) -> FeeFraction {
        FeeFraction {
            numerator: self.numerator,
            denominator: self.denominator,
        }
    }
}

impl FeeFraction {
    /// `None` when the denominator is zero.
    pub fn to_reward_fee(self) -> Option<RewardFee> {
        if self.denominator == 0 {
            return None;
        }
        let percent = self.numerator as f64 / self.denominator as f64 * 100.0;
        Some(RewardFee {
            numerator: self.numerator,
            denominator: self.denominator,
            percentage: (percent * 100.0).round() / 100.0,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Validator {
    pub account_id: String,
    pub active: bool,
    pub version: ValidatorVersion,
    /// Set once the reward fee has been resolved.
    pub fee_fraction: Option<FeeFraction>,
}

impl Validator {
    pub fn new(network: Network, account_id: &str, active: bool) -> Self {
        Self {
            account_id: account_id.to_string(),
            active,
            version: validator_version(network, account_id),
            fee_fraction: None,
        }
    }

    pub fn is_farming(&self) -> bool {
        self.version == ValidatorVersion::Farming
    }
}
