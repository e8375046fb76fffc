use log::{debug, info};
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::staking_pool::StakingPoolContract;
use crate::error::{FeeError, FeeResult};
use crate::models::{RewardFee, Validator};

/// Resolves validator reward fees. Results are kept for the lifetime of the
/// resolver, which is one wallet session.
pub struct ValidatorFeeResolver {
    pools: StakingPoolContract,
    cache: RwLock<HashMap<String, RewardFee>>,
}

impl ValidatorFeeResolver {
    pub fn new(pools: StakingPoolContract) -> Self {
        Self {
            pools,
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub async fn resolve_fee(&self, validator_id: &str) -> FeeResult<RewardFee> {
        if validator_id.is_empty() {
            return Err(FeeError::EmptyValidatorId);
        }
        if let Some(fee) = self.cache.read().await.get(validator_id) {
            debug!("Reward fee of {} served from cache", validator_id);
            return Ok(*fee);
        }

        let fraction = self.pools.get_reward_fee_fraction(validator_id).await?;
        let fee = fraction
            .to_reward_fee()
            .ok_or(FeeError::InvalidFraction {
                numerator: fraction.numerator,
                denominator: fraction.denominator,
            })?;
        info!("Reward fee of {}: {}%", validator_id, fee.percentage);

        self.cache
            .write()
            .await
            .insert(validator_id.to_string(), fee);
        Ok(fee)
    }

    /// Resolves the fee of `validator` and records its fraction on it.
    /// Inactive validators have no fee to show and are not queried.
    pub async fn fee_for(&self, validator: &mut Validator) -> FeeResult<Option<RewardFee>> {
        if !validator.active {
            return Ok(None);
        }
        let fee = self.resolve_fee(&validator.account_id).await?;
        validator.fee_fraction = Some(fee.fraction());
        Ok(Some(fee))
    }
}
