use futures::stream::{self, StreamExt};
use log::{info, warn};
use num_bigint::BigUint;
use num_traits::Zero;

use super::staking_pool::StakingPoolContract;
use crate::error::RpcResult;
use crate::models::{Network, UnclaimedReward};
use crate::utils::validator_versions::is_farming_validator;

pub const DEFAULT_FARM_PAGE_LIMIT: u64 = 300;

pub struct FarmRewardAggregator {
    pools: StakingPoolContract,
    network: Network,
    parallel_limit: usize,
}

impl FarmRewardAggregator {
    pub fn new(pools: StakingPoolContract, network: Network, parallel_limit: usize) -> Self {
        Self {
            pools,
            network,
            parallel_limit: parallel_limit.max(1),
        }
    }

    pub async fn has_unclaimed_rewards(&self, validator_id: &str, account_id: &str) -> RpcResult<bool> {
        let rewards = self
            .list_rewards(validator_id, account_id, 0, DEFAULT_FARM_PAGE_LIMIT)
            .await?;
        Ok(rewards.iter().any(|reward| !reward.balance.is_zero()))
    }

    /// Unclaimed rewards of `account_id` for one page of the validator's
    /// farms, in farm-list order.
    ///
    /// A farm whose reward query fails is reported with a zero balance. Only a
    /// failure to list the farms fails the call.
    pub async fn list_rewards(
        &self,
        validator_id: &str,
        account_id: &str,
        from_index: u64,
        limit: u64,
    ) -> RpcResult<Vec<UnclaimedReward>> {
        if !is_farming_validator(self.network, validator_id) {
            return Ok(Vec::new());
        }

        let farms = self.pools.get_farms(validator_id, from_index, limit).await?;
        info!(
            "Fetching unclaimed rewards of {} in {} farms of {}",
            account_id,
            farms.len(),
            validator_id
        );

        let rewards = stream::iter(farms)
            .map(|farm| async move {
                let balance = match self
                    .pools
                    .get_unclaimed_reward(validator_id, account_id, farm.farm_id)
                    .await
                {
                    Ok(balance) => balance,
                    Err(e) => {
                        warn!(
                            "Unclaimed reward of farm {} on {} unavailable, using 0: {}",
                            farm.farm_id, validator_id, e
                        );
                        BigUint::zero()
                    }
                };
                UnclaimedReward {
                    farm_id: farm.farm_id,
                    token_id: farm.token_id,
                    active: farm.active,
                    balance,
                }
            })
            .buffered(self.parallel_limit)
            .collect::<Vec<_>>()
            .await;

        Ok(rewards)
    }
}
