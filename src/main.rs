use dotenv::dotenv;
use log::{error, info, warn};
use num_traits::Zero;
use std::sync::Arc;

use near_staking_core::error::StakingError;
use near_staking_core::models::{UnstakeMode, Validator};
use near_staking_core::services::{
    create_near_connections, AccountBalanceStore, FarmRewardAggregator, MetaPoolContract,
    StakingPoolContract, ValidatorFeeResolver, ViewClient,
};
use near_staking_core::utils::amount::{
    format_near_amount, parse_near_amount, DISPLAY_FRAC_DIGITS,
};
use near_staking_core::Config;

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::init();

    if let Err(e) = run().await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), StakingError> {
    let config = Config::from_env()?;
    info!(
        "Inspecting staking state of {} on {}",
        config.account_id, config.network
    );

    let client: Arc<dyn ViewClient> = Arc::new(
        create_near_connections(&config.primary_rpc, &config.secondary_rpc)
            .with_timeout(config.rpc_timeout),
    );
    let pools = StakingPoolContract::new(client.clone());
    let metapool = MetaPoolContract::new(client.clone(), &config.metapool_contract_id);

    let mut validator = Validator::new(config.network, &config.validator_account_id, true);
    let fees = ValidatorFeeResolver::new(pools.clone());
    match fees.fee_for(&mut validator).await? {
        Some(fee) => info!(
            "{} ({:?}) takes {}% of rewards",
            validator.account_id, validator.version, fee.percentage
        ),
        None => info!("{} is inactive", validator.account_id),
    }

    let farms = FarmRewardAggregator::new(pools, config.network, config.parallel_limit);
    let rewards = farms
        .list_rewards(
            &validator.account_id,
            &config.account_id,
            0,
            config.farm_page_limit,
        )
        .await?;
    for reward in &rewards {
        info!(
            "Farm {} ({}): {} unclaimed",
            reward.farm_id, reward.token_id, reward.balance
        );
    }
    info!(
        "Unclaimed farm rewards: {}",
        rewards.iter().any(|reward| !reward.balance.is_zero())
    );

    let balances = AccountBalanceStore::new(client.clone(), metapool.clone());
    let snapshot = balances.refresh(&config.account_id).await?;
    info!(
        "Available {} NEAR, stNEAR {}",
        format_near_amount(&snapshot.available, DISPLAY_FRAC_DIGITS),
        format_near_amount(&snapshot.st_near, DISPLAY_FRAC_DIGITS)
    );

    match metapool.liquid_unstake_fee().await {
        Ok(fee) => info!(
            "Unstake fee: {} {}%, {} 0%",
            UnstakeMode::Instant,
            fee,
            UnstakeMode::Delayed
        ),
        Err(e) => warn!("Liquid unstake fee unavailable: {}", e),
    }

    if let Some(amount) = &config.unstake_amount {
        match parse_near_amount(amount) {
            Some(yocto) => {
                let quote = metapool.get_near_amount_sell_stnear(&yocto).await?;
                info!(
                    "Instant unstake of {} stNEAR returns ~{} NEAR",
                    amount,
                    format_near_amount(&quote, DISPLAY_FRAC_DIGITS)
                );
            }
            None => warn!("UNSTAKE_AMOUNT {:?} is not a decimal amount", amount),
        }
    }

    Ok(())
}
