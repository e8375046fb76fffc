pub mod balance_store;
pub mod farm_rewards;
pub mod fee_resolver;
pub mod metapool;
pub mod near_rpc;
pub mod signer;
pub mod staking_pool;
pub mod unstake;

pub use balance_store::AccountBalanceStore;
pub use farm_rewards::FarmRewardAggregator;
pub use fee_resolver::ValidatorFeeResolver;
pub use metapool::MetaPoolContract;
pub use near_rpc::{create_near_connections, NearRpcClient, ViewClient};
pub use signer::{FunctionCall, SubmittedTransaction, TransactionSigner};
pub use staking_pool::StakingPoolContract;
pub use unstake::{
    FormView, QuoteOutcome, QuoteTicket, SettledUnstake, SettlementFailure, SettlementState,
    UnstakeSettlementEngine,
};
