//! Staking data flows of a NEAR wallet: validator fees, staking-farm rewards
//! and liquid (stNEAR) unstake settlement.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::Config;
pub use error::{
    ConfigError, FeeError, RpcError, SettlementError, StakingError, SubmissionError,
    ValidationError,
};
