mod account;
pub mod amount_serde;
mod farm;
mod network;
mod unstake;
mod validator;

pub use account::{AccountBalanceSnapshot, AccountView};
pub use farm::{Farm, PoolSummary, UnclaimedReward};
pub use network::Network;
pub use unstake::{UnstakeMode, UnstakeRequest};
pub use validator::{FeeFraction, RewardFee, Validator, ValidatorVersion};
