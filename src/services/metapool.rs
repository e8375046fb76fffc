//! Meta Pool liquid staking contract: stNEAR quotes, balances and the two
//! unstake calls.

use num_bigint::BigUint;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use super::near_rpc::{view_as, ViewClient};
use super::signer::FunctionCall;
use super::staking_pool::yocto_from_value;
use crate::error::RpcResult;

#[derive(Debug, Deserialize)]
struct ContractState {
    nslp_current_discount_basis_points: u32,
}

#[derive(Clone)]
pub struct MetaPoolContract {
    client: Arc<dyn ViewClient>,
    contract_id: String,
}

impl MetaPoolContract {
    pub fn new(client: Arc<dyn ViewClient>, contract_id: &str) -> Self {
        Self {
            client,
            contract_id: contract_id.to_string(),
        }
    }

    pub fn contract_id(&self) -> &str {
        &self.contract_id
    }

    /// NEAR (yocto) received for selling `st_near` through the liquidity pool.
    pub async fn get_near_amount_sell_stnear(&self, st_near: &BigUint) -> RpcResult<BigUint> {
        let value = self
            .client
            .view_function(
                &self.contract_id,
                "get_near_amount_sell_stnear",
                json!({ "stnear_to_sell": st_near.to_string() }),
            )
            .await?;
        yocto_from_value(&value)
    }

    pub async fn ft_balance_of(&self, account_id: &str) -> RpcResult<BigUint> {
        let value = self
            .client
            .view_function(
                &self.contract_id,
                "ft_balance_of",
                json!({ "account_id": account_id }),
            )
            .await?;
        yocto_from_value(&value)
    }

    /// Current instant unstake fee, in percent.
    pub async fn liquid_unstake_fee(&self) -> RpcResult<f64> {
        let state: ContractState = view_as(
            self.client.as_ref(),
            &self.contract_id,
            "get_contract_state",
            json!({}),
        )
        .await?;
        Ok(state.nslp_current_discount_basis_points as f64 / 100.0)
    }

    pub fn liquid_unstake_call(&self, amount: &BigUint, min_expected: &BigUint) -> FunctionCall {
        FunctionCall::new(
            &self.contract_id,
            "liquid_unstake",
            json!({
                "st_near_to_burn": amount.to_string(),
                "min_expected_near": min_expected.to_string(),
            }),
        )
    }

    pub fn delayed_unstake_call(&self, amount: &BigUint) -> FunctionCall {
        FunctionCall::new(
            &self.contract_id,
            "unstake",
            json!({ "amount": amount.to_string() }),
        )
    }
}
