//! View wrappers for staking pool contracts, including the staking-farm
//! pools that distribute extra tokens to delegators.

use log::debug;
use num_bigint::BigUint;
use serde_json::{json, Value};
use std::sync::Arc;

use super::near_rpc::{view_as, ViewClient};
use crate::error::{RpcError, RpcResult};
use crate::models::{Farm, FeeFraction, PoolSummary};
use crate::utils::amount::parse_yocto;

#[derive(Clone)]
pub struct StakingPoolContract {
    client: Arc<dyn ViewClient>,
}

impl StakingPoolContract {
    pub fn new(client: Arc<dyn ViewClient>) -> Self {
        Self { client }
    }

    pub async fn get_reward_fee_fraction(&self, contract_name: &str) -> RpcResult<FeeFraction> {
        view_as(
            self.client.as_ref(),
            contract_name,
            "get_reward_fee_fraction",
            json!({}),
        )
        .await
    }

    pub async fn get_farms(
        &self,
        contract_name: &str,
        from_index: u64,
        limit: u64,
    ) -> RpcResult<Vec<Farm>> {
        debug!(
            "Fetching farms of {}, from_index: {}, limit: {}",
            contract_name, from_index, limit
        );
        view_as(
            self.client.as_ref(),
            contract_name,
            "get_farms",
            json!({ "from_index": from_index, "limit": limit }),
        )
        .await
    }

    pub async fn get_farm(&self, contract_name: &str, farm_id: u64) -> RpcResult<Farm> {
        view_as(
            self.client.as_ref(),
            contract_name,
            "get_farm",
            json!({ "farm_id": farm_id }),
        )
        .await
    }

    pub async fn get_pool_summary(&self, contract_name: &str) -> RpcResult<PoolSummary> {
        view_as(
            self.client.as_ref(),
            contract_name,
            "get_pool_summary",
            json!({}),
        )
        .await
    }

    /// The contract answers with an integer string.
    pub async fn get_unclaimed_reward(
        &self,
        contract_name: &str,
        account_id: &str,
        farm_id: u64,
    ) -> RpcResult<BigUint> {
        let value = self
            .client
            .view_function(
                contract_name,
                "get_unclaimed_reward",
                json!({ "account_id": account_id, "farm_id": farm_id }),
            )
            .await?;
        yocto_from_value(&value)
    }
}

/// Decodes a U128 JSON value, which contracts serialize as a string.
pub(crate) fn yocto_from_value(value: &Value) -> RpcResult<BigUint> {
    let parsed = match value {
        Value::String(raw) => parse_yocto(raw),
        Value::Number(n) => n.as_u64().map(BigUint::from),
        _ => None,
    };
    parsed.ok_or_else(|| {
        RpcError::UnexpectedResponse(format!("expected an integer amount, got {}", value))
    })
}
