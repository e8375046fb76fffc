use async_trait::async_trait;
use log::{debug, error, info, warn};
use near_jsonrpc_client::{methods, JsonRpcClient};
use near_jsonrpc_primitives::types::query::QueryResponseKind;
use near_primitives::types::{AccountId, BlockReference, Finality, FunctionArgs};
use near_primitives::views::QueryRequest;
use num_bigint::BigUint;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

use crate::error::{RpcError, RpcResult};
use crate::models::AccountView;

/// Read-only access to the chain.
///
/// Implemented over JSON-RPC by [`NearRpcClient`]; tests substitute mocks.
#[async_trait]
pub trait ViewClient: Send + Sync {
    /// Calls a view method and returns its JSON result.
    async fn view_function(
        &self,
        contract_id: &str,
        method_name: &str,
        args: Value,
    ) -> RpcResult<Value>;

    async fn view_account(&self, account_id: &str) -> RpcResult<AccountView>;
}

/// Calls a view method and decodes the result into `T`.
pub async fn view_as<T>(
    client: &dyn ViewClient,
    contract_id: &str,
    method_name: &str,
    args: Value,
) -> RpcResult<T>
where
    T: DeserializeOwned,
{
    let value = client.view_function(contract_id, method_name, args).await?;
    Ok(serde_json::from_value(value)?)
}

/// JSON-RPC client pair: every query goes to the primary endpoint first and
/// falls back to the secondary one.
pub struct NearRpcClient {
    primary: JsonRpcClient,
    secondary: JsonRpcClient,
    timeout: Option<Duration>,
}

pub fn create_near_connections(primary_rpc: &str, secondary_rpc: &str) -> NearRpcClient {
    info!("Connecting to NEAR...");
    let primary = JsonRpcClient::connect(primary_rpc);
    let secondary = JsonRpcClient::connect(secondary_rpc);
    info!("NEAR connections established");
    NearRpcClient {
        primary,
        secondary,
        timeout: None,
    }
}

impl NearRpcClient {
    /// Bounds every single endpoint call, so a query may take up to twice this.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    async fn call_endpoint<M>(&self, client: &JsonRpcClient, method: M) -> RpcResult<M::Response>
    where
        M: methods::RpcMethod,
        M::Error: std::fmt::Debug,
    {
        let call = client.call(method);
        let result = match self.timeout {
            Some(timeout) => tokio::time::timeout(timeout, call)
                .await
                .map_err(|_| RpcError::Timeout {
                    timeout_ms: timeout.as_millis() as u64,
                })?,
            None => call.await,
        };
        result.map_err(|e| RpcError::Query(format!("{:?}", e)))
    }

    pub async fn query_rpc<M, F>(&self, build: F) -> RpcResult<M::Response>
    where
        M: methods::RpcMethod,
        F: Fn() -> M,
        M::Error: std::fmt::Debug,
    {
        debug!("Querying RPC: {}", std::any::type_name::<M>());
        match self.call_endpoint(&self.primary, build()).await {
            Ok(response) => Ok(response),
            Err(e) => {
                warn!("Primary RPC failed ({}), trying secondary", e);
                match self.call_endpoint(&self.secondary, build()).await {
                    Ok(response) => {
                        info!(
                            "RPC query successful on secondary: {}",
                            std::any::type_name::<M>()
                        );
                        Ok(response)
                    }
                    Err(e) => {
                        error!("Both RPCs failed: {}", e);
                        Err(e)
                    }
                }
            }
        }
    }
}

fn parse_account_id(account_id: &str) -> RpcResult<AccountId> {
    account_id
        .parse::<AccountId>()
        .map_err(|e| RpcError::InvalidAccountId {
            account_id: account_id.to_string(),
            reason: e.to_string(),
        })
}

#[async_trait]
impl ViewClient for NearRpcClient {
    async fn view_function(
        &self,
        contract_id: &str,
        method_name: &str,
        args: Value,
    ) -> RpcResult<Value> {
        let account_id = parse_account_id(contract_id)?;
        let args = serde_json::to_vec(&args)?;

        let response = self
            .query_rpc(|| methods::query::RpcQueryRequest {
                block_reference: BlockReference::Finality(Finality::Final),
                request: QueryRequest::CallFunction {
                    account_id: account_id.clone(),
                    method_name: method_name.to_string(),
                    args: FunctionArgs::from(args.clone()),
                },
            })
            .await?;

        match response.kind {
            QueryResponseKind::CallResult(call_result) => {
                Ok(serde_json::from_slice(&call_result.result)?)
            }
            _ => Err(RpcError::UnexpectedResponse(format!(
                "{}.{} did not return a call result",
                contract_id, method_name
            ))),
        }
    }

    async fn view_account(&self, account_id: &str) -> RpcResult<AccountView> {
        let parsed = parse_account_id(account_id)?;

        let response = self
            .query_rpc(|| methods::query::RpcQueryRequest {
                block_reference: BlockReference::Finality(Finality::Final),
                request: QueryRequest::ViewAccount {
                    account_id: parsed.clone(),
                },
            })
            .await?;

        match response.kind {
            QueryResponseKind::ViewAccount(account) => Ok(AccountView {
                amount: BigUint::from(account.amount),
                locked: BigUint::from(account.locked),
            }),
            _ => Err(RpcError::UnexpectedResponse(format!(
                "view_account {} did not return an account",
                account_id
            ))),
        }
    }
}
