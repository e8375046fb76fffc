//! Mock chain collaborators for unit tests.

use async_trait::async_trait;
use near_primitives::views::FinalExecutionStatus;
use num_bigint::BigUint;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use crate::error::{RpcError, RpcResult, SubmissionResult};
use crate::models::AccountView;
use crate::services::near_rpc::ViewClient;
use crate::services::signer::{FunctionCall, SubmittedTransaction, TransactionSigner};

type Handler = dyn Fn(&str, &str, &Value) -> RpcResult<Value> + Send + Sync;
type Delay = dyn Fn(&str, &Value) -> Duration + Send + Sync;

pub(crate) struct MockViewClient {
    handler: Box<Handler>,
    delay: Box<Delay>,
    account: Option<AccountView>,
    calls: Mutex<Vec<(String, String, Value)>>,
}

impl MockViewClient {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&str, &str, &Value) -> RpcResult<Value> + Send + Sync + 'static,
    {
        Self {
            handler: Box::new(handler),
            delay: Box::new(|_, _| Duration::ZERO),
            account: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Delays each view call by `delay(method_name, args)`.
    pub fn with_delay<F>(mut self, delay: F) -> Self
    where
        F: Fn(&str, &Value) -> Duration + Send + Sync + 'static,
    {
        self.delay = Box::new(delay);
        self
    }

    pub fn with_account(mut self, amount: u128, locked: u128) -> Self {
        self.account = Some(AccountView {
            amount: BigUint::from(amount),
            locked: BigUint::from(locked),
        });
        self
    }

    pub fn calls(&self) -> Vec<(String, String, Value)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn count_method(&self, method_name: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, method, _)| method == method_name)
            .count()
    }
}

#[async_trait]
impl ViewClient for MockViewClient {
    async fn view_function(
        &self,
        contract_id: &str,
        method_name: &str,
        args: Value,
    ) -> RpcResult<Value> {
        self.calls.lock().unwrap().push((
            contract_id.to_string(),
            method_name.to_string(),
            args.clone(),
        ));
        let delay = (self.delay)(method_name, &args);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        (self.handler)(contract_id, method_name, &args)
    }

    async fn view_account(&self, account_id: &str) -> RpcResult<AccountView> {
        self.calls.lock().unwrap().push((
            account_id.to_string(),
            "view_account".to_string(),
            Value::Null,
        ));
        self.account
            .clone()
            .ok_or_else(|| RpcError::Query(format!("account {} does not exist", account_id)))
    }
}

/// Records every call and replays queued outcomes, succeeding once the queue
/// is empty.
#[derive(Default)]
pub(crate) struct MockSigner {
    outcomes: Mutex<VecDeque<SubmissionResult<FinalExecutionStatus>>>,
    sent: Mutex<Vec<FunctionCall>>,
}

impl MockSigner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_outcome(&self, outcome: SubmissionResult<FinalExecutionStatus>) {
        self.outcomes.lock().unwrap().push_back(outcome);
    }

    pub fn sent(&self) -> Vec<FunctionCall> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl TransactionSigner for MockSigner {
    async fn sign_and_send_transaction(
        &self,
        call: FunctionCall,
    ) -> SubmissionResult<SubmittedTransaction> {
        self.sent.lock().unwrap().push(call);
        let outcome = self
            .outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(FinalExecutionStatus::SuccessValue(Vec::new())));
        outcome.map(|status| SubmittedTransaction {
            transaction_hash: "8kPZDhSfEaTpPaEhwLvbZbs8JF7mmXhUgpXo3rVdoRFh".to_string(),
            status,
        })
    }
}
