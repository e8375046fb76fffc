use async_trait::async_trait;
use near_primitives::views::FinalExecutionStatus;
use num_bigint::BigUint;
use num_traits::Zero;
use serde_json::Value;

use crate::error::SubmissionResult;

/// 300 TGas, the per-transaction maximum.
pub const MAX_GAS: u64 = 300_000_000_000_000;

/// A single function call action to be signed by the wallet.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub contract_id: String,
    pub method_name: String,
    pub args: Value,
    pub gas: u64,
    pub deposit: BigUint,
}

impl FunctionCall {
    pub fn new(contract_id: &str, method_name: &str, args: Value) -> Self {
        Self {
            contract_id: contract_id.to_string(),
            method_name: method_name.to_string(),
            args,
            gas: MAX_GAS,
            deposit: BigUint::zero(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmittedTransaction {
    pub transaction_hash: String,
    pub status: FinalExecutionStatus,
}

impl SubmittedTransaction {
    /// An empty success value still counts as success.
    pub fn is_success(&self) -> bool {
        matches!(self.status, FinalExecutionStatus::SuccessValue(_))
    }
}

/// Signs and broadcasts transactions on behalf of the connected account.
///
/// Key management lives in the wallet; this crate only builds the calls.
#[async_trait]
pub trait TransactionSigner: Send + Sync {
    async fn sign_and_send_transaction(
        &self,
        call: FunctionCall,
    ) -> SubmissionResult<SubmittedTransaction>;
}
