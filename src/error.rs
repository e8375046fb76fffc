//! Error types for the staking core.
//!
//! Read-path failures are `RpcError`. Amount problems are `ValidationError`,
//! which the unstake engine keeps as inline form state rather than a fault.

use num_bigint::BigUint;
use thiserror::Error;

/// Top-level error type, mostly used by the binary.
#[derive(Debug, Error)]
pub enum StakingError {
    #[error("rpc error: {0}")]
    Rpc(#[from] RpcError),

    #[error("fee error: {0}")]
    Fee(#[from] FeeError),

    #[error("settlement error: {0}")]
    Settlement(#[from] SettlementError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Failures of a read-only RPC query.
#[derive(Debug, Error)]
pub enum RpcError {
    #[error("invalid account id {account_id}: {reason}")]
    InvalidAccountId { account_id: String, reason: String },

    /// Both endpoints failed.
    #[error("query failed: {0}")]
    Query(String),

    #[error("query timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum FeeError {
    #[error("validator id is empty")]
    EmptyValidatorId,

    #[error("invalid reward fee fraction {numerator}/{denominator}")]
    InvalidFraction { numerator: u64, denominator: u64 },

    #[error("failed to fetch reward fee: {0}")]
    Fetch(#[from] RpcError),
}

/// Why an unstake amount cannot be submitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("enter an amount")]
    Empty,

    #[error("{0:?} is not a decimal amount")]
    NotDecimal(String),

    #[error("amount must be greater than zero")]
    Zero,

    #[error("amount {amount} exceeds staked balance {staked}")]
    ExceedsBalance { amount: BigUint, staked: BigUint },

    #[error("staked balance is not loaded")]
    BalanceUnavailable,

    #[error("waiting for an exchange quote for the current amount")]
    QuotePending,
}

/// Failures of a state-changing transaction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("transaction rejected: {0}")]
    Rejected(String),

    #[error("relayer error: {0}")]
    Relayer(String),

    #[error("transaction timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("transaction finished without a success value: {0}")]
    NotSuccessful(String),
}

#[derive(Debug, Error)]
pub enum SettlementError {
    /// Submission is blocked until the amount is fixed.
    #[error("submission blocked: {0}")]
    Blocked(#[from] ValidationError),

    #[error("exchange quote failed: {0}")]
    Quote(#[from] RpcError),

    #[error("submission failed: {0}")]
    Submission(#[from] SubmissionError),

    #[error("cannot {operation} while {state}")]
    InvalidState {
        operation: &'static str,
        state: String,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has invalid value {value:?}")]
    Invalid { name: &'static str, value: String },
}

pub type RpcResult<T> = Result<T, RpcError>;

pub type FeeResult<T> = Result<T, FeeError>;

pub type SubmissionResult<T> = Result<T, SubmissionError>;

pub type SettlementResult<T> = Result<T, SettlementError>;
