//! Liquid unstake form logic: debounced exchange quotes, amount validation
//! against the staked balance, and dispatch of instant or delayed unstakes.
//!
//! Every amount input issues a [`QuoteTicket`]. Quotes and state changes that
//! carry an outdated ticket are dropped, so only the latest input can affect
//! the displayed expected output.

use log::{debug, info, warn};
use num_bigint::BigUint;
use num_traits::Zero;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use super::balance_store::AccountBalanceStore;
use super::metapool::MetaPoolContract;
use super::signer::TransactionSigner;
use crate::error::{
    RpcResult, SettlementError, SettlementResult, SubmissionError, ValidationError,
};
use crate::models::{UnstakeMode, UnstakeRequest};
use crate::utils::amount::{
    format_near_amount, is_decimal_string, is_positive, parse_near_amount, strip_separators,
    DISPLAY_FRAC_DIGITS,
};

pub const DEFAULT_QUOTE_DEBOUNCE: Duration = Duration::from_millis(500);

/// Identifies one amount input. Newer inputs always get larger tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QuoteTicket(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuoteOutcome {
    /// The quote was stored as the expected output of the current amount.
    Applied(BigUint),
    /// The amount cannot be quoted; the form shows the error.
    Rejected(ValidationError),
    /// A newer input arrived first. Nothing was stored.
    Superseded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettledUnstake {
    pub request: UnstakeRequest,
    pub transaction_hash: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettlementFailure {
    Validation(ValidationError),
    /// Retryable with [`UnstakeSettlementEngine::retry`].
    Submission(SubmissionError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettlementState {
    Idle,
    Quoting,
    Validating,
    Submitting,
    Settled(SettledUnstake),
    Failed(SettlementFailure),
}

impl fmt::Display for SettlementState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettlementState::Idle => f.write_str("idle"),
            SettlementState::Quoting => f.write_str("quoting"),
            SettlementState::Validating => f.write_str("validating"),
            SettlementState::Submitting => f.write_str("submitting"),
            SettlementState::Settled(_) => f.write_str("settled"),
            SettlementState::Failed(SettlementFailure::Validation(e)) => {
                write!(f, "invalid ({})", e)
            }
            SettlementState::Failed(SettlementFailure::Submission(e)) => {
                write!(f, "failed ({})", e)
            }
        }
    }
}

/// What the form currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub amount: String,
    pub use_max: bool,
    pub state: SettlementState,
    pub min_expected_output: Option<BigUint>,
    /// `min_expected_output` in NEAR, for the "estimated received" line.
    pub estimated_received: Option<String>,
}

#[derive(Debug)]
struct Form {
    amount: String,
    use_max: bool,
    ticket: u64,
    /// Last applied quote and the ticket it was requested for.
    quote: Option<(u64, BigUint)>,
    state: SettlementState,
}

impl Form {
    fn next_ticket(&mut self) -> QuoteTicket {
        self.ticket += 1;
        QuoteTicket(self.ticket)
    }

    fn ensure_editable(&self, operation: &'static str) -> SettlementResult<()> {
        if self.state == SettlementState::Submitting {
            return Err(SettlementError::InvalidState {
                operation,
                state: self.state.to_string(),
            });
        }
        Ok(())
    }

    /// Yocto amount the user asked for, without looking at the balance.
    fn requested_yocto(&self, staked: Option<&BigUint>) -> Result<BigUint, ValidationError> {
        if self.use_max {
            return staked.cloned().ok_or(ValidationError::BalanceUnavailable);
        }
        let amount = strip_separators(&self.amount);
        if amount.is_empty() {
            return Err(ValidationError::Empty);
        }
        if !is_decimal_string(&amount) {
            return Err(ValidationError::NotDecimal(self.amount.clone()));
        }
        parse_near_amount(&amount).ok_or_else(|| ValidationError::NotDecimal(self.amount.clone()))
    }

    fn validate(&self, staked: Option<&BigUint>) -> Result<BigUint, ValidationError> {
        let amount = self.requested_yocto(staked)?;
        if amount.is_zero() {
            return Err(ValidationError::Zero);
        }
        let staked = staked.ok_or(ValidationError::BalanceUnavailable)?;
        if &amount > staked {
            return Err(ValidationError::ExceedsBalance {
                amount,
                staked: staked.clone(),
            });
        }
        Ok(amount)
    }

    fn current_quote(&self) -> Option<&BigUint> {
        match &self.quote {
            Some((ticket, quote)) if *ticket == self.ticket => Some(quote),
            _ => None,
        }
    }
}

pub struct UnstakeSettlementEngine {
    account_id: String,
    metapool: MetaPoolContract,
    signer: Arc<dyn TransactionSigner>,
    balances: Arc<AccountBalanceStore>,
    debounce: Duration,
    form: RwLock<Form>,
}

impl UnstakeSettlementEngine {
    pub fn new(
        account_id: &str,
        metapool: MetaPoolContract,
        signer: Arc<dyn TransactionSigner>,
        balances: Arc<AccountBalanceStore>,
    ) -> Self {
        Self {
            account_id: account_id.to_string(),
            metapool,
            signer,
            balances,
            debounce: DEFAULT_QUOTE_DEBOUNCE,
            form: RwLock::new(Form {
                amount: String::new(),
                use_max: false,
                ticket: 0,
                quote: None,
                state: SettlementState::Idle,
            }),
        }
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Records a typed amount. Follow up with [`Self::refresh_quote`].
    pub async fn input_amount(&self, amount: &str) -> SettlementResult<QuoteTicket> {
        let mut form = self.form.write().await;
        form.ensure_editable("change the amount")?;
        form.amount = amount.to_string();
        form.use_max = false;
        form.state = if amount.trim().is_empty() {
            SettlementState::Idle
        } else {
            SettlementState::Quoting
        };
        Ok(form.next_ticket())
    }

    /// Selects the whole staked balance. Does nothing when it is zero or not
    /// loaded.
    pub async fn use_max(&self) -> SettlementResult<Option<QuoteTicket>> {
        let staked = self.balances.staked_balance().await;
        let mut form = self.form.write().await;
        form.ensure_editable("use max")?;

        let staked = match staked {
            Some(staked) if is_positive(&staked) => staked,
            _ => {
                debug!("Use max ignored, nothing staked");
                return Ok(None);
            }
        };
        form.amount = strip_separators(&format_near_amount(&staked, DISPLAY_FRAC_DIGITS));
        form.use_max = true;
        form.state = SettlementState::Quoting;
        Ok(Some(form.next_ticket()))
    }

    /// Waits out the debounce delay, then quotes the amount of `ticket` unless
    /// a newer input has arrived in the meantime.
    pub async fn refresh_quote(&self, ticket: QuoteTicket) -> SettlementResult<QuoteOutcome> {
        tokio::time::sleep(self.debounce).await;

        let staked = self.balances.staked_balance().await;
        let amount = {
            let mut form = self.form.write().await;
            if form.ticket != ticket.0 {
                debug!("Quote {:?} superseded before it was sent", ticket);
                return Ok(QuoteOutcome::Superseded);
            }
            match form.requested_yocto(staked.as_ref()) {
                Ok(amount) => amount,
                Err(ValidationError::Empty) => {
                    form.state = SettlementState::Idle;
                    return Ok(QuoteOutcome::Rejected(ValidationError::Empty));
                }
                Err(e) => {
                    form.state = SettlementState::Failed(SettlementFailure::Validation(e.clone()));
                    return Ok(QuoteOutcome::Rejected(e));
                }
            }
        };

        let result = self.metapool.get_near_amount_sell_stnear(&amount).await;

        let staked = self.balances.staked_balance().await;
        let mut form = self.form.write().await;
        if form.ticket != ticket.0 {
            debug!("Dropping stale quote {:?}", ticket);
            return Ok(QuoteOutcome::Superseded);
        }
        let quote = result?;
        debug!("Quote {:?}: {} stNEAR sells for {} yocto", ticket, amount, quote);

        form.quote = Some((ticket.0, quote.clone()));
        form.state = match form.validate(staked.as_ref()) {
            Ok(_) => SettlementState::Validating,
            Err(e) => SettlementState::Failed(SettlementFailure::Validation(e)),
        };
        Ok(QuoteOutcome::Applied(quote))
    }

    /// Checks the current amount without changing the form.
    pub async fn validate(&self) -> Result<BigUint, ValidationError> {
        let staked = self.balances.staked_balance().await;
        self.form.read().await.validate(staked.as_ref())
    }

    /// Instant mode needs a quote for the current amount, so a fresh quote is
    /// required after every input, "use max" included.
    pub async fn submit(&self, mode: UnstakeMode) -> SettlementResult<SettledUnstake> {
        let staked = self.balances.staked_balance().await;
        let request = {
            let mut form = self.form.write().await;
            match &form.state {
                SettlementState::Validating
                | SettlementState::Failed(SettlementFailure::Validation(_)) => {}
                other => {
                    return Err(SettlementError::InvalidState {
                        operation: "submit",
                        state: other.to_string(),
                    })
                }
            }

            let amount_yocto = match form.validate(staked.as_ref()) {
                Ok(amount) => amount,
                Err(e) => {
                    form.state = SettlementState::Failed(SettlementFailure::Validation(e.clone()));
                    return Err(e.into());
                }
            };
            let min_expected_output = match mode {
                UnstakeMode::Instant => Some(
                    form.current_quote()
                        .cloned()
                        .ok_or(ValidationError::QuotePending)?,
                ),
                UnstakeMode::Delayed => None,
            };

            form.state = SettlementState::Submitting;
            UnstakeRequest {
                amount: form.amount.clone(),
                amount_yocto,
                mode,
                min_expected_output,
            }
        };

        let call = match &request.min_expected_output {
            Some(min_expected) => self
                .metapool
                .liquid_unstake_call(&request.amount_yocto, min_expected),
            None => self.metapool.delayed_unstake_call(&request.amount_yocto),
        };
        info!(
            "Submitting {} unstake of {} yocto stNEAR for {}",
            request.mode, request.amount_yocto, self.account_id
        );
        let result = self.signer.sign_and_send_transaction(call).await;

        if let Err(e) = self.balances.refresh(&self.account_id).await {
            warn!("Balance refresh after unstake failed: {}", e);
        }

        let mut form = self.form.write().await;
        match result {
            Ok(tx) if tx.is_success() => {
                info!("Unstake settled in {}", tx.transaction_hash);
                let settled = SettledUnstake {
                    request,
                    transaction_hash: tx.transaction_hash,
                };
                form.state = SettlementState::Settled(settled.clone());
                Ok(settled)
            }
            Ok(tx) => {
                let e = SubmissionError::NotSuccessful(format!("{:?}", tx.status));
                warn!("Unstake {} did not succeed: {}", tx.transaction_hash, e);
                form.state = SettlementState::Failed(SettlementFailure::Submission(e.clone()));
                Err(e.into())
            }
            Err(e) => {
                warn!("Unstake submission failed: {}", e);
                form.state = SettlementState::Failed(SettlementFailure::Submission(e.clone()));
                Err(e.into())
            }
        }
    }

    /// Returns a failed submission to validation, keeping the amount.
    pub async fn retry(&self) -> SettlementResult<()> {
        let mut form = self.form.write().await;
        match &form.state {
            SettlementState::Failed(SettlementFailure::Submission(_)) => {
                form.state = SettlementState::Validating;
                Ok(())
            }
            other => Err(SettlementError::InvalidState {
                operation: "retry",
                state: other.to_string(),
            }),
        }
    }

    /// Fee in percent; delayed unstakes are free.
    pub async fn unstake_fee(&self, mode: UnstakeMode) -> RpcResult<f64> {
        match mode {
            UnstakeMode::Instant => self.metapool.liquid_unstake_fee().await,
            UnstakeMode::Delayed => Ok(0.0),
        }
    }

    pub async fn view(&self) -> FormView {
        let form = self.form.read().await;
        let min_expected_output = form.current_quote().cloned();
        let estimated_received = match &min_expected_output {
            Some(quote) if !form.amount.is_empty() => {
                Some(format_near_amount(quote, DISPLAY_FRAC_DIGITS))
            }
            _ => None,
        };
        FormView {
            amount: form.amount.clone(),
            use_max: form.use_max,
            state: form.state.clone(),
            min_expected_output,
            estimated_received,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RpcError;
    use crate::test_support::{MockSigner, MockViewClient};
    use near_primitives::views::FinalExecutionStatus;
    use serde_json::{json, Value};
    use std::str::FromStr;

    const METAPOOL: &str = "meta-pool.near";
    const ONE_NEAR: &str = "1000000000000000000000000";

    fn yocto(s: &str) -> BigUint {
        BigUint::from_str(s).unwrap()
    }

    fn quote_for(args: &Value) -> Value {
        let amount = yocto(args["stnear_to_sell"].as_str().unwrap());
        json!((amount * 99u32 / 100u32).to_string())
    }

    fn client(st_near: &'static str) -> MockViewClient {
        MockViewClient::new(move |_, method, args| match method {
            "ft_balance_of" => Ok(json!(st_near)),
            "get_near_amount_sell_stnear" => Ok(quote_for(args)),
            other => panic!("unexpected method {}", other),
        })
        .with_account(0, 0)
    }

    async fn engine_with(
        client: MockViewClient,
    ) -> (Arc<MockViewClient>, Arc<MockSigner>, Arc<UnstakeSettlementEngine>) {
        let client = Arc::new(client);
        let metapool = MetaPoolContract::new(client.clone(), METAPOOL);
        let balances = Arc::new(AccountBalanceStore::new(client.clone(), metapool.clone()));
        balances.refresh("alice.near").await.unwrap();
        let signer = Arc::new(MockSigner::new());
        let engine = UnstakeSettlementEngine::new("alice.near", metapool, signer.clone(), balances);
        (client, signer, Arc::new(engine))
    }

    async fn quoted(engine: &UnstakeSettlementEngine, amount: &str) -> QuoteOutcome {
        let ticket = engine.input_amount(amount).await.unwrap();
        engine.refresh_quote(ticket).await.unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_amount_above_staked_balance_blocks_submission() {
        let (_, signer, engine) = engine_with(client(ONE_NEAR)).await;

        quoted(&engine, "2").await;

        assert_eq!(
            engine.view().await.state,
            SettlementState::Failed(SettlementFailure::Validation(
                ValidationError::ExceedsBalance {
                    amount: yocto("2000000000000000000000000"),
                    staked: yocto(ONE_NEAR),
                }
            ))
        );
        let result = engine.submit(UnstakeMode::Instant).await;
        assert!(matches!(
            result,
            Err(SettlementError::Blocked(ValidationError::ExceedsBalance { .. }))
        ));
        assert!(signer.sent().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_instant_unstake_uses_exact_yocto_and_last_quote() {
        let (client, signer, engine) = engine_with(client("2000000000000000000000000")).await;

        let outcome = quoted(&engine, "0.5").await;
        assert_eq!(
            outcome,
            QuoteOutcome::Applied(yocto("495000000000000000000000"))
        );
        assert_eq!(engine.view().await.state, SettlementState::Validating);

        let settled = engine.submit(UnstakeMode::Instant).await.unwrap();

        assert_eq!(settled.request.amount_yocto, yocto("500000000000000000000000"));
        let sent = signer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].contract_id, METAPOOL);
        assert_eq!(sent[0].method_name, "liquid_unstake");
        assert_eq!(
            sent[0].args,
            json!({
                "st_near_to_burn": "500000000000000000000000",
                "min_expected_near": "495000000000000000000000",
            })
        );
        assert!(matches!(engine.view().await.state, SettlementState::Settled(_)));
        // One refresh at setup, one after settlement.
        assert_eq!(client.count_method("ft_balance_of"), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delayed_unstake_has_no_minimum() {
        let (_, signer, engine) = engine_with(client(ONE_NEAR)).await;

        quoted(&engine, "0.25").await;
        let settled = engine.submit(UnstakeMode::Delayed).await.unwrap();

        assert_eq!(settled.request.min_expected_output, None);
        let sent = signer.sent();
        assert_eq!(sent[0].method_name, "unstake");
        assert_eq!(sent[0].args, json!({ "amount": "250000000000000000000000" }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_use_max_with_nothing_staked_is_a_no_op() {
        let (_, _, engine) = engine_with(client("0")).await;
        engine.input_amount("1").await.unwrap();

        assert_eq!(engine.use_max().await.unwrap(), None);

        let view = engine.view().await;
        assert_eq!(view.amount, "1");
        assert!(!view.use_max);
    }

    #[tokio::test(start_paused = true)]
    async fn test_use_max_submits_the_exact_balance() {
        let staked = "1234567999999999999999999999";
        let (client, signer, engine) = engine_with(client(staked)).await;

        let ticket = engine.use_max().await.unwrap().unwrap();
        let view = engine.view().await;
        assert_eq!(view.amount, "1234.56799");
        assert!(view.use_max);

        engine.refresh_quote(ticket).await.unwrap();
        let calls = client.calls();
        assert_eq!(calls.last().unwrap().2["stnear_to_sell"], json!(staked));

        engine.submit(UnstakeMode::Delayed).await.unwrap();
        assert_eq!(signer.sent()[0].args, json!({ "amount": staked }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_use_max_requires_a_fresh_quote() {
        let (_, signer, engine) = engine_with(client(ONE_NEAR)).await;
        quoted(&engine, "0.5").await;

        engine.use_max().await.unwrap().unwrap();
        let result = engine.submit(UnstakeMode::Instant).await;

        assert!(matches!(result, Err(SettlementError::InvalidState { .. })));
        assert!(signer.sent().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_quote_does_not_overwrite_newer_one() {
        let slow = client("5000000000000000000000000").with_delay(|method, args| {
            if method == "get_near_amount_sell_stnear" && args["stnear_to_sell"] == json!(ONE_NEAR)
            {
                Duration::from_millis(2000)
            } else {
                Duration::from_millis(100)
            }
        });
        let (_, _, engine) = engine_with(slow).await;

        let first = engine.input_amount("1").await.unwrap();
        let first_quote = tokio::spawn({
            let engine = engine.clone();
            async move { engine.refresh_quote(first).await }
        });
        // Past the debounce: the first quote is in flight.
        tokio::time::sleep(Duration::from_millis(600)).await;

        let second = engine.input_amount("2").await.unwrap();
        let outcome = engine.refresh_quote(second).await.unwrap();
        assert_eq!(
            outcome,
            QuoteOutcome::Applied(yocto("1980000000000000000000000"))
        );

        assert_eq!(first_quote.await.unwrap().unwrap(), QuoteOutcome::Superseded);
        let view = engine.view().await;
        assert_eq!(
            view.min_expected_output,
            Some(yocto("1980000000000000000000000"))
        );
        assert_eq!(view.estimated_received.as_deref(), Some("1.98"));
        assert_eq!(view.amount, "2");
    }

    #[tokio::test(start_paused = true)]
    async fn test_input_during_debounce_cancels_the_quote() {
        let (client, _, engine) = engine_with(client(ONE_NEAR)).await;

        let first = engine.input_amount("0.1").await.unwrap();
        let second = engine.input_amount("0.2").await.unwrap();
        assert!(second > first);

        assert_eq!(
            engine.refresh_quote(first).await.unwrap(),
            QuoteOutcome::Superseded
        );
        assert_eq!(client.count_method("get_near_amount_sell_stnear"), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unparseable_amounts_are_rejected_without_a_quote() {
        let (client, _, engine) = engine_with(client(ONE_NEAR)).await;

        let outcome = quoted(&engine, "1.2.3").await;
        let expected = ValidationError::NotDecimal("1.2.3".to_string());
        assert_eq!(outcome, QuoteOutcome::Rejected(expected.clone()));
        assert_eq!(client.count_method("get_near_amount_sell_stnear"), 0);

        let result = engine.submit(UnstakeMode::Delayed).await;
        assert!(matches!(result, Err(SettlementError::Blocked(e)) if e == expected));

        assert_eq!(
            quoted(&engine, "").await,
            QuoteOutcome::Rejected(ValidationError::Empty)
        );
        assert_eq!(engine.view().await.state, SettlementState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_amount_is_invalid() {
        let (_, _, engine) = engine_with(client(ONE_NEAR)).await;

        quoted(&engine, "0.000").await;

        assert_eq!(
            engine.view().await.state,
            SettlementState::Failed(SettlementFailure::Validation(ValidationError::Zero))
        );
        assert_eq!(engine.validate().await, Err(ValidationError::Zero));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_submission_can_be_retried_with_same_amount() {
        let (client, signer, engine) = engine_with(client(ONE_NEAR)).await;
        signer.push_outcome(Err(SubmissionError::Relayer("503".to_string())));
        signer.push_outcome(Ok(FinalExecutionStatus::Started));

        quoted(&engine, "0.5").await;

        let result = engine.submit(UnstakeMode::Instant).await;
        assert!(matches!(
            result,
            Err(SettlementError::Submission(SubmissionError::Relayer(_)))
        ));
        assert!(matches!(
            engine.view().await.state,
            SettlementState::Failed(SettlementFailure::Submission(_))
        ));
        assert!(matches!(
            engine.submit(UnstakeMode::Instant).await,
            Err(SettlementError::InvalidState { .. })
        ));

        engine.retry().await.unwrap();
        let result = engine.submit(UnstakeMode::Instant).await;
        assert!(matches!(
            result,
            Err(SettlementError::Submission(SubmissionError::NotSuccessful(_)))
        ));

        engine.retry().await.unwrap();
        assert_eq!(engine.view().await.amount, "0.5");
        engine.submit(UnstakeMode::Instant).await.unwrap();

        let sent = signer.sent();
        assert_eq!(sent.len(), 3);
        assert!(sent.iter().all(|call| call == &sent[0]));
        // Setup plus one refresh per attempt.
        assert_eq!(client.count_method("ft_balance_of"), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_quote_failure_propagates() {
        let failing = MockViewClient::new(|_, method, _| match method {
            "ft_balance_of" => Ok(json!(ONE_NEAR)),
            _ => Err(RpcError::Query("pool offline".to_string())),
        })
        .with_account(0, 0);
        let (_, _, engine) = engine_with(failing).await;

        let ticket = engine.input_amount("0.5").await.unwrap();
        let result = engine.refresh_quote(ticket).await;

        assert!(matches!(result, Err(SettlementError::Quote(_))));
        assert_eq!(engine.view().await.state, SettlementState::Quoting);
    }

    #[tokio::test(start_paused = true)]
    async fn test_view_hides_quote_of_a_previous_amount() {
        let client = MockViewClient::new(|_, method, args| match method {
            "ft_balance_of" => Ok(json!("5000000000000000000000000")),
            "get_near_amount_sell_stnear" if args["stnear_to_sell"] == json!(ONE_NEAR) => {
                Ok(quote_for(args))
            }
            _ => Err(RpcError::Query("pool offline".to_string())),
        })
        .with_account(0, 0);
        let (_, _, engine) = engine_with(client).await;

        quoted(&engine, "1").await;
        let view = engine.view().await;
        assert_eq!(view.min_expected_output, Some(yocto("990000000000000000000000")));
        assert_eq!(view.estimated_received.as_deref(), Some("0.99"));

        let ticket = engine.input_amount("2").await.unwrap();
        assert!(engine.refresh_quote(ticket).await.is_err());

        let view = engine.view().await;
        assert_eq!(view.amount, "2");
        assert_eq!(view.min_expected_output, None);
        assert_eq!(view.estimated_received, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unstake_fee_by_mode() {
        let client = MockViewClient::new(|_, method, _| match method {
            "ft_balance_of" => Ok(json!(ONE_NEAR)),
            "get_contract_state" => Ok(json!({ "nslp_current_discount_basis_points": 250 })),
            other => panic!("unexpected method {}", other),
        })
        .with_account(0, 0);
        let (_, _, engine) = engine_with(client).await;

        assert_eq!(engine.unstake_fee(UnstakeMode::Instant).await.unwrap(), 2.5);
        assert_eq!(engine.unstake_fee(UnstakeMode::Delayed).await.unwrap(), 0.0);
    }
}
