use chrono::Utc;
use log::{debug, info};
use num_bigint::BigUint;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::metapool::MetaPoolContract;
use super::near_rpc::ViewClient;
use crate::error::RpcResult;
use crate::models::AccountBalanceSnapshot;

#[derive(Default)]
struct Committed {
    /// Generation of the refresh that produced `snapshot`.
    generation: u64,
    snapshot: Option<AccountBalanceSnapshot>,
}

/// Shared account balances. `refresh` is the only way to change them.
pub struct AccountBalanceStore {
    client: Arc<dyn ViewClient>,
    metapool: MetaPoolContract,
    committed: RwLock<Committed>,
    generation: AtomicU64,
}

impl AccountBalanceStore {
    pub fn new(client: Arc<dyn ViewClient>, metapool: MetaPoolContract) -> Self {
        Self {
            client,
            metapool,
            committed: RwLock::new(Committed::default()),
            generation: AtomicU64::new(0),
        }
    }

    /// Reloads balances of `account_id`. Safe to call redundantly: when two
    /// refreshes overlap, the one started last decides the stored snapshot
    /// unless it fails, in which case the older result still lands.
    pub async fn refresh(&self, account_id: &str) -> RpcResult<AccountBalanceSnapshot> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let account = self.client.view_account(account_id).await?;
        let st_near = self.metapool.ft_balance_of(account_id).await?;
        let snapshot = AccountBalanceSnapshot {
            account_id: account_id.to_string(),
            available: account.amount,
            locked: account.locked,
            st_near,
            refreshed_at: Utc::now(),
        };

        let mut committed = self.committed.write().await;
        if generation > committed.generation {
            info!(
                "Balances of {} refreshed: available {}, stNEAR {}",
                account_id, snapshot.available, snapshot.st_near
            );
            committed.generation = generation;
            committed.snapshot = Some(snapshot.clone());
        } else {
            debug!("Dropping superseded balance refresh of {}", account_id);
        }
        Ok(snapshot)
    }

    pub async fn snapshot(&self) -> Option<AccountBalanceSnapshot> {
        self.committed.read().await.snapshot.clone()
    }

    /// stNEAR balance of the last refreshed account.
    pub async fn staked_balance(&self) -> Option<BigUint> {
        self.committed
            .read()
            .await
            .snapshot
            .as_ref()
            .map(|snapshot| snapshot.st_near.clone())
    }
}
