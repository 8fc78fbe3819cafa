//! Dashboard controller: fetch -> normalize/aggregate -> commit, and delete -> refresh.
//!
//! States: Idle -> Loading -> {Loaded, Failed}. Every entry into Loading starts
//! a new store cycle; a cycle that finishes after a newer one has started is
//! dropped instead of overwriting fresher data.

use crate::api::Backend;
use crate::balance;
use crate::error::DashboardError;
use crate::models::{AugmentedBalance, AugmentedTransaction, TransactionsResponse};
use crate::normalize;
use crate::store::{DashboardState, TransactionStore};
use tokio::sync::watch;

/// User-visible message for any failed fetch cycle.
pub const LOAD_ERROR_MESSAGE: &str = "Data could not be loaded";

pub struct DashboardController<B> {
    backend: B,
    store: TransactionStore,
}

impl<B: Backend> DashboardController<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            store: TransactionStore::new(),
        }
    }

    pub fn store(&self) -> &TransactionStore {
        &self.store
    }

    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.store.subscribe()
    }

    pub fn state(&self) -> DashboardState {
        self.store.snapshot()
    }

    /// First load when the dashboard is shown.
    pub async fn mount(&self) {
        log::info!("dashboard: mount");
        self.load().await;
    }

    /// Flips the refresh trigger and re-enters the fetch cycle.
    pub async fn refresh(&self) {
        self.store.request_refresh();
        self.load().await;
    }

    /// Runs one fetch cycle. Errors end up in the store, not in the return value.
    pub async fn load(&self) {
        let ticket = self.store.begin_cycle();
        let cycle = ticket.generation();
        log::debug!("dashboard: cycle {} loading", cycle);

        match self.fetch_snapshot().await {
            Ok((transactions, balance)) => {
                let count = transactions.len();
                if self.store.commit_snapshot(ticket, transactions, balance) {
                    log::info!("dashboard: cycle {} loaded {} transactions", cycle, count);
                } else {
                    log::debug!("dashboard: cycle {} superseded, result discarded", cycle);
                }
            }
            Err(e) => {
                if self.store.fail_cycle(ticket, LOAD_ERROR_MESSAGE) {
                    log::warn!("dashboard: cycle {} failed: {}", cycle, e);
                } else {
                    log::debug!("dashboard: cycle {} superseded, error discarded: {}", cycle, e);
                }
            }
        }
    }

    /// Fetches and fully normalizes one snapshot before anything is committed.
    async fn fetch_snapshot(
        &self,
    ) -> Result<(Vec<AugmentedTransaction>, AugmentedBalance), DashboardError> {
        let TransactionsResponse {
            transactions,
            balance,
        } = self.backend.fetch_transactions().await?;
        let augmented = normalize::normalize(&transactions)?;
        Ok((augmented, balance::aggregate(&balance)))
    }

    /// Removes a transaction remotely, then refreshes.
    ///
    /// A failed delete is only logged: the refresh trigger is not flipped and
    /// the row stays on screen until the next successful cycle.
    pub async fn delete_transaction(&self, id: &str) {
        match self.backend.delete_transaction(id).await {
            Ok(()) => {
                log::info!("dashboard: deleted transaction {}", id);
                self.refresh().await;
            }
            Err(e) => {
                log::warn!("dashboard: delete of transaction {} failed: {}", id, e);
            }
        }
    }
}
