//! Observable dashboard state.
//!
//! Mutation points are `begin_cycle`, `commit_snapshot`, `fail_cycle` and
//! `request_refresh`. Every mutation is published through a
//! `tokio::sync::watch` channel, so subscribers see whole states only: the
//! transaction list and balance of one fetch are always committed together.
//!
//! Each fetch cycle holds a [`CycleTicket`]. Only the ticket of the most
//! recently started cycle may commit or fail; results of older cycles are
//! discarded.

use crate::models::{AugmentedBalance, AugmentedTransaction};
use tokio::sync::watch;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct DashboardState {
    pub phase: Phase,
    pub transactions: Vec<AugmentedTransaction>,
    pub balance: Option<AugmentedBalance>,
    /// True after the first successful cycle; never goes back to false.
    pub loaded: bool,
    pub error: Option<String>,
    /// Refresh trigger. Set by a successful delete, cleared by the next commit.
    pub refresh_pending: bool,
    /// Generation of the most recently started cycle.
    pub cycle: u64,
}

/// Proof that a fetch cycle was started; carries its generation number.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CycleTicket(u64);

impl CycleTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

pub struct TransactionStore {
    tx: watch::Sender<DashboardState>,
}

impl Default for TransactionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(DashboardState::default());
        Self { tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.tx.subscribe()
    }

    pub fn snapshot(&self) -> DashboardState {
        self.tx.borrow().clone()
    }

    pub fn begin_cycle(&self) -> CycleTicket {
        let mut generation = 0;
        self.tx.send_modify(|s| {
            s.cycle += 1;
            s.phase = Phase::Loading;
            generation = s.cycle;
        });
        CycleTicket(generation)
    }

    /// Replaces transactions and balance together. Returns false (and changes
    /// nothing) when a newer cycle has started since `ticket` was issued.
    pub fn commit_snapshot(
        &self,
        ticket: CycleTicket,
        transactions: Vec<AugmentedTransaction>,
        balance: AugmentedBalance,
    ) -> bool {
        self.tx.send_if_modified(|s| {
            if s.cycle != ticket.0 {
                return false;
            }
            s.transactions = transactions;
            s.balance = Some(balance);
            s.error = None;
            s.refresh_pending = false;
            s.loaded = true;
            s.phase = Phase::Loaded;
            true
        })
    }

    /// Records a failed cycle. The previous snapshot and `loaded` stay as they were.
    pub fn fail_cycle(&self, ticket: CycleTicket, message: &str) -> bool {
        self.tx.send_if_modified(|s| {
            if s.cycle != ticket.0 {
                return false;
            }
            s.error = Some(message.to_string());
            s.phase = Phase::Failed;
            true
        })
    }

    pub fn request_refresh(&self) {
        self.tx.send_modify(|s| s.refresh_pending = true);
    }
}
