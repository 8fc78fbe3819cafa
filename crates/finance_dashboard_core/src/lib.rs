//! Transaction pipeline behind the finance dashboard.
//!
//! [`DashboardController`] fetches the transaction list and balance, turns them
//! into display entities and publishes them through a [`TransactionStore`].
//! [`ImportOrchestrator`] uploads user-selected statement files in one batch.

pub mod api;
pub mod balance;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod format;
pub mod import;
pub mod log_bridge;
pub mod models;
pub mod normalize;
pub mod store;

pub use api::{Backend, HttpBackend};
pub use config::ClientConfig;
pub use dashboard::{DashboardController, LOAD_ERROR_MESSAGE};
pub use error::{DashboardError, FormatError, Result};
pub use import::{ImportFile, ImportOrchestrator, ImportReport, Navigator, Route, UploadEntry};
pub use models::{
    AugmentedBalance, AugmentedTransaction, Category, RawAmount, RawBalance, RawTransaction,
    TransactionKind, TransactionsResponse,
};
pub use store::{DashboardState, Phase, TransactionStore};

/// Builds the HTTP-backed controller and import orchestrator from one config.
pub fn connect<N: Navigator>(
    config: &ClientConfig,
    navigator: N,
) -> Result<(DashboardController<HttpBackend>, ImportOrchestrator<HttpBackend, N>)> {
    let backend = HttpBackend::new(config)?;
    log::info!("connecting to {}", backend.base_url());
    let dashboard = DashboardController::new(backend.clone());
    let import =
        ImportOrchestrator::new(backend, navigator).with_concurrency(config.upload_concurrency);
    Ok((dashboard, import))
}
