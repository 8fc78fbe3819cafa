//! Error taxonomy for the transaction pipeline.

use thiserror::Error;

/// Failures while turning wire values into display strings.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum FormatError {
    #[error("unparseable date: {0:?}")]
    InvalidDate(String),

    #[error("non-numeric amount: {0:?}")]
    InvalidAmount(String),

    #[error("amount is not finite: {0}")]
    NonFinite(f64),
}

#[derive(Debug, Error)]
pub enum DashboardError {
    /// The request could not be completed (connect, timeout, body read).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("{failed} of {total} uploads failed")]
    PartialImport { failed: usize, total: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
