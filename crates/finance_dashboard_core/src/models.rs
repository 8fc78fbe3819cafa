//! Wire models (as sent by the backend) and their display-ready counterparts.
//! Wire dates stay strings until normalization; augmented entities carry chrono values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Symbol the presentation layer puts in front of formatted amounts.
pub const CURRENCY_SYMBOL: &str = "R$";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Outcome,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Outcome => "outcome",
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub title: String,
}

/// Amount as it appears on the wire. Decimal columns are sometimes serialized as strings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Number(f64),
    Text(String),
}

impl From<f64> for RawAmount {
    fn from(value: f64) -> Self {
        RawAmount::Number(value)
    }
}

/// Transaction record (wire format).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RawTransaction {
    pub id: String,
    pub title: String,
    pub value: RawAmount,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: Category,
    pub created_at: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawBalance {
    pub income: f64,
    pub outcome: f64,
    pub total: f64,
}

/// Body of `GET /transactions`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransactionsResponse {
    pub transactions: Vec<RawTransaction>,
    pub balance: RawBalance,
}

/// Transaction enriched with display fields. Replaced wholesale on every fetch.
#[derive(Clone, Debug, PartialEq)]
pub struct AugmentedTransaction {
    pub id: String,
    pub title: String,
    pub value: f64,
    pub kind: TransactionKind,
    pub category: Category,
    pub created_at: DateTime<Utc>,
    pub formatted_value: String,
    pub formatted_date: String,
}

impl AugmentedTransaction {
    /// Value as shown in the table: outcomes carry a leading "- ".
    pub fn display_value(&self) -> String {
        match self.kind {
            TransactionKind::Income => self.formatted_value.clone(),
            TransactionKind::Outcome => format!("- {}", self.formatted_value),
        }
    }
}

/// Balance cards, each a localized amount without symbol.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct AugmentedBalance {
    pub income: String,
    pub outcome: String,
    pub total: String,
}
