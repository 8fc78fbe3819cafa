//! Raw transactions -> display entities (one in, one out, order kept).

use crate::error::FormatError;
use crate::format;
use crate::models::{AugmentedTransaction, RawAmount, RawTransaction};

/// Normalizes a fetched list. The first bad record fails the whole list so a
/// half-normalized list never reaches the store.
pub fn normalize(raw: &[RawTransaction]) -> Result<Vec<AugmentedTransaction>, FormatError> {
    raw.iter().map(normalize_one).collect()
}

fn normalize_one(raw: &RawTransaction) -> Result<AugmentedTransaction, FormatError> {
    let created_at = format::parse_date(&raw.created_at)?;
    let value = amount_value(&raw.value)?;
    Ok(AugmentedTransaction {
        id: raw.id.clone(),
        title: raw.title.clone(),
        value,
        kind: raw.kind,
        category: raw.category.clone(),
        created_at,
        formatted_value: format::try_format_currency(value)?,
        formatted_date: format::format_datetime(&created_at),
    })
}

fn amount_value(amount: &RawAmount) -> Result<f64, FormatError> {
    match amount {
        RawAmount::Number(v) if v.is_finite() => Ok(*v),
        RawAmount::Number(v) => Err(FormatError::NonFinite(*v)),
        RawAmount::Text(s) => match s.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(FormatError::InvalidAmount(s.clone())),
        },
    }
}
