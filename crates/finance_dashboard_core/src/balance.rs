use crate::format::format_currency;
use crate::models::{AugmentedBalance, RawBalance};

/// Formats each balance field on its own. `total` is trusted from the backend,
/// never recomputed from income and outcome.
pub fn aggregate(raw: &RawBalance) -> AugmentedBalance {
    AugmentedBalance {
        income: format_currency(raw.income),
        outcome: format_currency(raw.outcome),
        total: format_currency(raw.total),
    }
}
