use crumbs_store::StoreError;
use thiserror::Error;

/// Errors produced by ledger operations.
///
/// Validation variants are rejected before any mutation and retrying them
/// verbatim will fail again; only store-level failures are worth retrying.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    #[error("minimum {minimum} points required for redemption")]
    BelowMinimumRedeem { minimum: i64 },

    #[error("insufficient points balance: requested {requested}, available {available}")]
    InsufficientBalance { requested: i64, available: i64 },

    #[error("adjustment reason must be at least {minimum} characters")]
    ReasonTooShort { minimum: usize },

    #[error("adjustment of zero points is not allowed")]
    ZeroAdjustment,

    #[error("adjustment would result in negative balance: balance {balance}, delta {delta}")]
    NegativeBalance { balance: i64, delta: i64 },

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl LedgerError {
    /// Whether the caller may retry the same call.
    ///
    /// Only backend failures qualify; everything else is a validation
    /// outcome that will not change on retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, LedgerError::Store(StoreError::Backend(_)))
    }
}
