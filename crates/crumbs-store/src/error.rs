use thiserror::Error;

/// Errors produced by store operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// The conditional balance guard refused the mutation: applying `delta`
    /// to `balance` would drive the account negative. Nothing was written.
    #[error("balance guard rejected delta {delta} against balance {balance}")]
    BalanceConflict { balance: i64, delta: i64 },

    /// The underlying backend failed. Retryable; the write group either
    /// fully applied or did not apply at all.
    #[error("store backend error: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;
