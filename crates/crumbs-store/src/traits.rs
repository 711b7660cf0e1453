use crumbs_types::{CustomerId, LoyaltyAccount, Page, PointTransaction, PromoCode, TransactionDraft};

use crate::error::StoreResult;

/// Storage boundary for loyalty accounts and their transaction logs.
///
/// All implementations must satisfy these invariants:
/// - At most one account exists per customer; accounts are never deleted.
/// - `current_balance == total_earned - total_used` after every operation.
/// - Transactions are append-only: written once by [`apply`](Self::apply),
///   never mutated or deleted, always retrieved scoped to one customer.
/// - [`apply`](Self::apply) is atomic: the balance guard, counter updates,
///   and transaction append succeed or fail together. Two concurrent
///   applies against one account serialize; the guard re-checks inside the
///   critical section rather than trusting a prior read.
pub trait LoyaltyStore: Send + Sync {
    /// Read an account without creating it.
    ///
    /// Returns `Ok(None)` for customers with no loyalty activity yet.
    fn account(&self, customer: &CustomerId) -> StoreResult<Option<LoyaltyAccount>>;

    /// Fetch the account, creating a zeroed row on first contact.
    /// Idempotent: repeated calls yield the same single row.
    fn get_or_create_account(&self, customer: &CustomerId) -> StoreResult<LoyaltyAccount>;

    /// Atomically apply a signed point delta and append its transaction.
    ///
    /// The draft's `points` drive everything: the balance moves by
    /// `points`, `total_earned` grows for positive deltas, `total_used`
    /// grows for negative ones, and the stamped transaction lands in the
    /// log. Fails with [`StoreError::BalanceConflict`], writing nothing,
    /// when the balance would go negative.
    ///
    /// Creates the account if it does not exist yet.
    ///
    /// [`StoreError::BalanceConflict`]: crate::error::StoreError::BalanceConflict
    fn apply(
        &self,
        customer: &CustomerId,
        draft: &TransactionDraft,
    ) -> StoreResult<LoyaltyAccount>;

    /// Page through a customer's transactions, newest first.
    ///
    /// Customers without an account get an empty page; listing never
    /// creates rows.
    fn transactions(
        &self,
        customer: &CustomerId,
        page: u64,
        page_size: u64,
    ) -> StoreResult<Page<PointTransaction>>;
}

/// Read boundary over stored promo codes.
///
/// Code management (creation, editing, deletion) belongs to the admin
/// surface; this core only looks codes up and burns usage.
pub trait PromoStore: Send + Sync {
    /// Exact-match lookup on the stored (uppercase) code.
    fn find(&self, code: &str) -> StoreResult<Option<PromoCode>>;

    /// Conditionally increment the code's `used_count`.
    ///
    /// Returns `false`, without writing, when the code is missing or its
    /// usage limit is already exhausted, so a burst of checkouts cannot
    /// push `used_count` past `usage_limit`.
    fn record_use(&self, code: &str) -> StoreResult<bool>;
}

impl<T: LoyaltyStore + ?Sized> LoyaltyStore for &T {
    fn account(&self, customer: &CustomerId) -> StoreResult<Option<LoyaltyAccount>> {
        (**self).account(customer)
    }

    fn get_or_create_account(&self, customer: &CustomerId) -> StoreResult<LoyaltyAccount> {
        (**self).get_or_create_account(customer)
    }

    fn apply(
        &self,
        customer: &CustomerId,
        draft: &TransactionDraft,
    ) -> StoreResult<LoyaltyAccount> {
        (**self).apply(customer, draft)
    }

    fn transactions(
        &self,
        customer: &CustomerId,
        page: u64,
        page_size: u64,
    ) -> StoreResult<Page<PointTransaction>> {
        (**self).transactions(customer, page, page_size)
    }
}

impl<T: PromoStore + ?Sized> PromoStore for &T {
    fn find(&self, code: &str) -> StoreResult<Option<PromoCode>> {
        (**self).find(code)
    }

    fn record_use(&self, code: &str) -> StoreResult<bool> {
        (**self).record_use(code)
    }
}
