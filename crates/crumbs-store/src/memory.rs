//! In-memory store implementations for tests, demos, and embedding.
//!
//! All state lives in `HashMap`s behind `RwLock`s and is lost on drop. The
//! write lock doubles as the transaction boundary: everything
//! [`LoyaltyStore::apply`] does happens under one guard, which gives the
//! same observable atomicity as a database multi-statement transaction.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;
use crumbs_types::{
    CustomerId, LoyaltyAccount, Page, Pagination, PointTransaction, PromoCode, TransactionDraft,
    TransactionId,
};

use crate::error::{StoreError, StoreResult};
use crate::traits::{LoyaltyStore, PromoStore};

/// An in-memory implementation of [`LoyaltyStore`].
#[derive(Debug, Default)]
pub struct InMemoryLoyaltyStore {
    inner: RwLock<LoyaltyState>,
}

#[derive(Debug, Default)]
struct LoyaltyState {
    accounts: HashMap<CustomerId, LoyaltyAccount>,
    log: HashMap<CustomerId, Vec<PointTransaction>>,
}

impl InMemoryLoyaltyStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl LoyaltyStore for InMemoryLoyaltyStore {
    fn account(&self, customer: &CustomerId) -> StoreResult<Option<LoyaltyAccount>> {
        let state = self
            .inner
            .read()
            .map_err(|e| StoreError::Backend(format!("lock poisoned: {e}")))?;
        Ok(state.accounts.get(customer).cloned())
    }

    fn get_or_create_account(&self, customer: &CustomerId) -> StoreResult<LoyaltyAccount> {
        let mut state = self
            .inner
            .write()
            .map_err(|e| StoreError::Backend(format!("lock poisoned: {e}")))?;
        Ok(state
            .accounts
            .entry(customer.clone())
            .or_insert_with(|| LoyaltyAccount::new(customer.clone()))
            .clone())
    }

    fn apply(
        &self,
        customer: &CustomerId,
        draft: &TransactionDraft,
    ) -> StoreResult<LoyaltyAccount> {
        let mut state = self
            .inner
            .write()
            .map_err(|e| StoreError::Backend(format!("lock poisoned: {e}")))?;

        // Re-check the guard under the write lock; a prior read is stale by
        // the time we get here.
        let balance = state
            .accounts
            .get(customer)
            .map(|a| a.current_balance)
            .unwrap_or(0);
        if balance + draft.points < 0 {
            return Err(StoreError::BalanceConflict {
                balance,
                delta: draft.points,
            });
        }

        let account = state
            .accounts
            .entry(customer.clone())
            .or_insert_with(|| LoyaltyAccount::new(customer.clone()));
        account.current_balance += draft.points;
        if draft.points > 0 {
            account.total_earned += draft.points;
        } else {
            account.total_used += -draft.points;
        }
        let updated = account.clone();
        debug_assert!(updated.is_consistent());

        state.log.entry(customer.clone()).or_default().push(PointTransaction {
            id: TransactionId::new(),
            customer_id: customer.clone(),
            kind: draft.kind,
            points: draft.points,
            description: draft.description.clone(),
            related_order_id: draft.related_order_id.clone(),
            created_at: Utc::now(),
        });

        Ok(updated)
    }

    fn transactions(
        &self,
        customer: &CustomerId,
        page: u64,
        page_size: u64,
    ) -> StoreResult<Page<PointTransaction>> {
        let state = self
            .inner
            .read()
            .map_err(|e| StoreError::Backend(format!("lock poisoned: {e}")))?;

        let Some(log) = state.log.get(customer) else {
            return Ok(Page::empty(page, page_size));
        };

        let pagination = Pagination::new(page, page_size, log.len() as u64);
        let items = log
            .iter()
            .rev() // newest first; the log itself is in append order
            .skip(pagination.offset() as usize)
            .take(pagination.page_size as usize)
            .cloned()
            .collect();

        Ok(Page { items, pagination })
    }
}

/// An in-memory implementation of [`PromoStore`].
///
/// Codes are keyed by their stored uppercase form. [`put`](Self::put) seeds
/// or replaces codes; the admin surface that manages codes in production is
/// out of scope here.
#[derive(Debug, Default)]
pub struct InMemoryPromoStore {
    codes: RwLock<HashMap<String, PromoCode>>,
}

impl InMemoryPromoStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a code, keyed by its stored form.
    pub fn put(&self, promo: PromoCode) -> StoreResult<()> {
        let mut codes = self
            .codes
            .write()
            .map_err(|e| StoreError::Backend(format!("lock poisoned: {e}")))?;
        codes.insert(promo.code.clone(), promo);
        Ok(())
    }
}

impl PromoStore for InMemoryPromoStore {
    fn find(&self, code: &str) -> StoreResult<Option<PromoCode>> {
        let codes = self
            .codes
            .read()
            .map_err(|e| StoreError::Backend(format!("lock poisoned: {e}")))?;
        Ok(codes.get(code).cloned())
    }

    fn record_use(&self, code: &str) -> StoreResult<bool> {
        let mut codes = self
            .codes
            .write()
            .map_err(|e| StoreError::Backend(format!("lock poisoned: {e}")))?;
        match codes.get_mut(code) {
            Some(promo) if !promo.usage_exhausted() => {
                promo.used_count += 1;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
