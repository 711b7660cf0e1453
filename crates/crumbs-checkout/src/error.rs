use crumbs_ledger::LedgerError;
use crumbs_promo::PromoRejection;
use crumbs_store::StoreError;
use thiserror::Error;

use crate::collaborators::PaymentError;

/// Errors that abort order placement.
///
/// Everything here fires before the order exists; once payment has cleared
/// and the order is built, remaining steps (promo usage accounting, point
/// earning, confirmations) are best-effort and only logged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CheckoutError {
    #[error("order has no items")]
    EmptyOrder,

    #[error("promo code rejected: {0}")]
    Promo(PromoRejection),

    #[error("payment failed: {0}")]
    Payment(#[from] PaymentError),

    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
