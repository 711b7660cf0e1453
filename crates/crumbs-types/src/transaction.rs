//! Append-only point transaction records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{CustomerId, OrderId, TransactionId};

/// Why a transaction was recorded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    /// Points credited for a completed order.
    Earned,
    /// Points debited in exchange for an order discount.
    Redeemed,
    /// Manual admin credit or debit with a mandatory reason.
    Adjusted,
}

/// One immutable entry in a customer's point ledger.
///
/// Transactions are created exactly once, alongside the balance change they
/// describe, and are never mutated or deleted. Retrieval is always scoped by
/// the owning customer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointTransaction {
    pub id: TransactionId,
    pub customer_id: CustomerId,
    pub kind: TransactionKind,
    /// Signed point delta: positive for earns and positive adjustments,
    /// negative for redemptions and negative adjustments.
    pub points: i64,
    pub description: String,
    /// Set for `Earned` and `Redeemed`; absent for manual adjustments.
    pub related_order_id: Option<OrderId>,
    pub created_at: DateTime<Utc>,
}

/// Input to the store's atomic apply.
///
/// The store stamps the id and timestamp when it appends the record; the
/// draft carries only what the ledger operation decided.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionDraft {
    pub kind: TransactionKind,
    pub points: i64,
    pub description: String,
    pub related_order_id: Option<OrderId>,
}

impl TransactionDraft {
    pub fn earned(points: i64, order_id: OrderId) -> Self {
        Self {
            kind: TransactionKind::Earned,
            points,
            description: "Points earned from order".into(),
            related_order_id: Some(order_id),
        }
    }

    pub fn redeemed(points: i64, order_id: OrderId) -> Self {
        Self {
            kind: TransactionKind::Redeemed,
            points: -points,
            description: "Points redeemed for order discount".into(),
            related_order_id: Some(order_id),
        }
    }

    pub fn adjusted(delta: i64, reason: impl Into<String>) -> Self {
        Self {
            kind: TransactionKind::Adjusted,
            points: delta,
            description: reason.into(),
            related_order_id: None,
        }
    }
}
