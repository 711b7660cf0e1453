//! The order-creation flow.

use chrono::Utc;
use crumbs_ledger::LoyaltyLedger;
use crumbs_store::{LoyaltyStore, PromoStore};
use crumbs_types::{round_to_paise, CustomerId, OrderId};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::warn;

use crate::collaborators::{
    ChargeRequest, EmailMessage, EmailSender, PaymentGateway, SmsMessage, SmsSender,
};
use crate::discount::DiscountBreakdown;
use crate::error::CheckoutError;
use crate::order::{new_order_number, DeliveryMethod, Order};

/// Checkout pricing knobs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CheckoutConfig {
    /// Tax applied to the cart subtotal.
    pub tax_rate: f64,
    /// Flat fee for home delivery; pickup is free.
    pub delivery_fee: f64,
    pub currency: String,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            tax_rate: 0.08,
            delivery_fee: 5.0,
            currency: "INR".into(),
        }
    }
}

/// One cart line, already priced by the catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub name: String,
    pub quantity: u32,
    pub unit_price: f64,
}

impl CartLine {
    pub fn line_total(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }
}

/// Everything checkout needs to place one order.
#[derive(Clone, Debug, PartialEq)]
pub struct CheckoutRequest {
    pub customer: CustomerId,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub delivery_method: DeliveryMethod,
    pub lines: Vec<CartLine>,
    /// Shopper-entered promo code; normalized before lookup.
    pub promo_code: Option<String>,
    /// Points the shopper chose to redeem. Zero or absent means none.
    pub redeem_points: Option<i64>,
}

/// A successfully placed order plus the loyalty credit it produced.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedOrder {
    pub order: Order,
    /// Zero when earning failed or the order was too small; earning never
    /// blocks placement.
    pub points_earned: i64,
}

/// The order-creation sequence.
///
/// Pricing, promo evaluation, and point redemption all happen before the
/// charge. Once payment settles, the remaining steps (promo usage
/// accounting, earning points on the net total, confirmation email/SMS)
/// are best-effort and only logged on failure. There is no compensation
/// logic: each loyalty mutation is a single atomic store apply, and a
/// decline after redemption leaves the redemption in the ledger.
pub struct CheckoutFlow<S, P, G, E, M> {
    ledger: LoyaltyLedger<S>,
    promos: P,
    payments: G,
    email: E,
    sms: M,
    config: CheckoutConfig,
}

impl<S, P, G, E, M> CheckoutFlow<S, P, G, E, M>
where
    S: LoyaltyStore,
    P: PromoStore,
    G: PaymentGateway,
    E: EmailSender,
    M: SmsSender,
{
    pub fn new(ledger: LoyaltyLedger<S>, promos: P, payments: G, email: E, sms: M) -> Self {
        Self::with_config(ledger, promos, payments, email, sms, CheckoutConfig::default())
    }

    pub fn with_config(
        ledger: LoyaltyLedger<S>,
        promos: P,
        payments: G,
        email: E,
        sms: M,
        config: CheckoutConfig,
    ) -> Self {
        Self {
            ledger,
            promos,
            payments,
            email,
            sms,
            config,
        }
    }

    pub fn ledger(&self) -> &LoyaltyLedger<S> {
        &self.ledger
    }

    pub fn promos(&self) -> &P {
        &self.promos
    }

    /// Place one order end to end.
    pub fn place_order(&self, request: &CheckoutRequest) -> Result<PlacedOrder, CheckoutError> {
        if request.lines.is_empty() {
            return Err(CheckoutError::EmptyOrder);
        }

        let subtotal: f64 = request.lines.iter().map(CartLine::line_total).sum();
        let tax = round_to_paise(subtotal * self.config.tax_rate);
        let delivery_fee = match request.delivery_method {
            DeliveryMethod::Delivery => self.config.delivery_fee,
            DeliveryMethod::Pickup => 0.0,
        };
        let gross_total = round_to_paise(subtotal + tax + delivery_fee);

        let order_number = new_order_number();
        let order_id = OrderId::new(order_number.clone());

        // Promo first: an invalid code aborts before anything is written.
        let promo_quote = match &request.promo_code {
            Some(input) => {
                let code = crumbs_promo::normalize(input);
                let found = self.promos.find(&code)?;
                Some(
                    crumbs_promo::evaluate(found.as_ref(), gross_total, Utc::now())
                        .map_err(CheckoutError::Promo)?,
                )
            }
            None => None,
        };

        // Redemption commits here; validation failures abort placement.
        let redeem_receipt = match request.redeem_points {
            Some(points) if points > 0 => {
                Some(self.ledger.redeem(&request.customer, points, &order_id)?)
            }
            _ => None,
        };

        let breakdown = DiscountBreakdown {
            promo_discount: promo_quote.as_ref().map(|q| q.discount).unwrap_or(0.0),
            points_discount: redeem_receipt.map(|r| r.discount).unwrap_or(0.0),
        };
        let total = breakdown.apply(gross_total);

        let charge = self.payments.charge(&ChargeRequest {
            amount: total,
            currency: self.config.currency.clone(),
            customer_email: request.customer_email.clone(),
            order_number: order_number.clone(),
        })?;

        let order = Order {
            order_number: order_number.clone(),
            customer_id: request.customer.clone(),
            customer_name: request.customer_name.clone(),
            customer_email: request.customer_email.clone(),
            delivery_method: request.delivery_method,
            subtotal,
            tax,
            delivery_fee,
            promo_code: promo_quote.as_ref().map(|q| q.code.clone()),
            promo_discount: breakdown.promo_discount,
            points_redeemed: redeem_receipt.map(|r| r.points_redeemed).unwrap_or(0),
            points_discount: breakdown.points_discount,
            total,
            payment_ref: charge.transaction_id,
            placed_at: Utc::now(),
        };

        // The order exists from here on; the rest must not fail placement.
        if let Some(quote) = &promo_quote {
            match self.promos.record_use(&quote.code) {
                Ok(true) => {}
                Ok(false) => {
                    warn!(code = %quote.code, order = %order_number, "promo usage not recorded")
                }
                Err(e) => {
                    warn!(code = %quote.code, order = %order_number, error = %e, "promo usage write failed")
                }
            }
        }

        let points_earned = match self.ledger.earn(&request.customer, total, &order_id) {
            Ok(receipt) => receipt.points_earned,
            Err(e) => {
                warn!(customer = %request.customer, order = %order_number, error = %e, "earning points failed");
                0
            }
        };

        self.send_confirmations(request, &order);

        Ok(PlacedOrder {
            order,
            points_earned,
        })
    }

    fn send_confirmations(&self, request: &CheckoutRequest, order: &Order) {
        let items: Vec<Value> = request
            .lines
            .iter()
            .map(|line| {
                json!({
                    "name": line.name,
                    "quantity": line.quantity,
                    "price": line.line_total(),
                })
            })
            .collect();
        let email = EmailMessage {
            to: order.customer_email.clone(),
            subject: format!("Order confirmed: {}", order.order_number),
            template: "order-confirmation".into(),
            data: [
                ("orderNumber".to_string(), json!(order.order_number)),
                ("customerName".to_string(), json!(order.customer_name)),
                ("total".to_string(), json!(order.total)),
                ("items".to_string(), Value::Array(items)),
            ]
            .into_iter()
            .collect(),
        };
        if let Err(e) = self.email.send(&email) {
            warn!(order = %order.order_number, error = %e, "confirmation email failed");
        }

        if let Some(phone) = &request.customer_phone {
            let sms = SmsMessage {
                to: phone.clone(),
                body: format!(
                    "Your order {} is confirmed. Total ₹{:.2}.",
                    order.order_number, order.total
                ),
            };
            if let Err(e) = self.sms.send(&sms) {
                warn!(order = %order.order_number, error = %e, "confirmation sms failed");
            }
        }
    }
}
