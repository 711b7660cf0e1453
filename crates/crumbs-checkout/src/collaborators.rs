//! Narrow interfaces to the shop's external providers.
//!
//! Email, SMS, and payment are external collaborators with fixed call
//! contracts; this core only ever sees the traits. The mock implementations
//! mirror the shop's development-mode providers: they log the dispatch,
//! record it for inspection, and succeed (or decline when scripted to).

use std::collections::BTreeMap;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

/// A templated transactional email.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub template: String,
    pub data: BTreeMap<String, Value>,
}

/// A plain-text SMS.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SmsMessage {
    pub to: String,
    pub body: String,
}

/// Provider acknowledgement for a dispatched message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DispatchReceipt {
    pub message_id: String,
}

/// A message could not be handed to the provider.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("dispatch failed: {0}")]
pub struct DispatchError(pub String);

/// A payment to collect before an order is placed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChargeRequest {
    pub amount: f64,
    pub currency: String,
    pub customer_email: String,
    pub order_number: String,
}

/// Proof that a charge settled.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChargeReceipt {
    pub transaction_id: String,
}

/// A charge did not settle.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PaymentError {
    #[error("payment declined: {reason}")]
    Declined { reason: String },

    #[error("payment gateway error: {0}")]
    Gateway(String),
}

pub trait EmailSender: Send + Sync {
    fn send(&self, message: &EmailMessage) -> Result<DispatchReceipt, DispatchError>;
}

pub trait SmsSender: Send + Sync {
    fn send(&self, message: &SmsMessage) -> Result<DispatchReceipt, DispatchError>;
}

pub trait PaymentGateway: Send + Sync {
    fn charge(&self, request: &ChargeRequest) -> Result<ChargeReceipt, PaymentError>;
}

impl<T: EmailSender + ?Sized> EmailSender for &T {
    fn send(&self, message: &EmailMessage) -> Result<DispatchReceipt, DispatchError> {
        (**self).send(message)
    }
}

impl<T: SmsSender + ?Sized> SmsSender for &T {
    fn send(&self, message: &SmsMessage) -> Result<DispatchReceipt, DispatchError> {
        (**self).send(message)
    }
}

impl<T: PaymentGateway + ?Sized> PaymentGateway for &T {
    fn charge(&self, request: &ChargeRequest) -> Result<ChargeReceipt, PaymentError> {
        (**self).charge(request)
    }
}

/// Mock email provider: logs and records every message.
#[derive(Debug, Default)]
pub struct MockEmailSender {
    sent: RwLock<Vec<EmailMessage>>,
}

impl MockEmailSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything dispatched so far, oldest first.
    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.read().map(|s| s.clone()).unwrap_or_default()
    }
}

impl EmailSender for MockEmailSender {
    fn send(&self, message: &EmailMessage) -> Result<DispatchReceipt, DispatchError> {
        info!(to = %message.to, template = %message.template, "mock email dispatched");
        self.sent
            .write()
            .map_err(|e| DispatchError(format!("lock poisoned: {e}")))?
            .push(message.clone());
        Ok(DispatchReceipt {
            message_id: format!("mock-email-{}", Uuid::now_v7().simple()),
        })
    }
}

/// Mock SMS provider: normalizes the number, logs, and records.
#[derive(Debug, Default)]
pub struct MockSmsSender {
    sent: RwLock<Vec<SmsMessage>>,
}

impl MockSmsSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<SmsMessage> {
        self.sent.read().map(|s| s.clone()).unwrap_or_default()
    }

    /// Bare 10-digit numbers are assumed to be Indian mobiles.
    fn format_phone(phone: &str) -> String {
        let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
        if digits.len() == 10 {
            format!("+91{digits}")
        } else if phone.starts_with('+') {
            phone.to_string()
        } else {
            format!("+{digits}")
        }
    }
}

impl SmsSender for MockSmsSender {
    fn send(&self, message: &SmsMessage) -> Result<DispatchReceipt, DispatchError> {
        let to = Self::format_phone(&message.to);
        info!(%to, "mock sms dispatched");
        self.sent
            .write()
            .map_err(|e| DispatchError(format!("lock poisoned: {e}")))?
            .push(SmsMessage {
                to,
                body: message.body.clone(),
            });
        Ok(DispatchReceipt {
            message_id: format!("mock-sms-{}", Uuid::now_v7().simple()),
        })
    }
}

/// Mock payment gateway that settles everything unless scripted to decline.
#[derive(Debug, Default)]
pub struct MockPaymentGateway {
    decline_with: RwLock<Option<String>>,
    charged: RwLock<Vec<ChargeRequest>>,
}

impl MockPaymentGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next (and every subsequent) charge decline with `reason`.
    pub fn decline_with(&self, reason: impl Into<String>) {
        if let Ok(mut slot) = self.decline_with.write() {
            *slot = Some(reason.into());
        }
    }

    /// Charges the gateway has settled, oldest first.
    pub fn charged(&self) -> Vec<ChargeRequest> {
        self.charged.read().map(|c| c.clone()).unwrap_or_default()
    }
}

impl PaymentGateway for MockPaymentGateway {
    fn charge(&self, request: &ChargeRequest) -> Result<ChargeReceipt, PaymentError> {
        if let Some(reason) = self
            .decline_with
            .read()
            .map_err(|e| PaymentError::Gateway(format!("lock poisoned: {e}")))?
            .clone()
        {
            return Err(PaymentError::Declined { reason });
        }

        info!(
            order = %request.order_number,
            amount = request.amount,
            currency = %request.currency,
            "mock payment settled"
        );
        self.charged
            .write()
            .map_err(|e| PaymentError::Gateway(format!("lock poisoned: {e}")))?
            .push(request.clone());
        Ok(ChargeReceipt {
            transaction_id: format!("TXN-{}", Uuid::now_v7().simple()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_email_records_what_it_sends() {
        let sender = MockEmailSender::new();
        let message = EmailMessage {
            to: "cake@example.com".into(),
            subject: "Order confirmed".into(),
            template: "order-confirmation".into(),
            data: BTreeMap::new(),
        };

        let receipt = sender.send(&message).unwrap();
        assert!(receipt.message_id.starts_with("mock-email-"));
        assert_eq!(sender.sent(), vec![message]);
    }

    #[test]
    fn sms_numbers_are_normalized_to_country_code() {
        let sender = MockSmsSender::new();
        sender
            .send(&SmsMessage {
                to: "98765 43210".into(),
                body: "hi".into(),
            })
            .unwrap();
        sender
            .send(&SmsMessage {
                to: "+14155550100".into(),
                body: "hi".into(),
            })
            .unwrap();

        let sent = sender.sent();
        assert_eq!(sent[0].to, "+919876543210");
        assert_eq!(sent[1].to, "+14155550100");
    }

    #[test]
    fn scripted_declines_fail_the_charge() {
        let gateway = MockPaymentGateway::new();
        let request = ChargeRequest {
            amount: 500.0,
            currency: "INR".into(),
            customer_email: "cake@example.com".into(),
            order_number: "ORD-1".into(),
        };

        assert!(gateway.charge(&request).is_ok());

        gateway.decline_with("card expired");
        let err = gateway.charge(&request).unwrap_err();
        assert_eq!(
            err,
            PaymentError::Declined {
                reason: "card expired".into()
            }
        );
        // Only the settled charge was recorded.
        assert_eq!(gateway.charged().len(), 1);
    }
}
