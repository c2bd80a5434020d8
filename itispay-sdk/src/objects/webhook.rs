//! Webhook payloads: the simulation endpoint and the callback body.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::invoice::InvoiceStatus;

/// Request body for `POST /webhooks/simulate`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WebhookSimulateRequest {
    pub invoice_id: String,
    pub status: String,
}

/// Response of `POST /webhooks/simulate`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WebhookSimulateResponse {
    pub status: String,
    #[serde(default)]
    pub message: String,
}

/// Body ItIsPay posts to an invoice's `callback_url` when its status changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookPayload {
    pub invoice_id: String,
    pub status: String,
    pub order_id: String,
    /// Crypto currency code.
    pub currency: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub crypto_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub fiat_amount: Decimal,
    pub fiat_currency: String,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub actual_crypto_amount_paid: Decimal,
    #[serde(default)]
    pub actual_crypto_amount_paid_in_units: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl WebhookPayload {
    pub fn parsed_status(&self) -> Option<InvoiceStatus> {
        self.status.parse().ok()
    }
}

/// Acknowledgement body a webhook handler answers with, alongside HTTP 200.
///
/// Any other status code counts as a failed delivery on the ItIsPay side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WebhookAck {
    pub status: String,
}

impl WebhookAck {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_owned(),
        }
    }
}

impl Default for WebhookAck {
    fn default() -> Self {
        Self::ok()
    }
}

/// Decode a raw webhook request body.
///
/// # Example
///
/// ```ignore
/// use itispay_sdk::objects::{parse_webhook_payload, InvoiceStatus, WebhookAck};
///
/// let payload = parse_webhook_payload(&body)?;
/// if payload.parsed_status() == Some(InvoiceStatus::Completed) {
///     fulfil(&payload.order_id);
/// }
/// let ack = serde_json::to_vec(&WebhookAck::ok())?;
/// ```
pub fn parse_webhook_payload(body: &[u8]) -> Result<WebhookPayload, serde_json::Error> {
    serde_json::from_slice(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_parse_webhook_payload() {
        let body = br#"{
            "invoice_id": "inv_123",
            "status": "paid_partial",
            "order_id": "ORDER-1",
            "currency": "BTC",
            "crypto_amount": 0.001,
            "fiat_amount": 50,
            "fiat_currency": "EUR",
            "actual_crypto_amount_paid": 0.0005,
            "actual_crypto_amount_paid_in_units": 50000,
            "updated_at": "2024-05-01T10:15:00+02:00"
        }"#;
        let payload = parse_webhook_payload(body).unwrap();
        assert_eq!(payload.parsed_status(), Some(InvoiceStatus::PaidPartial));
        assert_eq!(payload.crypto_amount, Decimal::new(1, 3));
        assert_eq!(payload.fiat_amount, Decimal::new(50, 0));
        assert_eq!(payload.actual_crypto_amount_paid, Decimal::new(5, 4));
        assert_eq!(payload.actual_crypto_amount_paid_in_units, 50000);
        assert_eq!(payload.updated_at, datetime!(2024-05-01 08:15:00 UTC));
    }

    #[test]
    fn test_parse_webhook_payload_rejects_garbage() {
        assert!(parse_webhook_payload(b"not json").is_err());
        assert!(parse_webhook_payload(br#"{"invoice_id":"inv_123"}"#).is_err());
    }

    #[test]
    fn test_ack_body() {
        assert_eq!(
            serde_json::to_string(&WebhookAck::ok()).unwrap(),
            r#"{"status":"ok"}"#
        );
    }
}
