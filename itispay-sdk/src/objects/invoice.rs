//! Invoice request and response types.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::UnknownVariant;

/// Invoice status as reported by the server.
///
/// This is the closed set the API documents. The client never rejects an
/// invoice for carrying a status outside of it; see [`Invoice::parsed_status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    New,
    Pending,
    Completed,
    Expired,
    Cancelled,
    PaidPartial,
}

impl InvoiceStatus {
    pub const ALL: [InvoiceStatus; 6] = [
        InvoiceStatus::New,
        InvoiceStatus::Pending,
        InvoiceStatus::Completed,
        InvoiceStatus::Expired,
        InvoiceStatus::Cancelled,
        InvoiceStatus::PaidPartial,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::New => "new",
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Completed => "completed",
            InvoiceStatus::Expired => "expired",
            InvoiceStatus::Cancelled => "cancelled",
            InvoiceStatus::PaidPartial => "paid_partial",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for InvoiceStatus {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for InvoiceStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "invoice status",
                value: s.to_owned(),
            })
    }
}

/// Field an invoice listing can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    CreatedAt,
    UpdatedAt,
    FiatAmount,
    CryptoAmount,
}

impl SortField {
    pub const fn as_str(&self) -> &'static str {
        match self {
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
            SortField::FiatAmount => "fiat_amount",
            SortField::CryptoAmount => "crypto_amount",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort direction of an invoice listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub const fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Request payload for `POST /invoices`.
///
/// Either `fiat_amount` or `crypto_amount` is expected by the server. Unset
/// optional fields are left out of the JSON body entirely, so an explicit
/// zero is distinguishable from "not specified".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateInvoiceRequest {
    /// Merchant-side order identifier.
    pub order_id: String,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub fiat_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiat_currency: Option<String>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub crypto_amount: Option<Decimal>,
    /// Crypto currency the payer settles in (e.g. `BTC`).
    pub currency: String,
    /// Tolerance band, in percent, for under- and overpayment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_error_percent: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_name: Option<String>,
    /// Minutes until the invoice expires.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expire_min: Option<i32>,
    /// URL the server posts [`WebhookPayload`](super::WebhookPayload)s to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
}

impl CreateInvoiceRequest {
    pub fn new(order_id: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            order_id: order_id.into(),
            fiat_amount: None,
            fiat_currency: None,
            crypto_amount: None,
            currency: currency.into(),
            allowed_error_percent: None,
            order_name: None,
            expire_min: None,
            callback_url: None,
        }
    }

    pub fn with_fiat_amount(mut self, amount: Decimal) -> Self {
        self.fiat_amount = Some(amount);
        self
    }

    pub fn with_fiat_currency(mut self, currency: impl Into<String>) -> Self {
        self.fiat_currency = non_empty(currency.into());
        self
    }

    pub fn with_crypto_amount(mut self, amount: Decimal) -> Self {
        self.crypto_amount = Some(amount);
        self
    }

    pub fn with_allowed_error_percent(mut self, percent: i32) -> Self {
        self.allowed_error_percent = Some(percent);
        self
    }

    pub fn with_order_name(mut self, name: impl Into<String>) -> Self {
        self.order_name = non_empty(name.into());
        self
    }

    pub fn with_expire_min(mut self, minutes: i32) -> Self {
        self.expire_min = Some(minutes);
        self
    }

    pub fn with_callback_url(mut self, url: impl Into<String>) -> Self {
        self.callback_url = non_empty(url.into());
        self
    }
}

fn non_empty(s: String) -> Option<String> {
    (!s.is_empty()).then_some(s)
}

/// Request payload for `PATCH /invoices/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UpdateInvoiceRequest {
    /// Passed through verbatim; the server decides which values it accepts.
    pub status: String,
}

/// Filters and paging for `GET /invoices`.
///
/// Every field defaults to "no constraint". Unset, zero or empty values are
/// not sent, and the server applies its own defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListInvoicesParams {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub status: Option<InvoiceStatus>,
    pub currency: Option<String>,
    pub created_after: Option<OffsetDateTime>,
    pub created_before: Option<OffsetDateTime>,
    pub sort_by: Option<SortField>,
    pub sort_order: Option<SortOrder>,
}

impl ListInvoicesParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn status(mut self, status: InvoiceStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    pub fn created_after(mut self, at: OffsetDateTime) -> Self {
        self.created_after = Some(at);
        self
    }

    pub fn created_before(mut self, at: OffsetDateTime) -> Self {
        self.created_before = Some(at);
        self
    }

    pub fn sort(mut self, field: SortField, order: SortOrder) -> Self {
        self.sort_by = Some(field);
        self.sort_order = Some(order);
        self
    }

    /// Build the query string (without the leading `?`).
    ///
    /// Parameters appear in a fixed order: `page`, `page_size`, `status`,
    /// `currency`, `created_after`, `created_before`, `sort_by`,
    /// `sort_order`. Returns an empty string when nothing is set.
    pub fn to_query_string(&self) -> Result<String, time::error::Format> {
        let mut query = url::form_urlencoded::Serializer::new(String::new());

        if let Some(page) = self.page.filter(|p| *p > 0) {
            query.append_pair("page", &page.to_string());
        }
        if let Some(page_size) = self.page_size.filter(|p| *p > 0) {
            query.append_pair("page_size", &page_size.to_string());
        }
        if let Some(status) = self.status {
            query.append_pair("status", status.as_str());
        }
        if let Some(currency) = self.currency.as_deref().filter(|c| !c.is_empty()) {
            query.append_pair("currency", currency);
        }
        if let Some(after) = self.created_after {
            query.append_pair("created_after", &format_rfc3339(after)?);
        }
        if let Some(before) = self.created_before {
            query.append_pair("created_before", &format_rfc3339(before)?);
        }
        if let Some(sort_by) = self.sort_by {
            query.append_pair("sort_by", sort_by.as_str());
        }
        if let Some(sort_order) = self.sort_order {
            query.append_pair("sort_order", sort_order.as_str());
        }

        Ok(query.finish())
    }
}

/// RFC 3339 at whole-second precision; sub-second parts are truncated.
fn format_rfc3339(at: OffsetDateTime) -> Result<String, time::error::Format> {
    let at = at.replace_nanosecond(0).unwrap_or(at);
    at.format(&time::format_description::well_known::Rfc3339)
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// An invoice as returned by the create, get, list and update endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub invoice_id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub project_id: String,
    pub order_id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub fiat_amount: Decimal,
    #[serde(default)]
    pub fiat_currency: String,
    /// Crypto currency code.
    pub currency: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub crypto_amount: Decimal,
    /// Expected amount in the currency's minor units, when the server provides it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crypto_amount_in_units: Option<i64>,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub actual_crypto_amount_paid: Decimal,
    #[serde(default)]
    pub actual_crypto_amount_paid_in_units: i64,
    #[serde(default)]
    pub allowed_error_percent: i32,
    #[serde(default)]
    pub order_name: String,
    #[serde(default)]
    pub expire_min: i32,
    #[serde(default)]
    pub callback_url: String,
    /// Raw status string; see [`Invoice::parsed_status`].
    pub status: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub expires_at: OffsetDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blockchain_details: Option<BlockchainDetails>,
}

impl Invoice {
    /// The status as an [`InvoiceStatus`], or `None` if the server sent a
    /// value outside the documented set.
    pub fn parsed_status(&self) -> Option<InvoiceStatus> {
        self.status.parse().ok()
    }

    /// Deposit address the payer should send funds to, if assigned.
    pub fn payment_address(&self) -> Option<&str> {
        self.blockchain_details
            .as_ref()
            .map(|details| details.blockchain_address.as_str())
    }
}

/// Deposit wallet assigned to an invoice. Keys are camelCase on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockchainDetails {
    #[serde(default)]
    pub wallet_id: String,
    #[serde(default)]
    pub account_id: String,
    #[serde(default)]
    pub currency: String,
    pub blockchain_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blockchain_network: Option<BlockchainNetwork>,
    /// QR code payload for the deposit.
    #[serde(rename = "qrcode", default, skip_serializing_if = "Option::is_none")]
    pub qr_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockchainNetwork {
    pub name: String,
    #[serde(rename = "type")]
    pub network_type: String,
}

/// Response of `GET /invoices`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListInvoicesResponse {
    pub data: Vec<Invoice>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaginationInfo {
    pub current_page: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub total_records: i64,
    pub has_next: bool,
    pub has_previous: bool,
}
