//! Wire types for the ItIsPay API.

pub mod currency;
pub mod error;
pub mod invoice;
pub mod webhook;

pub use currency::{CurrenciesResponse, Currency, RatesResponse};
pub use error::ErrorResponse;
pub use invoice::{
    BlockchainDetails, BlockchainNetwork, CreateInvoiceRequest, Invoice, InvoiceStatus,
    ListInvoicesParams, ListInvoicesResponse, PaginationInfo, SortField, SortOrder,
    UpdateInvoiceRequest,
};
pub use webhook::{
    WebhookAck, WebhookPayload, WebhookSimulateRequest, WebhookSimulateResponse,
    parse_webhook_payload,
};

/// Error returned when a string does not name a known variant of a closed
/// vocabulary enum.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value:?}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}
