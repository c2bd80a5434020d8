//! Rust SDK for ItIsPay, a hosted cryptocurrency payment gateway.
//!
//! The [`objects`] module holds the wire types shared with the ItIsPay API and
//! is always available. The typed HTTP client lives in [`client`] and is gated
//! behind the `client` cargo feature (enabled by default).
//!
//! ```ignore
//! use itispay_sdk::client::ItisPayClient;
//! use itispay_sdk::objects::CreateInvoiceRequest;
//! use rust_decimal::Decimal;
//!
//! let client = ItisPayClient::new("your-api-key")?;
//! let invoice = client
//!     .create_invoice(
//!         &CreateInvoiceRequest::new("ORDER-1", "BTC")
//!             .with_fiat_amount(Decimal::new(25, 0))
//!             .with_fiat_currency("EUR"),
//!     )
//!     .await?;
//! println!("pay to {:?}", invoice.payment_address());
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::panic))]
#![forbid(unsafe_code)]

pub mod config;
pub mod objects;

#[cfg(feature = "client")]
pub mod client;

pub use config::{ClientConfig, ConfigError};
