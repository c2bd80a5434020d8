//! HTTP client for the ItIsPay API.
//!
//! Gated behind the `client` cargo feature so downstream crates that only
//! need the shared types do not pull in `reqwest`.
//!
//! Every endpoint method goes through one private `execute` routine, which
//! attaches the `Api-key` header, reads the full body and maps status
//! codes >= 400 onto [`ApiError`].

mod currencies;
mod error;
mod invoices;
mod webhooks;

pub use error::{ApiError, ClientError, ErrorKind};
pub use tokio_util::sync::CancellationToken;

use bytes::Bytes;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::{Client, Method};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::config::{API_KEY_HEADER, ClientConfig, ConfigError};
use crate::objects::ErrorResponse;

/// Placeholder body for requests without a payload.
const NO_BODY: Option<&()> = None;

/// Typed HTTP client for the ItIsPay API.
///
/// Cheap to clone; clones share the connection pool of the underlying
/// `reqwest::Client`. Calls only read the client, so one instance can serve
/// many concurrent tasks.
///
/// A call is cancelled by dropping its future, or by binding a
/// [`CancellationToken`] with [`with_cancellation`](Self::with_cancellation).
#[derive(Debug, Clone)]
pub struct ItisPayClient {
    http: Client,
    base_url: String,
    api_key: Option<HeaderValue>,
    log_payloads: bool,
    cancel: Option<CancellationToken>,
}

impl ItisPayClient {
    /// Create a client for the production API with default settings.
    ///
    /// An empty `api_key` sends no `Api-key` header.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ClientError> {
        Self::from_config(ClientConfig::new(api_key))
    }

    /// Create a client from a full [`ClientConfig`].
    ///
    /// Validates the configuration and builds the HTTP transport; does not
    /// touch the network.
    pub fn from_config(config: ClientConfig) -> Result<Self, ClientError> {
        config.validate()?;

        let mut builder = Client::builder().timeout(config.timeout);
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }
        let http = builder.build()?;

        let api_key = if config.api_key.is_empty() {
            None
        } else {
            let mut value =
                HeaderValue::from_str(&config.api_key).map_err(|_| ConfigError::InvalidApiKey)?;
            value.set_sensitive(true);
            Some(value)
        };

        Ok(Self {
            http,
            base_url: config.base_url_trimmed().to_owned(),
            api_key,
            log_payloads: config.log_payloads,
            cancel: None,
        })
    }

    /// Replace the default `reqwest::Client` with a custom one (e.g. to
    /// configure a proxy). The configured timeout is not carried over.
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    /// Return a clone whose calls fail with [`ClientError::Cancelled`] as
    /// soon as `token` is cancelled.
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self {
            cancel: Some(token),
            ..self.clone()
        }
    }

    /// API root the endpoint paths are appended to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send one request and return the raw body of a successful response.
    ///
    /// `path` is appended to the base URL as-is and may carry a query string.
    async fn execute<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Bytes, ClientError>
    where
        B: Serialize + ?Sized,
    {
        let payload = body
            .map(serde_json::to_vec)
            .transpose()
            .map_err(ClientError::Encode)?;

        let url = Url::parse(&format!("{}{}", self.base_url, path))?;

        if self.log_payloads
            && let Some(payload) = &payload
        {
            debug!(
                %method,
                path,
                body = %String::from_utf8_lossy(payload),
                "ItIsPay request payload"
            );
        }

        let mut request = self
            .http
            .request(method.clone(), url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(api_key) = &self.api_key {
            request = request.header(API_KEY_HEADER, api_key.clone());
        }
        if let Some(payload) = payload {
            request = request.body(payload);
        }

        let exchange = async {
            let resp = request.send().await?;
            let status = resp.status();
            let bytes = resp.bytes().await?;
            Ok::<_, reqwest::Error>((status, bytes))
        };

        let outcome = match &self.cancel {
            Some(token) => tokio::select! {
                biased;

                _ = token.cancelled() => {
                    debug!(%method, path, "ItIsPay request cancelled");
                    return Err(ClientError::Cancelled);
                }

                outcome = exchange => outcome,
            },
            None => exchange.await,
        };

        let (status, bytes) = outcome.map_err(|e| {
            debug!(error = %e, %method, path, "ItIsPay request failed");
            ClientError::Transport(e)
        })?;

        debug!(%method, path, status = status.as_u16(), "ItIsPay request completed");

        if self.log_payloads {
            debug!(
                %method,
                path,
                body = %String::from_utf8_lossy(&bytes),
                "ItIsPay response payload"
            );
        }

        if status.as_u16() >= 400 {
            let err = api_error(status.as_u16(), &bytes);
            warn!(
                %method,
                path,
                status = err.status,
                error_type = %err.error_type,
                "ItIsPay API error: {}",
                err
            );
            return Err(ClientError::Api(err));
        }

        Ok(bytes)
    }
}

/// Build an [`ApiError`] from an error response body, falling back to the
/// raw text when it is not the documented JSON shape.
///
/// A JSON `null` body counts as an empty error object.
fn api_error(status: u16, body: &[u8]) -> ApiError {
    match serde_json::from_slice::<Option<ErrorResponse>>(body) {
        Ok(resp) => {
            let resp = resp.unwrap_or_default();
            ApiError {
                status,
                error_type: resp.error,
                message: resp.message,
            }
        }
        Err(_) => ApiError {
            status,
            error_type: String::new(),
            message: String::from_utf8_lossy(body).into_owned(),
        },
    }
}

fn decode<T: DeserializeOwned>(context: &'static str, body: &[u8]) -> Result<T, ClientError> {
    serde_json::from_slice(body).map_err(|source| ClientError::Decode { context, source })
}
