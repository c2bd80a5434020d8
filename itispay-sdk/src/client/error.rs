//! Errors produced by [`ItisPayClient`](super::ItisPayClient).

use std::fmt;

use crate::config::ConfigError;

/// Coarse classification of a [`ClientError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Encoding, decoding or configuration failed on this side. Points at a
    /// client bug or a server contract change.
    Local,
    /// No response was received: connect, TLS, timeout, cancellation.
    Transport,
    /// The server answered with status >= 400.
    Api,
}

/// Error reported by the ItIsPay API.
///
/// When the error body is not the documented `{error, message}` JSON,
/// `error_type` is empty and `message` holds the raw body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: u16,
    pub error_type: String,
    pub message: String,
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.message.is_empty() {
            f.write_str(&self.message)
        } else {
            f.write_str(&self.error_type)
        }
    }
}

impl std::error::Error for ApiError {}

/// Errors produced by the SDK HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request body could not be serialized.
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// A successful response did not have the expected shape.
    #[error("failed to decode {context} response: {source}")]
    Decode {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The request URL could not be built.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    /// The invoice id cannot be used as a path segment (empty, `.` or `..`).
    #[error("invalid invoice id {0:?}")]
    InvalidInvoiceId(String),

    /// A query parameter timestamp could not be formatted.
    #[error("failed to format timestamp: {0}")]
    Format(#[from] time::error::Format),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Transport-level failure (DNS, TLS, connection reset, timeout, …).
    #[error("http error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The caller's cancellation token fired before the call completed.
    #[error("request cancelled")]
    Cancelled,

    /// The server returned status >= 400.
    #[error("api error (status {status}): {0}", status = .0.status)]
    Api(ApiError),
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Encode(_)
            | ClientError::Decode { .. }
            | ClientError::Url(_)
            | ClientError::InvalidInvoiceId(_)
            | ClientError::Format(_)
            | ClientError::Config(_) => ErrorKind::Local,
            ClientError::Transport(_) | ClientError::Cancelled => ErrorKind::Transport,
            ClientError::Api(_) => ErrorKind::Api,
        }
    }

    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            ClientError::Api(err) => Some(err),
            _ => None,
        }
    }

    /// HTTP status of an API error.
    pub fn status(&self) -> Option<u16> {
        self.api_error().map(|err| err.status)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ClientError::Cancelled)
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ClientError::Transport(err) if err.is_timeout())
    }
}

impl From<ApiError> for ClientError {
    fn from(err: ApiError) -> Self {
        ClientError::Api(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display_prefers_message() {
        let err = ApiError {
            status: 401,
            error_type: "invalid_key".to_string(),
            message: "API key is invalid".to_string(),
        };
        assert_eq!(err.to_string(), "API key is invalid");
        assert!(err.is_unauthorized());

        let err = ApiError {
            status: 404,
            error_type: "not_found".to_string(),
            message: String::new(),
        };
        assert_eq!(err.to_string(), "not_found");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_kind_tags() {
        let api = ClientError::from(ApiError {
            status: 400,
            error_type: String::new(),
            message: "bad".to_string(),
        });
        assert_eq!(api.kind(), ErrorKind::Api);
        assert_eq!(api.status(), Some(400));
        assert_eq!(api.to_string(), "api error (status 400): bad");

        assert_eq!(ClientError::Cancelled.kind(), ErrorKind::Transport);
        assert!(ClientError::Cancelled.is_cancelled());
        assert_eq!(ClientError::Cancelled.status(), None);

        let decode = serde_json::from_str::<u32>("x").unwrap_err();
        let err = ClientError::Decode {
            context: "invoice",
            source: decode,
        };
        assert_eq!(err.kind(), ErrorKind::Local);
        assert!(err.api_error().is_none());

        let err = ClientError::from(ConfigError::ZeroTimeout);
        assert_eq!(err.kind(), ErrorKind::Local);

        let err = ClientError::InvalidInvoiceId("..".to_string());
        assert_eq!(err.kind(), ErrorKind::Local);
        assert_eq!(err.to_string(), r#"invalid invoice id "..""#);
    }
}
