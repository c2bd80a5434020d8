//! Client configuration.
//!
//! [`ClientConfig`] carries everything an [`ItisPayClient`] needs before it
//! talks to the network. Values can be set in code through the `with_*`
//! builders or read from the process environment with
//! [`ClientConfig::from_env`].
//!
//! [`ItisPayClient`]: crate::client::ItisPayClient

use std::time::Duration;

use url::Url;

/// Production ItIsPay API root.
pub const DEFAULT_BASE_URL: &str = "https://api.itispay.com/api/v1";

/// Default timeout applied to every HTTP request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Header carrying the raw API key.
pub const API_KEY_HEADER: &str = "Api-key";

/// Environment variable holding the API key.
pub const ENV_API_KEY: &str = "ITISPAY_API_KEY";
/// Environment variable overriding the base URL.
pub const ENV_BASE_URL: &str = "ITISPAY_BASE_URL";
/// Environment variable overriding the timeout, in whole seconds.
pub const ENV_TIMEOUT_SECS: &str = "ITISPAY_TIMEOUT_SECS";
/// Environment variable enabling payload logging (`1`/`true`/`yes`/`on`).
pub const ENV_LOG_PAYLOADS: &str = "ITISPAY_LOG_PAYLOADS";

/// Errors produced while assembling a [`ClientConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid base url {url:?}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("base url must use http or https, got {0:?}")]
    UnsupportedScheme(String),

    #[error("invalid value for {name}: {value:?}")]
    InvalidEnv { name: &'static str, value: String },

    #[error("timeout must be greater than zero")]
    ZeroTimeout,

    /// The key holds bytes that cannot travel in an HTTP header.
    #[error("api key contains characters not allowed in a header value")]
    InvalidApiKey,
}

/// Configuration for the ItIsPay API client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root, including the version prefix (e.g. `https://api.itispay.com/api/v1`).
    pub base_url: String,
    /// Raw API key. An empty key means no `Api-key` header is sent.
    pub api_key: String,
    /// Timeout for a whole request, from connect to the last body byte.
    pub timeout: Duration,
    /// Log request and response bodies at `debug` level.
    ///
    /// Off by default: invoice payloads contain order and callback details.
    pub log_payloads: bool,
    /// Optional `User-Agent` override.
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_key: String::new(),
            timeout: DEFAULT_TIMEOUT,
            log_payloads: false,
            user_agent: None,
        }
    }
}

impl ClientConfig {
    /// Create a configuration for the production API with the given key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Build a configuration from `ITISPAY_*` environment variables.
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(key) = lookup(ENV_API_KEY) {
            config.api_key = key;
        }
        if let Some(url) = lookup(ENV_BASE_URL) {
            config.base_url = url;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                name: ENV_TIMEOUT_SECS,
                value: raw.clone(),
            })?;
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(raw) = lookup(ENV_LOG_PAYLOADS) {
            config.log_payloads = parse_flag(&raw).ok_or(ConfigError::InvalidEnv {
                name: ENV_LOG_PAYLOADS,
                value: raw,
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_payload_logging(mut self, enabled: bool) -> Self {
        self.log_payloads = enabled;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Whether requests carry the `Api-key` header.
    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Check the configuration and return the parsed base URL.
    pub fn validate(&self) -> Result<Url, ConfigError> {
        if self.timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        if !is_header_safe(&self.api_key) {
            return Err(ConfigError::InvalidApiKey);
        }
        let url = Url::parse(&self.base_url).map_err(|source| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            source,
        })?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ConfigError::UnsupportedScheme(other.to_owned())),
        }
    }

    /// Base URL with any trailing slash removed, ready for path concatenation.
    pub(crate) fn base_url_trimmed(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

/// Same byte rules as an HTTP header value: visible ASCII, space, tab and
/// obs-text; no other control characters.
fn is_header_safe(value: &str) -> bool {
    value
        .bytes()
        .all(|b| b == b'\t' || (b >= 0x20 && b != 0x7f))
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("key");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert!(config.has_api_key());
        assert!(!config.log_payloads);
        assert!(!ClientConfig::default().has_api_key());
    }

    #[test]
    fn test_from_env_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_API_KEY, "secret"),
            (ENV_BASE_URL, "http://localhost:8080/api/v1/"),
            (ENV_TIMEOUT_SECS, "5"),
            (ENV_LOG_PAYLOADS, "true"),
        ]))
        .unwrap();
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.base_url_trimmed(), "http://localhost:8080/api/v1");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(config.log_payloads);
    }

    #[test]
    fn test_from_env_empty_keeps_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_from_env_rejects_bad_values() {
        let err = ClientConfig::from_lookup(lookup(&[(ENV_TIMEOUT_SECS, "soon")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidEnv {
                name: ENV_TIMEOUT_SECS,
                ..
            }
        ));

        let err = ClientConfig::from_lookup(lookup(&[(ENV_LOG_PAYLOADS, "maybe")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { .. }));

        let err = ClientConfig::from_lookup(lookup(&[(ENV_TIMEOUT_SECS, "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroTimeout));
    }

    #[test]
    fn test_validate_base_url() {
        assert!(ClientConfig::default().validate().is_ok());

        let err = ClientConfig::default()
            .with_base_url("not a url")
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }));

        let err = ClientConfig::default()
            .with_base_url("ftp://api.itispay.com")
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedScheme(s) if s == "ftp"));
    }

    #[test]
    fn test_validate_api_key_bytes() {
        assert!(ClientConfig::new("sk_live\tabc").validate().is_ok());

        for key in ["abc\ndef", "abc\r\nX-Injected: 1", "nul\0", "del\u{7f}"] {
            let err = ClientConfig::new(key).validate().unwrap_err();
            assert!(matches!(err, ConfigError::InvalidApiKey), "{key:?}");
        }
    }
}
