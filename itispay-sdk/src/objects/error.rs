//! Error body returned by the API on 4xx/5xx responses.

use serde::{Deserialize, Serialize};

/// `{ "error": "...", "message": "..." }`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error type, e.g. `invalid_key`.
    #[serde(default)]
    pub error: String,
    /// Human-readable description.
    #[serde(default)]
    pub message: String,
}
