use thiserror::Error;

/// Unified error type for the entire surebet-dashboard-core library.
/// Every public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── API / Network ───────────────────────────────────────────────
    #[error("API error ({endpoint}): {message}")]
    Api {
        endpoint: String,
        message: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── Input ───────────────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("No sheet selected")]
    SheetNotSelected,

    // ── Configuration ───────────────────────────────────────────────
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CoreError {
    /// The message a page shows to the operator.
    ///
    /// Backend failures surface the backend's own `error` field (or the
    /// per-endpoint fallback); everything else uses its `Display` form.
    pub fn user_message(&self) -> String {
        match self {
            CoreError::Api { message, .. } => message.clone(),
            CoreError::ValidationError(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::Config(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // Query strings carry the selected sheet and period; keep them out of logs.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}
