use serde::{Deserialize, Serialize};
use std::path::Path;

use super::chart::{ChartCanvas, TOOLTIP_GAP, TOOLTIP_HEIGHT, TOOLTIP_WIDTH};
use crate::errors::CoreError;

pub const DEFAULT_API_URL: &str = "http://localhost:3000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CURRENCY_PREFIX: &str = "R$";

/// Runtime configuration of the dashboard core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Base URL of the backend API, without the `/api` suffix.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Per-request timeout (ignored on wasm32, where the browser owns timeouts).
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Logical canvas of the cumulative-profit chart.
    #[serde(default)]
    pub canvas: ChartCanvas,

    /// Prefix used when formatting money (e.g., "R$").
    #[serde(default = "default_currency_prefix")]
    pub currency_prefix: String,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_currency_prefix() -> String {
    DEFAULT_CURRENCY_PREFIX.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            request_timeout_secs: default_timeout_secs(),
            canvas: ChartCanvas::default(),
            currency_prefix: default_currency_prefix(),
        }
    }
}

impl Settings {
    /// Settings for a given backend, everything else defaulted.
    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Self::default()
        }
    }

    /// Read settings from the process environment.
    ///
    /// - `SUREBET_API_URL` (falls back to `VITE_API_URL`, then the default)
    /// - `SUREBET_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Settings::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(url) = lookup("SUREBET_API_URL").or_else(|| lookup("VITE_API_URL")) {
            settings.api_url = url;
        }
        if let Some(raw) = lookup("SUREBET_TIMEOUT_SECS") {
            settings.request_timeout_secs = raw.trim().parse().map_err(|_| {
                CoreError::Config(format!("SUREBET_TIMEOUT_SECS must be a whole number, got '{raw}'"))
            })?;
        }

        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file. Missing keys take their defaults.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let settings: Settings = serde_json::from_str(&raw)
            .map_err(|e| CoreError::Config(format!("Invalid settings file: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject configurations the client or the chart cannot work with.
    pub fn validate(&self) -> Result<(), CoreError> {
        let url = self.api_url.trim();
        if url.is_empty() {
            return Err(CoreError::Config("api_url must not be empty".into()));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(CoreError::Config(format!(
                "api_url must start with http:// or https://, got '{url}'"
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(CoreError::Config("request_timeout_secs must be positive".into()));
        }
        let c = &self.canvas;
        if !(c.padding_x >= 0.0 && c.padding_y >= 0.0) {
            return Err(CoreError::Config(format!(
                "chart paddings must not be negative, got {}/{}",
                c.padding_x, c.padding_y
            )));
        }
        // The tooltip box has to fit between the paddings.
        if !(c.plot_width() >= TOOLTIP_WIDTH && c.plot_height() >= TOOLTIP_HEIGHT + TOOLTIP_GAP) {
            return Err(CoreError::Config(format!(
                "chart canvas {}x{} leaves no room for a {TOOLTIP_WIDTH}x{TOOLTIP_HEIGHT} tooltip inside paddings {}/{}",
                c.width, c.height, c.padding_x, c.padding_y
            )));
        }
        Ok(())
    }

    /// `api_url` without trailing slashes, ready to have paths appended.
    pub fn base_url(&self) -> &str {
        self.api_url.trim().trim_end_matches('/')
    }
}
