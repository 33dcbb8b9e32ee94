//! Configuration for the analysis client.
//!
//! All client behaviour is controlled through [`ClientConfig`], built via its
//! [`ClientConfigBuilder`]. The base URL is injected here rather than read
//! from the process environment, so a workflow can be pointed at any endpoint
//! (a staging server, a local stub in tests).

use crate::error::AnalyzeError;
use serde::{Deserialize, Serialize};

/// Path of the analysis endpoint, appended to the base URL.
pub const ANALYZE_PATH: &str = "/api/analyze";

/// Configuration for an analysis client.
///
/// # Example
/// ```rust
/// use resume_ats::ClientConfig;
///
/// let config = ClientConfig::builder()
///     .base_url("http://localhost:8000")
///     .timeout_secs(30)
///     .build()
///     .unwrap();
/// assert_eq!(config.analyze_url(), "http://localhost:8000/api/analyze");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Service origin, e.g. `https://ats.example.com`. Default: empty.
    ///
    /// An empty string means "same origin": the request goes to the relative
    /// path `/api/analyze`. Trailing slashes are dropped by the builder.
    pub base_url: String,

    /// Per-request timeout in seconds. Default: 60. `None` waits forever.
    pub timeout_secs: Option<u64>,

    /// Message used when a non-2xx response has no usable `detail`.
    pub remote_fallback: RemoteFallback,

    /// Value of the `User-Agent` header.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout_secs: Some(60),
            remote_fallback: RemoteFallback::default(),
            user_agent: concat!("resume-ats/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    /// Create a new builder for `ClientConfig`.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder {
            config: Self::default(),
        }
    }

    /// Full URL of the analysis endpoint.
    pub fn analyze_url(&self) -> String {
        format!("{}{}", self.base_url, ANALYZE_PATH)
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.config.base_url = url.trim().trim_end_matches('/').to_string();
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.timeout_secs = Some(secs);
        self
    }

    /// Disable the client-side timeout entirely.
    pub fn no_timeout(mut self) -> Self {
        self.config.timeout_secs = None;
        self
    }

    pub fn remote_fallback(mut self, fallback: RemoteFallback) -> Self {
        self.config.remote_fallback = fallback;
        self
    }

    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.config.user_agent = ua.into();
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ClientConfig, AnalyzeError> {
        let c = &self.config;
        if c.timeout_secs == Some(0) {
            return Err(AnalyzeError::InvalidConfig(
                "Timeout must be >= 1 second (use no_timeout() to disable)".into(),
            ));
        }
        if !c.base_url.is_empty()
            && !(c.base_url.starts_with("http://") || c.base_url.starts_with("https://"))
        {
            return Err(AnalyzeError::InvalidConfig(format!(
                "Base URL must be empty or start with http:// or https://, got '{}'",
                c.base_url
            )));
        }
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// Generic message for a failed response without a `detail` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RemoteFallback {
    /// "Failed to analyze resume" (default)
    #[default]
    Analyze,
    /// "Upload failed"
    Upload,
}

impl RemoteFallback {
    pub fn message(&self) -> &'static str {
        match self {
            RemoteFallback::Analyze => "Failed to analyze resume",
            RemoteFallback::Upload => "Upload failed",
        }
    }
}
