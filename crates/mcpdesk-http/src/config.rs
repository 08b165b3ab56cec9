//! Public configuration for a backend client.

use std::time::Duration;

use mcpdesk_core::BackendId;

/// Base URL a backend listens on when nothing else is configured.
pub const fn default_base_url(id: BackendId) -> &'static str {
    match id {
        BackendId::M365 => "http://localhost:3001",
        BackendId::ServiceNow => "http://localhost:3002",
    }
}

/// Configuration for one backend client.
///
/// # Example
///
/// ```
/// use mcpdesk_http::BackendClientConfig;
/// use std::time::Duration;
///
/// let config = BackendClientConfig::new("http://localhost:3001")
///     .with_timeout(Duration::from_secs(10))
///     .with_user_agent("my-console/1.0");
/// ```
#[derive(Debug, Clone)]
pub struct BackendClientConfig {
    /// Base URL of the backend server
    pub(crate) base_url: String,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
    /// Request timeout; `None` leaves requests unbounded
    pub(crate) timeout: Option<Duration>,
}

impl BackendClientConfig {
    /// Create a configuration for the backend at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            user_agent: concat!("mcpdesk/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: None,
        }
    }

    /// Configuration pointing at the backend's default local address.
    #[must_use]
    pub fn for_backend(id: BackendId) -> Self {
        Self::new(default_base_url(id))
    }

    /// Set the base URL.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the user agent string for HTTP requests.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set an optional request timeout.
    #[must_use]
    pub const fn with_optional_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
