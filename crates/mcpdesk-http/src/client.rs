//! Client bound to one backend server.

use mcpdesk_core::{BackendError, BackendId};
use url::Url;

use crate::config::BackendClientConfig;
use crate::error::{HttpClientError, HttpResult};
use crate::http::{HttpBackend, ReqwestBackend};
use crate::port::map_error;
use crate::routes::{BackendRoutes, Route};

/// Default backend client using the reqwest HTTP backend.
pub type DefaultBackendClient = BackendClient<ReqwestBackend>;

/// Client for one backend server.
///
/// This client is generic over an HTTP backend, allowing for easy testing.
/// Use `DefaultBackendClient` for production code and reach it through the
/// `BackendPort` trait.
pub struct BackendClient<B: HttpBackend> {
    pub(crate) backend: B,
    pub(crate) id: BackendId,
    pub(crate) base_url: Url,
    pub(crate) routes: BackendRoutes,
}

impl DefaultBackendClient {
    /// Create a client for backend `id` with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Configuration`] if the base URL is invalid or
    /// the HTTP client cannot be built.
    pub fn new(id: BackendId, config: &BackendClientConfig) -> Result<Self, BackendError> {
        let base_url = parse_base_url(&config.base_url).map_err(map_error)?;
        let backend = ReqwestBackend::new(config).map_err(|e| BackendError::Configuration {
            message: e.to_string(),
        })?;
        Ok(Self::with_backend(id, base_url, backend))
    }
}

impl<B: HttpBackend> BackendClient<B> {
    /// Create a new client with a custom backend.
    pub(crate) const fn with_backend(id: BackendId, base_url: Url, backend: B) -> Self {
        Self {
            backend,
            id,
            base_url,
            routes: BackendRoutes::for_backend(id),
        }
    }

    /// Absolute URL of `route`, with extra trailing segments.
    pub(crate) fn endpoint(&self, route: Route, extra: &[&str]) -> HttpResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| HttpClientError::UnsupportedBaseUrl {
                url: self.base_url.to_string(),
            })?
            .pop_if_empty()
            .extend(route)
            .extend(extra);
        Ok(url)
    }
}

fn parse_base_url(raw: &str) -> HttpResult<Url> {
    let url = Url::parse(raw.trim())?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(HttpClientError::UnsupportedBaseUrl {
            url: url.to_string(),
        });
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::testing::FakeBackend;
    use crate::routes::HEALTH;

    fn client(base: &str) -> BackendClient<FakeBackend> {
        BackendClient::with_backend(
            BackendId::ServiceNow,
            parse_base_url(base).unwrap(),
            FakeBackend::new(),
        )
    }

    #[test]
    fn test_default_client_creation() {
        let config = BackendClientConfig::for_backend(BackendId::M365);
        let client = DefaultBackendClient::new(BackendId::M365, &config).unwrap();
        assert_eq!(client.id, BackendId::M365);
    }

    #[test]
    fn test_invalid_base_url_is_configuration_error() {
        let config = BackendClientConfig::new("not a url");
        let err = DefaultBackendClient::new(BackendId::M365, &config).err().unwrap();
        assert!(matches!(err, BackendError::Configuration { .. }));

        let config = BackendClientConfig::new("mailto:ops@example.com");
        assert!(DefaultBackendClient::new(BackendId::M365, &config).is_err());
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let client = client("http://gateway.test/snow/");
        let url = client.endpoint(HEALTH, &[]).unwrap();
        assert_eq!(url.as_str(), "http://gateway.test/snow/health");
    }

    #[test]
    fn test_endpoint_encodes_ids() {
        let client = client("http://localhost:3002");
        let url = client
            .endpoint(client.routes.incidents, &["INC 42/a"])
            .unwrap();
        assert_eq!(url.path(), "/api/mcp/incident/INC%2042%2Fa");
    }
}
