//! Platform HTTP client.
//!
//! One reqwest client shared behind an `Arc`; auth, rest, and storage
//! modules layer their endpoints on top of it.

use std::sync::Arc;

use reqwest::{RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::PlatformError;
use crate::config::PlatformConfig;

/// Which API key a request is signed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KeyKind {
    /// Public anon key - subject to the platform's row-level access rules.
    Anon,
    /// Privileged service-role key - bypasses access rules. CLI only.
    Service,
}

/// Client for the hosted backend platform.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Clone)]
pub struct PlatformClient {
    inner: Arc<PlatformClientInner>,
}

struct PlatformClientInner {
    http: reqwest::Client,
    base_url: Url,
    anon_key: SecretString,
    service_key: Option<SecretString>,
}

impl PlatformClient {
    /// Create a new platform client from configuration.
    #[must_use]
    pub fn new(config: &PlatformConfig) -> Self {
        Self {
            inner: Arc::new(PlatformClientInner {
                http: reqwest::Client::new(),
                base_url: config.url.clone(),
                anon_key: config.anon_key.clone(),
                service_key: config.service_key.clone(),
            }),
        }
    }

    /// Whether a privileged service key is configured.
    #[must_use]
    pub fn has_service_key(&self) -> bool {
        self.inner.service_key.is_some()
    }

    /// Resolve an endpoint path against the project base URL.
    pub(crate) fn endpoint(&self, path: &str) -> Url {
        let mut url = self.inner.base_url.clone();
        {
            let mut segments = url.path_segments_mut().unwrap_or_else(|()| {
                // base_url was validated at config load; cannot-be-a-base
                // URLs never get here
                unreachable!("platform base URL cannot be a base")
            });
            segments.pop_if_empty();
            for segment in path.split('/').filter(|s| !s.is_empty()) {
                segments.push(segment);
            }
        }
        url
    }

    /// Start a request against `path`, signed with the chosen key.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::MissingServiceKey`] for privileged requests
    /// when no service key is configured.
    pub(crate) fn request(
        &self,
        method: reqwest::Method,
        path: &str,
        key: KeyKind,
    ) -> Result<RequestBuilder, PlatformError> {
        let token = match key {
            KeyKind::Anon => self.inner.anon_key.expose_secret(),
            KeyKind::Service => self
                .inner
                .service_key
                .as_ref()
                .ok_or(PlatformError::MissingServiceKey)?
                .expose_secret(),
        };

        Ok(self
            .inner
            .http
            .request(method, self.endpoint(path))
            .header("apikey", token)
            .bearer_auth(token))
    }

    /// Send a request and map non-success statuses to [`PlatformError`].
    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<Response, PlatformError> {
        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(PlatformError::RateLimited(retry_after));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message: String = body.chars().take(500).collect();
            tracing::error!(
                status = %status,
                body = %message,
                "platform returned non-success status"
            );
            return Err(PlatformError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client() -> PlatformClient {
        let config = PlatformConfig::new("https://proj.example.co", "anon-key").unwrap();
        PlatformClient::new(&config)
    }

    #[test]
    fn test_endpoint_joins_segments() {
        let client = client();
        assert_eq!(
            client.endpoint("rest/v1/products").as_str(),
            "https://proj.example.co/rest/v1/products"
        );
        assert_eq!(
            client.endpoint("/auth/v1/token").as_str(),
            "https://proj.example.co/auth/v1/token"
        );
    }

    #[test]
    fn test_privileged_request_requires_service_key() {
        let client = client();
        let result = client.request(reqwest::Method::GET, "rest/v1/x", KeyKind::Service);
        assert!(matches!(result, Err(PlatformError::MissingServiceKey)));
    }
}
