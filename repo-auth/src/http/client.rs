//! HTTP client builder shared by all providers.

use std::time::Duration;

use crate::error::{http_error, Error, HttpErrorKind};

/// HTTP client configuration.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Request timeout, applied to every outbound call.
    pub timeout: Duration,
    /// User agent string. GitHub rejects API requests without one.
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            user_agent: format!("repo-auth/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Builder for the outbound HTTP client.
///
/// Failed calls are never retried; a failure is returned to the request that
/// triggered it.
pub struct HttpClientBuilder {
    config: HttpClientConfig,
}

impl HttpClientBuilder {
    /// Create a new client builder with default configuration.
    pub fn new() -> Self {
        Self {
            config: HttpClientConfig::default(),
        }
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the user agent string.
    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.config.user_agent = user_agent;
        self
    }

    /// Build the configured HTTP client.
    pub fn build(self) -> Result<reqwest::Client, Error> {
        reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(self.config.timeout)
            .user_agent(self.config.user_agent)
            .build()
            .map_err(|e| http_error(HttpErrorKind::BuilderFailed, e))
    }
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_default() {
        let builder = HttpClientBuilder::new();
        assert_eq!(builder.config.timeout, Duration::from_secs(10));
        assert!(builder.config.user_agent.starts_with("repo-auth/"));
    }

    #[test]
    fn test_builder_with_timeout() {
        let builder = HttpClientBuilder::new().with_timeout(Duration::from_secs(60));
        assert_eq!(builder.config.timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_builder_with_user_agent() {
        let builder = HttpClientBuilder::new().with_user_agent("review-platform/1.0".to_string());
        assert_eq!(builder.config.user_agent, "review-platform/1.0");
    }

    #[tokio::test]
    async fn test_build_client() {
        let result = HttpClientBuilder::new().build();
        assert!(result.is_ok());
    }

    #[test]
    fn test_build_with_invalid_user_agent_fails() {
        let err = HttpClientBuilder::new()
            .with_user_agent("review\nplatform".to_string())
            .build()
            .unwrap_err();
        assert_eq!(
            err.error_kind,
            crate::error::ErrorKind::Http(HttpErrorKind::BuilderFailed)
        );
        assert!(err.source.is_some());
    }
}
