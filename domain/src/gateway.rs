//! Construction of the provider gateways from service configuration.

use std::sync::Arc;
use std::time::Duration;

use repo_auth::http::HttpClientBuilder;
use repo_auth::oauth::providers::{github, gitlab};
use repo_auth::providers::{github_config, gitlab_config, ProviderConfig};
use service::config::Config;

use crate::error::Error;
use crate::Provider;

/// Build the outbound HTTP client shared by both providers.
pub fn http_client(config: &Config) -> Result<reqwest::Client, Error> {
    let client = HttpClientBuilder::new()
        .with_timeout(Duration::from_secs(config.http_timeout_secs))
        .with_user_agent(format!("review-platform/{}", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// GitHub client settings, with any endpoint overrides from config applied.
pub fn github_settings(config: &Config) -> ProviderConfig {
    let mut settings = github_config(
        config.github_client_id(),
        config.github_client_secret(),
        config.github_redirect_uri(),
    );
    if let Some(url) = config.github_auth_url() {
        settings = settings.with_auth_url(url);
    }
    if let Some(url) = config.github_token_url() {
        settings = settings.with_token_url(url);
    }
    if let Some(url) = config.github_api_url() {
        settings = settings.with_api_base_url(url);
    }
    settings
}

/// GitLab client settings, with any endpoint overrides from config applied.
pub fn gitlab_settings(config: &Config) -> ProviderConfig {
    let mut settings = gitlab_config(
        config.gitlab_client_id(),
        config.gitlab_client_secret(),
        config.gitlab_redirect_uri(),
    );
    if let Some(url) = config.gitlab_auth_url() {
        settings = settings.with_auth_url(url);
    }
    if let Some(url) = config.gitlab_token_url() {
        settings = settings.with_token_url(url);
    }
    if let Some(url) = config.gitlab_api_url() {
        settings = settings.with_api_base_url(url);
    }
    settings
}

/// Create the GitHub provider.
pub fn github_provider(config: &Config, http_client: reqwest::Client) -> Arc<dyn Provider> {
    Arc::new(github::Provider::new(github_settings(config), http_client))
}

/// Create the GitLab provider.
pub fn gitlab_provider(config: &Config, http_client: reqwest::Client) -> Arc<dyn Provider> {
    Arc::new(gitlab::Provider::new(gitlab_settings(config), http_client))
}
