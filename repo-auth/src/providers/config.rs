//! Pre-configured provider settings.

use secrecy::SecretString;

use crate::oauth::ProviderKind;

pub const GITHUB_AUTH_URL: &str = "https://github.com/login/oauth/authorize";
pub const GITHUB_TOKEN_URL: &str = "https://github.com/login/oauth/access_token";
pub const GITHUB_API_URL: &str = "https://api.github.com";

pub const GITLAB_AUTH_URL: &str = "https://gitlab.com/oauth/authorize";
pub const GITLAB_TOKEN_URL: &str = "https://gitlab.com/oauth/token";
pub const GITLAB_API_URL: &str = "https://gitlab.com/api/v4";

/// OAuth client configuration with endpoints and settings.
///
/// One instance per provider, built once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Provider identifier.
    pub provider: ProviderKind,
    /// OAuth application client ID.
    pub client_id: String,
    /// OAuth application client secret.
    pub client_secret: SecretString,
    /// Callback URI registered with the provider.
    pub redirect_uri: String,
    /// Scopes requested during authorization.
    pub scopes: Vec<String>,
    /// Authorization endpoint the user is redirected to.
    pub auth_url: String,
    /// Token endpoint used for the code exchange.
    pub token_url: String,
    /// Base URL of the REST API.
    pub api_base_url: String,
}

impl ProviderConfig {
    /// Override the authorization endpoint.
    pub fn with_auth_url(mut self, auth_url: impl Into<String>) -> Self {
        self.auth_url = auth_url.into();
        self
    }

    /// Override the token endpoint.
    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }

    /// Override the REST API base URL.
    pub fn with_api_base_url(mut self, api_base_url: impl Into<String>) -> Self {
        self.api_base_url = api_base_url.into().trim_end_matches('/').to_string();
        self
    }
}

/// Get GitHub configuration.
///
/// Credentials are taken as given. Empty values are not rejected here; the
/// provider refuses them at code exchange time.
pub fn github_config(client_id: &str, client_secret: &str, redirect_uri: &str) -> ProviderConfig {
    ProviderConfig {
        provider: ProviderKind::Github,
        client_id: client_id.to_string(),
        client_secret: SecretString::from(client_secret.to_string()),
        redirect_uri: redirect_uri.to_string(),
        scopes: vec!["read:user".to_string(), "user:email".to_string()],
        auth_url: GITHUB_AUTH_URL.to_string(),
        token_url: GITHUB_TOKEN_URL.to_string(),
        api_base_url: GITHUB_API_URL.to_string(),
    }
}

/// Get GitLab configuration.
pub fn gitlab_config(client_id: &str, client_secret: &str, redirect_uri: &str) -> ProviderConfig {
    ProviderConfig {
        provider: ProviderKind::Gitlab,
        client_id: client_id.to_string(),
        client_secret: SecretString::from(client_secret.to_string()),
        redirect_uri: redirect_uri.to_string(),
        scopes: vec!["read_user".to_string(), "read_api".to_string()],
        auth_url: GITLAB_AUTH_URL.to_string(),
        token_url: GITLAB_TOKEN_URL.to_string(),
        api_base_url: GITLAB_API_URL.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_github_config() {
        let config = github_config("id", "secret", "https://example.com/github/auth/callback");
        assert_eq!(config.provider, ProviderKind::Github);
        assert_eq!(config.token_url, GITHUB_TOKEN_URL);
        assert_eq!(config.api_base_url, "https://api.github.com");
        assert_eq!(config.scopes, vec!["read:user", "user:email"]);
        assert_eq!(config.client_secret.expose_secret(), "secret");
    }

    #[test]
    fn test_gitlab_config() {
        let config = gitlab_config("id", "secret", "https://example.com/gitlab/auth/callback");
        assert_eq!(config.provider, ProviderKind::Gitlab);
        assert_eq!(config.auth_url, GITLAB_AUTH_URL);
        assert_eq!(config.scopes, vec!["read_user", "read_api"]);
    }

    #[test]
    fn test_empty_credentials_are_accepted() {
        let config = gitlab_config("", "", "");
        assert!(config.client_id.is_empty());
    }

    #[test]
    fn test_api_base_url_override_strips_trailing_slash() {
        let config = github_config("id", "secret", "cb").with_api_base_url("http://127.0.0.1:1234/");
        assert_eq!(config.api_base_url, "http://127.0.0.1:1234");
    }
}
