//! GitHub OAuth provider implementation.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::Error;
use crate::oauth::token::AccessToken;
use crate::oauth::{
    AuthorizationRequest, OAuthClient, ProviderKind, RemoteRepository, RepoIdentity, UserProfile,
};
use crate::providers::ProviderConfig;

const ACCEPT_GITHUB_JSON: &str = "application/vnd.github+json";

/// GitHub caps `per_page` at 100.
const REPOS_PATH: &str = "/user/repos?per_page=100";

#[derive(Debug, Deserialize)]
struct GithubUser {
    login: String,
    id: u64,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    avatar_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GithubRepo {
    id: u64,
    full_name: String,
}

impl From<GithubUser> for UserProfile {
    fn from(user: GithubUser) -> Self {
        UserProfile {
            display_name: user
                .name
                .filter(|name| !name.is_empty())
                .unwrap_or(user.login),
            id: user.id,
            avatar_url: user.avatar_url,
        }
    }
}

impl From<GithubRepo> for RemoteRepository {
    fn from(repo: GithubRepo) -> Self {
        RemoteRepository {
            identity: RepoIdentity::FullName(repo.full_name.clone()),
            id: repo.id,
            name: repo.full_name,
        }
    }
}

/// GitHub OAuth provider.
///
/// Repositories are identified by their full name (`owner/name`).
pub struct Provider {
    client: OAuthClient,
}

impl Provider {
    /// Create a new GitHub provider.
    ///
    /// # Arguments
    ///
    /// * `config` - GitHub client settings, see [`crate::providers::github_config`]
    /// * `http_client` - Shared outbound HTTP client
    pub fn new(config: ProviderConfig, http_client: reqwest::Client) -> Self {
        Self {
            client: OAuthClient::new(config, http_client),
        }
    }
}

#[async_trait]
impl crate::oauth::Provider for Provider {
    fn provider(&self) -> ProviderKind {
        ProviderKind::Github
    }

    fn authorization_url(&self, state: &str) -> AuthorizationRequest {
        self.client.authorization_url(state)
    }

    async fn exchange_code(&self, code: &str) -> Result<AccessToken, Error> {
        self.client.exchange_code(code).await
    }

    async fn get_user_info(&self, access_token: &AccessToken) -> Result<UserProfile, Error> {
        let user: GithubUser = self
            .client
            .get_json("/user", access_token, ACCEPT_GITHUB_JSON)
            .await?;
        Ok(user.into())
    }

    async fn list_repositories(
        &self,
        access_token: &AccessToken,
    ) -> Result<Vec<RemoteRepository>, Error> {
        let repos: Vec<GithubRepo> = self
            .client
            .get_json(REPOS_PATH, access_token, ACCEPT_GITHUB_JSON)
            .await?;
        Ok(repos.into_iter().map(RemoteRepository::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ApiErrorKind, ErrorKind};
    use crate::oauth::Provider as _;
    use crate::providers::github_config;
    use mockito::{Matcher, Server};

    fn provider_for(server_url: &str) -> Provider {
        Provider::new(
            github_config("id", "secret", "cb").with_api_base_url(server_url),
            reqwest::Client::new(),
        )
    }

    #[tokio::test]
    async fn test_get_user_info() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/user")
            .match_header("authorization", "Bearer gho_token")
            .match_header("accept", ACCEPT_GITHUB_JSON)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"login":"octocat","id":583231,"name":"The Octocat","avatar_url":"https://avatars.githubusercontent.com/u/583231"}"#,
            )
            .create_async()
            .await;

        let profile = provider_for(&server.url())
            .get_user_info(&AccessToken::new("gho_token"))
            .await
            .unwrap();

        assert_eq!(profile.display_name, "The Octocat");
        assert_eq!(profile.id, 583231);
        assert_eq!(
            profile.avatar_url.as_deref(),
            Some("https://avatars.githubusercontent.com/u/583231")
        );
    }

    #[tokio::test]
    async fn test_get_user_info_falls_back_to_login() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/user")
            .with_status(200)
            .with_body(r#"{"login":"octocat","id":1,"name":null,"avatar_url":null}"#)
            .create_async()
            .await;

        let profile = provider_for(&server.url())
            .get_user_info(&AccessToken::new("gho_token"))
            .await
            .unwrap();

        assert_eq!(profile.display_name, "octocat");
        assert_eq!(profile.avatar_url, None);
    }

    #[tokio::test]
    async fn test_list_repositories_preserves_provider_order() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/user/repos")
            .match_query(Matcher::UrlEncoded("per_page".into(), "100".into()))
            .match_header("authorization", "Bearer gho_token")
            .with_status(200)
            .with_body(
                r#"[{"id":42,"full_name":"acme/widgets","private":false},{"id":7,"full_name":"acme/gadgets"}]"#,
            )
            .create_async()
            .await;

        let repos = provider_for(&server.url())
            .list_repositories(&AccessToken::new("gho_token"))
            .await
            .unwrap();

        assert_eq!(repos.len(), 2);
        assert_eq!(
            repos[0].identity,
            RepoIdentity::FullName("acme/widgets".to_string())
        );
        assert_eq!(repos[0].id, 42);
        assert_eq!(repos[1].name, "acme/gadgets");
    }

    #[tokio::test]
    async fn test_list_repositories_decode_failure() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/user/repos")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"message":"not a list"}"#)
            .create_async()
            .await;

        let err = provider_for(&server.url())
            .list_repositories(&AccessToken::new("gho_token"))
            .await
            .unwrap_err();

        assert_eq!(err.error_kind, ErrorKind::Api(ApiErrorKind::Decode));
    }
}
