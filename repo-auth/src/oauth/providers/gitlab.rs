//! GitLab OAuth provider implementation.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::Error;
use crate::oauth::token::AccessToken;
use crate::oauth::{
    AuthorizationRequest, OAuthClient, ProviderKind, RemoteRepository, RepoIdentity, UserProfile,
};
use crate::providers::ProviderConfig;

const ACCEPT_JSON: &str = "application/json";

/// Projects the user is a member of; GitLab caps `per_page` at 100.
const PROJECTS_PATH: &str = "/projects?membership=true&per_page=100";

#[derive(Debug, Deserialize)]
struct GitlabUser {
    id: u64,
    username: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    avatar_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GitlabProject {
    id: u64,
    name: String,
}

impl From<GitlabUser> for UserProfile {
    fn from(user: GitlabUser) -> Self {
        UserProfile {
            display_name: user
                .name
                .filter(|name| !name.is_empty())
                .unwrap_or(user.username),
            id: user.id,
            avatar_url: user.avatar_url,
        }
    }
}

impl From<GitlabProject> for RemoteRepository {
    fn from(project: GitlabProject) -> Self {
        RemoteRepository {
            identity: RepoIdentity::ProjectId(project.id),
            id: project.id,
            name: project.name,
        }
    }
}

/// GitLab OAuth provider.
///
/// Projects are identified by their numeric id.
pub struct Provider {
    client: OAuthClient,
}

impl Provider {
    /// Create a new GitLab provider.
    pub fn new(config: ProviderConfig, http_client: reqwest::Client) -> Self {
        Self {
            client: OAuthClient::new(config, http_client),
        }
    }
}

#[async_trait]
impl crate::oauth::Provider for Provider {
    fn provider(&self) -> ProviderKind {
        ProviderKind::Gitlab
    }

    fn authorization_url(&self, state: &str) -> AuthorizationRequest {
        self.client.authorization_url(state)
    }

    async fn exchange_code(&self, code: &str) -> Result<AccessToken, Error> {
        self.client.exchange_code(code).await
    }

    async fn get_user_info(&self, access_token: &AccessToken) -> Result<UserProfile, Error> {
        let user: GitlabUser = self
            .client
            .get_json("/user", access_token, ACCEPT_JSON)
            .await?;
        Ok(user.into())
    }

    async fn list_repositories(
        &self,
        access_token: &AccessToken,
    ) -> Result<Vec<RemoteRepository>, Error> {
        let projects: Vec<GitlabProject> = self
            .client
            .get_json(PROJECTS_PATH, access_token, ACCEPT_JSON)
            .await?;
        Ok(projects.into_iter().map(RemoteRepository::from).collect())
    }
}
