//! OAuth provider trait and types.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::token::AccessToken;
use crate::error::Error;

/// Known git hosting providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    Github,
    Gitlab,
}

impl ProviderKind {
    /// Get the provider identifier string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Github => "github",
            ProviderKind::Gitlab => "gitlab",
        }
    }

    pub fn all() -> [ProviderKind; 2] {
        [ProviderKind::Github, ProviderKind::Gitlab]
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct ParseProviderKindError(pub String);

impl fmt::Display for ParseProviderKindError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unknown provider: {}", self.0)
    }
}

impl std::error::Error for ParseProviderKindError {}

impl FromStr for ProviderKind {
    type Err = ParseProviderKindError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "github" => Ok(ProviderKind::Github),
            "gitlab" => Ok(ProviderKind::Gitlab),
            _ => Err(ParseProviderKindError(value.to_string())),
        }
    }
}

/// Authorization request with the URL to redirect the user to.
#[derive(Debug, Clone)]
pub struct AuthorizationRequest {
    /// Authorization URL to redirect the user to.
    pub url: String,
    /// State parameter embedded in the URL.
    pub state: String,
}

/// User profile retrieved from the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Display name, falling back to the login name.
    pub display_name: String,
    /// Provider's numeric user id.
    pub id: u64,
    /// Avatar image URL.
    pub avatar_url: Option<String>,
}

/// Provider-specific repository identity.
///
/// GitHub repositories are addressed by full name (`owner/name`), GitLab
/// projects by numeric id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RepoIdentity {
    FullName(String),
    ProjectId(u64),
}

impl fmt::Display for RepoIdentity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RepoIdentity::FullName(full_name) => f.write_str(full_name),
            RepoIdentity::ProjectId(id) => write!(f, "{}", id),
        }
    }
}

/// Repository as listed by the provider, before any review state is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteRepository {
    pub identity: RepoIdentity,
    /// Provider's numeric repository id.
    pub id: u64,
    pub name: String,
}

/// Trait for git hosting providers.
///
/// Implementations handle platform-specific OAuth flows and REST calls:
/// - Authorization URL generation
/// - Authorization code exchange for an access token
/// - User profile retrieval
/// - Repository listing at the provider's page maximum
#[async_trait]
pub trait Provider: Send + Sync {
    /// Get the provider kind.
    fn provider(&self) -> ProviderKind;

    /// Generate the authorization URL for the given state value.
    fn authorization_url(&self, state: &str) -> AuthorizationRequest;

    /// Exchange an authorization code for an access token.
    ///
    /// # Arguments
    ///
    /// * `code` - Authorization code from the OAuth callback
    async fn exchange_code(&self, code: &str) -> Result<AccessToken, Error>;

    /// Get the authenticated user's profile.
    async fn get_user_info(&self, access_token: &AccessToken) -> Result<UserProfile, Error>;

    /// List the authenticated user's repositories in provider order.
    ///
    /// Returns a single page at the provider's maximum page size.
    async fn list_repositories(
        &self,
        access_token: &AccessToken,
    ) -> Result<Vec<RemoteRepository>, Error>;
}
