use crate::error::Error;
use crate::review::ReviewStore;
use crate::{AccessToken, Provider, RemoteRepository, RepoIdentity};
use log::*;
use serde::{Deserialize, Serialize};

/// Repository as returned to callers: provider data plus the reviewed flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoSummary {
    /// Full name on GitHub, project id on GitLab.
    pub identity: RepoIdentity,
    pub id: u64,
    pub name: String,
    pub reviewed: bool,
}

impl RepoSummary {
    pub fn new(repo: RemoteRepository, reviewed: bool) -> Self {
        Self {
            identity: repo.identity,
            id: repo.id,
            name: repo.name,
            reviewed,
        }
    }
}

/// Fetch the user's repositories and attach their reviewed flags.
///
/// The provider's list is cut to the first `limit` entries, in provider order,
/// before the flags are applied.
pub async fn list(
    provider: &dyn Provider,
    reviews: &ReviewStore,
    access_token: &AccessToken,
    limit: usize,
) -> Result<Vec<RepoSummary>, Error> {
    let kind = provider.provider();

    let mut repos = provider
        .list_repositories(access_token)
        .await
        .inspect_err(|e| warn!("Failed to fetch {} repositories: {:?}", kind, e))?;

    debug!(
        "{} returned {} repositories, keeping at most {}",
        kind,
        repos.len(),
        limit
    );
    repos.truncate(limit);

    Ok(reviews.overlay(kind, repos))
}
