//! JSON bodies returned by the controllers.

use domain::{RepoSummary, UserProfile};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub(crate) struct UserResponse {
    pub user: UserProfile,
}

#[derive(Debug, Serialize)]
pub(crate) struct ReposResponse {
    pub repos: Vec<RepoSummary>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ToggleResponse {
    pub message: &'static str,
    pub is_reviewed: bool,
    /// Only set for GitLab projects.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_id: Option<u64>,
}

#[derive(Debug, Serialize)]
pub(crate) struct MessageResponse {
    pub message: &'static str,
}
