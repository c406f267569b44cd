use domain::error::{caller_error, CallerErrorKind, Error as DomainError};
use domain::{ProviderKind, RepoIdentity};
use serde::Deserialize;
use utoipa::ToSchema;

/// Body of a review toggle.
///
/// GitHub repositories are named by `repoFullName` (`owner/name`), GitLab
/// projects by their numeric `id`. Other fields the frontend sends, such as
/// the project `name`, are ignored.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ToggleParams {
    pub repo_full_name: Option<String>,
    pub id: Option<u64>,
}

impl ToggleParams {
    pub fn identity(&self, provider: ProviderKind) -> Result<RepoIdentity, DomainError> {
        let identity = match provider {
            ProviderKind::Github => self.repo_full_name.clone().map(RepoIdentity::FullName),
            ProviderKind::Gitlab => self.id.map(RepoIdentity::ProjectId),
        };
        identity.ok_or_else(|| {
            caller_error(
                CallerErrorKind::MalformedToggle,
                &format!("No {} repository identity in toggle request", provider),
            )
        })
    }
}
