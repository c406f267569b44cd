use crate::error::WebErrorKind;
use crate::extractors::provider_path::ProviderPath;
use crate::extractors::provider_session;
use crate::params::review::ToggleParams;
use crate::response::ToggleResponse;
use crate::{AppState, Error};

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use domain::RepoIdentity;
use log::*;
use tower_sessions::Session;

/// POST /{provider}/review
///
/// Flips the reviewed flag of one repository and returns the new value.
#[utoipa::path(
    post,
    path = "/{provider}/review",
    params(
        ("provider" = String, Path, description = "`github` or `gitlab`"),
    ),
    request_body = ToggleParams,
    responses(
        (status = 200, description = "The repository's new reviewed flag"),
        (status = 400, description = "Missing or malformed repository identity"),
        (status = 401, description = "No session for the provider"),
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn toggle(
    State(app_state): State<AppState>,
    ProviderPath(provider): ProviderPath,
    session: Session,
    payload: Result<Json<ToggleParams>, JsonRejection>,
) -> Result<impl IntoResponse, Error> {
    let handle = provider_session::handle(&session, provider).await?;
    app_state
        .platform
        .resolve_session(provider, handle.as_ref())?;

    let Json(params) = payload.map_err(|rejection| {
        debug!("Unreadable toggle request: {}", rejection);
        Error::Web(WebErrorKind::Input)
    })?;
    let identity = params.identity(provider)?;

    let is_reviewed = app_state.platform.toggle_review(provider, &identity)?;

    let repo_id = match identity {
        RepoIdentity::ProjectId(id) => Some(id),
        RepoIdentity::FullName(_) => None,
    };
    Ok(Json(ToggleResponse {
        message: "Repository review status toggled",
        is_reviewed,
        repo_id,
    }))
}
