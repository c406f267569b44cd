use crate::extractors::provider_path::ProviderPath;
use crate::extractors::provider_session;
use crate::response::{ReposResponse, UserResponse};
use crate::{AppState, Error};

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use tower_sessions::Session;

/// GET /{provider}/dashboard
///
/// Profile of the user behind the caller's session.
#[utoipa::path(
    get,
    path = "/{provider}/dashboard",
    params(
        ("provider" = String, Path, description = "`github` or `gitlab`"),
    ),
    responses(
        (status = 200, description = "The user's profile"),
        (status = 401, description = "No session for the provider"),
        (status = 502, description = "The provider API failed"),
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn user(
    State(app_state): State<AppState>,
    ProviderPath(provider): ProviderPath,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let handle = provider_session::handle(&session, provider).await?;
    let access_token = app_state
        .platform
        .resolve_session(provider, handle.as_ref())?;

    let user = app_state
        .platform
        .get_user_profile(provider, &access_token)
        .await?;

    Ok(Json(UserResponse { user }))
}

/// GET /{provider}/dashboard/repo
///
/// The user's first repositories with their reviewed flags.
#[utoipa::path(
    get,
    path = "/{provider}/dashboard/repo",
    params(
        ("provider" = String, Path, description = "`github` or `gitlab`"),
    ),
    responses(
        (status = 200, description = "Repositories in provider order, capped at the configured limit"),
        (status = 401, description = "No session for the provider"),
        (status = 502, description = "The provider API failed"),
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn repos(
    State(app_state): State<AppState>,
    ProviderPath(provider): ProviderPath,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let handle = provider_session::handle(&session, provider).await?;
    let access_token = app_state
        .platform
        .resolve_session(provider, handle.as_ref())?;

    let repos = app_state
        .platform
        .list_repos(provider, &access_token, app_state.config.repo_list_limit)
        .await?;

    Ok(Json(ReposResponse { repos }))
}
