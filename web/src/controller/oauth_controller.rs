//! Controller for the provider login flow.
//!
//! These endpoints are reached through browser redirects, so failures come
//! back as JSON bodies rather than redirects to the frontend.

use crate::extractors::provider_path::ProviderPath;
use crate::extractors::provider_session;
use crate::params::oauth::CallbackParams;
use crate::response::MessageResponse;
use crate::{AppState, Error};

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Redirect};
use axum::Json;
use log::*;
use tower_sessions::Session;

/// GET /{provider}
///
/// Redirects the browser to the provider's authorization page.
#[utoipa::path(
    get,
    path = "/{provider}",
    params(
        ("provider" = String, Path, description = "`github` or `gitlab`"),
    ),
    responses(
        (status = 307, description = "Redirect to the provider's authorization page"),
        (status = 404, description = "Unknown provider"),
    )
)]
pub async fn authorize(
    State(app_state): State<AppState>,
    ProviderPath(provider): ProviderPath,
) -> impl IntoResponse {
    debug!("Starting {} login", provider);
    Redirect::temporary(&app_state.platform.begin_auth(provider))
}

/// GET /{provider}/auth/callback
///
/// Exchanges the authorization code, starts a session for the provider and
/// sends the browser on to the frontend dashboard.
#[utoipa::path(
    get,
    path = "/{provider}/auth/callback",
    params(
        ("provider" = String, Path, description = "`github` or `gitlab`"),
        CallbackParams,
    ),
    responses(
        (status = 307, description = "Redirect to the frontend dashboard on success"),
        (status = 400, description = "No authorization code"),
        (status = 401, description = "The provider refused the code"),
        (status = 404, description = "Unknown provider"),
    )
)]
pub async fn callback(
    State(app_state): State<AppState>,
    ProviderPath(provider): ProviderPath,
    session: Session,
    Query(params): Query<CallbackParams>,
) -> Result<impl IntoResponse, Error> {
    let code = params.code.unwrap_or_default();
    let access_token = app_state.platform.complete_auth(provider, &code).await?;

    // A second login through the same browser replaces the earlier session.
    if let Some(previous) = provider_session::take(&session, provider).await? {
        app_state.platform.logout(provider, &previous);
    }

    let handle = app_state.platform.start_session(provider, access_token);
    provider_session::store(&session, provider, &handle).await?;

    info!("{} login complete", provider);
    Ok(Redirect::temporary(&format!(
        "{}/dashboard",
        app_state.config.frontend_base_url()
    )))
}

/// GET /{provider}/logout
///
/// Drops the caller's session for the provider. Succeeds without a session.
#[utoipa::path(
    get,
    path = "/{provider}/logout",
    params(
        ("provider" = String, Path, description = "`github` or `gitlab`"),
    ),
    responses(
        (status = 200, description = "Logged out"),
        (status = 404, description = "Unknown provider"),
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn logout(
    State(app_state): State<AppState>,
    ProviderPath(provider): ProviderPath,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    if let Some(handle) = provider_session::take(&session, provider).await? {
        app_state.platform.logout(provider, &handle);
    }

    Ok(Json(MessageResponse {
        message: "Logout successful",
    }))
}
