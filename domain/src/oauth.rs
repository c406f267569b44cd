//! Authorization code flow and profile lookup for a single provider.

use crate::error::{caller_error, CallerErrorKind, Error};
use crate::{AccessToken, Provider, UserProfile};
use log::*;
use repo_auth::oauth::FIXED_STATE;

/// Build the URL the user is redirected to in order to authorize this application.
pub fn begin_auth(provider: &dyn Provider) -> String {
    let auth_request = provider.authorization_url(FIXED_STATE);
    info!("Redirecting user to {} OAuth", provider.provider());
    auth_request.url
}

/// Exchange a one-time authorization code for an access token.
///
/// An empty code is rejected before any network call is made.
pub async fn complete_auth(provider: &dyn Provider, code: &str) -> Result<AccessToken, Error> {
    let kind = provider.provider();
    if code.trim().is_empty() {
        warn!("{} OAuth callback arrived without a code", kind);
        return Err(caller_error(CallerErrorKind::MissingCode, "Code not found"));
    }

    let access_token = provider
        .exchange_code(code)
        .await
        .inspect_err(|e| warn!("Failed to exchange {} OAuth code: {:?}", kind, e))?;

    info!("Successfully completed {} OAuth", kind);
    Ok(access_token)
}

/// Fetch the authenticated user's profile. Never cached.
pub async fn get_user_profile(
    provider: &dyn Provider,
    access_token: &AccessToken,
) -> Result<UserProfile, Error> {
    let profile = provider
        .get_user_info(access_token)
        .await
        .inspect_err(|e| warn!("Failed to get {} user info: {:?}", provider.provider(), e))?;
    Ok(profile)
}
