//! Per-provider session handles kept in the caller's cookie session.

use crate::error::{Error, WebErrorKind};
use domain::{ProviderKind, SessionHandle};
use log::*;
use tower_sessions::Session;

fn session_key(provider: ProviderKind) -> String {
    format!("{}_session", provider)
}

/// The handle this cookie session carries for `provider`, if any.
pub(crate) async fn handle(
    session: &Session,
    provider: ProviderKind,
) -> Result<Option<SessionHandle>, Error> {
    session
        .get::<SessionHandle>(&session_key(provider))
        .await
        .map_err(|e| {
            warn!("Failed to read {} session: {:?}", provider, e);
            Error::Web(WebErrorKind::Session)
        })
}

pub(crate) async fn store(
    session: &Session,
    provider: ProviderKind,
    handle: &SessionHandle,
) -> Result<(), Error> {
    session
        .insert(&session_key(provider), handle)
        .await
        .map_err(|e| {
            warn!("Failed to store {} session: {:?}", provider, e);
            Error::Web(WebErrorKind::Session)
        })
}

/// Remove and return the handle for `provider`.
pub(crate) async fn take(
    session: &Session,
    provider: ProviderKind,
) -> Result<Option<SessionHandle>, Error> {
    session
        .remove::<SessionHandle>(&session_key(provider))
        .await
        .map_err(|e| {
            warn!("Failed to clear {} session: {:?}", provider, e);
            Error::Web(WebErrorKind::Session)
        })
}
