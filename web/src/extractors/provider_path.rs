use crate::error::{Error, WebErrorKind};
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use domain::ProviderKind;
use log::*;

/// The provider named by the leading `{provider}` path segment.
///
/// Any segment other than `github` or `gitlab` is rejected with 404.
pub(crate) struct ProviderPath(pub ProviderKind);

impl<S> FromRequestParts<S> for ProviderPath
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(segment) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| Error::Web(WebErrorKind::UnknownProvider))?;

        segment.parse::<ProviderKind>().map(ProviderPath).map_err(|_| {
            debug!("Rejecting request for unknown provider {:?}", segment);
            Error::Web(WebErrorKind::UnknownProvider)
        })
    }
}
