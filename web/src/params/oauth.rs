use serde::Deserialize;
use utoipa::IntoParams;

/// Query parameters the provider appends to the OAuth callback.
///
/// The echoed `state` is ignored.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub(crate) struct CallbackParams {
    /// Authorization code to exchange.
    pub code: Option<String>,
}
