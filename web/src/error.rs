use std::error::Error as StdError;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::*;
use serde_json::json;

use domain::error::{CallerErrorKind, DomainErrorKind, Error as DomainError, FetchErrorKind};

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    Domain(DomainError),
    Web(WebErrorKind),
}

#[derive(Debug, PartialEq)]
pub enum WebErrorKind {
    /// The `{provider}` path segment names no supported provider.
    UnknownProvider,
    /// The request body could not be read.
    Input,
    /// The session store failed to load or save the caller's session.
    Session,
}

impl StdError for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> core::result::Result<(), std::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

impl Error {
    fn status_and_message(&self) -> (StatusCode, &'static str) {
        match self {
            Error::Web(WebErrorKind::UnknownProvider) => (StatusCode::NOT_FOUND, "Unknown provider"),
            Error::Web(WebErrorKind::Input) => (StatusCode::BAD_REQUEST, "Invalid request"),
            Error::Web(WebErrorKind::Session) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            Error::Domain(domain_error) => match &domain_error.error_kind {
                DomainErrorKind::Caller(caller_error_kind) => match caller_error_kind {
                    CallerErrorKind::MissingCode => (StatusCode::BAD_REQUEST, "Code not found"),
                    CallerErrorKind::MalformedToggle => {
                        (StatusCode::BAD_REQUEST, "Invalid request")
                    }
                    CallerErrorKind::MissingSession => (StatusCode::UNAUTHORIZED, "Unauthorized"),
                },
                DomainErrorKind::Auth => (StatusCode::UNAUTHORIZED, "Failed to exchange tokens"),
                DomainErrorKind::Fetch(fetch_error_kind) => match fetch_error_kind {
                    // The provider rejected the token we hold for the caller.
                    FetchErrorKind::Status(401) => (StatusCode::UNAUTHORIZED, "Unauthorized"),
                    FetchErrorKind::Status(_) | FetchErrorKind::Network | FetchErrorKind::Decode => {
                        (StatusCode::BAD_GATEWAY, "Failed to fetch data from provider")
                    }
                },
                DomainErrorKind::Internal(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
                }
            },
        }
    }
}

// List of possible StatusCode variants https://docs.rs/http/latest/http/status/struct.StatusCode.html
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        if status.is_server_error() {
            error!("Request failed with {}: {}", status, self);
        } else {
            debug!("Request rejected with {}: {}", status, self);
        }
        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<DomainError> for Error {
    fn from(err: DomainError) -> Self {
        Error::Domain(err)
    }
}
