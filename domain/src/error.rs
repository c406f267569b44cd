//! Error types for the `domain` layer.
use repo_auth::error::{
    ApiErrorKind, Error as RepoAuthError, ErrorKind as RepoAuthErrorKind, HttpErrorKind,
};
use std::error::Error as StdError;
use std::fmt;

/// Top-level domain error type.
/// Errors in the Domain layer are modeled as a tree structure
/// with `domain::error::Error` as the root type holding a tree of `error_kind`
/// enums that represent the kinds of errors that can occur in the domain layer or
/// in lower layers. The `source` field is used to hold the original error that caused
/// the domain error. `web` depends on `domain` but never on `repo-auth` errors
/// directly; it uses the `error_kind` tree to pick HTTP status codes.
///
/// Every error is scoped to the single request that triggered it.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: DomainErrorKind,
}

/// Enum representing the major categories of errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum DomainErrorKind {
    /// The caller sent something unusable. Never retried.
    Caller(CallerErrorKind),
    /// The provider refused the authorization code exchange.
    Auth,
    /// Fetching data from the provider API failed.
    Fetch(FetchErrorKind),
    Internal(InternalErrorKind),
}

#[derive(Debug, PartialEq)]
pub enum CallerErrorKind {
    /// No authorization code on the OAuth callback.
    MissingCode,
    /// The repository identity does not fit the provider.
    MalformedToggle,
    /// No live session for the provider.
    MissingSession,
}

#[derive(Debug, PartialEq)]
pub enum FetchErrorKind {
    Network,
    /// Non-2xx response from the provider API.
    Status(u16),
    /// Response body did not decode.
    Decode,
}

#[derive(Debug, PartialEq)]
pub enum InternalErrorKind {
    /// The outbound HTTP client could not be built from configuration.
    Config,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Domain Error: {self:?}")
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

/// Helper function to create caller errors.
pub fn caller_error(kind: CallerErrorKind, message: &str) -> Error {
    Error {
        source: Some(message.to_string().into()),
        error_kind: DomainErrorKind::Caller(kind),
    }
}

// This is where we translate errors from the `repo-auth` layer to the `domain` layer.
impl From<RepoAuthError> for Error {
    fn from(err: RepoAuthError) -> Self {
        let error_kind = match &err.error_kind {
            RepoAuthErrorKind::OAuth(_) => DomainErrorKind::Auth,
            RepoAuthErrorKind::Api(ApiErrorKind::Status(status)) => {
                DomainErrorKind::Fetch(FetchErrorKind::Status(*status))
            }
            RepoAuthErrorKind::Api(ApiErrorKind::Decode) => {
                DomainErrorKind::Fetch(FetchErrorKind::Decode)
            }
            RepoAuthErrorKind::Api(ApiErrorKind::Network) => {
                DomainErrorKind::Fetch(FetchErrorKind::Network)
            }
            RepoAuthErrorKind::Http(HttpErrorKind::BuilderFailed) => {
                DomainErrorKind::Internal(InternalErrorKind::Config)
            }
        };
        Error {
            source: Some(Box::new(err)),
            error_kind,
        }
    }
}
