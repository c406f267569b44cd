//! Error types for the `repo-auth` crate.
//!
//! Follows the same pattern as domain::error with a root Error struct and error kind enums.

use std::error::Error as StdError;
use std::fmt;

/// Top-level error type for repo-auth crate.
/// Holds error kind and optional source for error chaining.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: ErrorKind,
}

/// Major categories of errors in repo-auth.
#[derive(Debug, PartialEq)]
pub enum ErrorKind {
    OAuth(OAuthErrorKind),
    Api(ApiErrorKind),
    Http(HttpErrorKind),
}

/// Errors from the OAuth authorization code flow.
#[derive(Debug, PartialEq)]
pub enum OAuthErrorKind {
    /// The token endpoint refused the code (invalid, expired, bad credentials).
    TokenExchangeFailed,
    /// The token endpoint answered with something that is not a token.
    InvalidResponse,
    Network,
}

/// Errors from the provider REST API.
#[derive(Debug, PartialEq)]
pub enum ApiErrorKind {
    /// Non-2xx status from the API, carrying the status code.
    Status(u16),
    /// The response body could not be decoded.
    Decode,
    Network,
}

/// Errors from setting up the outbound HTTP client.
#[derive(Debug, PartialEq)]
pub enum HttpErrorKind {
    /// The client could not be constructed (TLS backend, invalid header values).
    BuilderFailed,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.error_kind {
            ErrorKind::OAuth(kind) => write!(f, "OAuth error: {:?}", kind),
            ErrorKind::Api(kind) => write!(f, "API error: {:?}", kind),
            ErrorKind::Http(kind) => write!(f, "HTTP error: {:?}", kind),
        }?;
        if let Some(source) = &self.source {
            write!(f, " ({})", source)?;
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

/// Helper function to create HTTP client errors.
pub fn http_error(kind: HttpErrorKind, source: reqwest::Error) -> Error {
    Error {
        source: Some(Box::new(source)),
        error_kind: ErrorKind::Http(kind),
    }
}

/// Helper function to create OAuth errors.
pub fn oauth_error(kind: OAuthErrorKind, message: &str) -> Error {
    Error {
        source: Some(message.to_string().into()),
        error_kind: ErrorKind::OAuth(kind),
    }
}

/// Helper function to create provider API errors.
pub fn api_error(kind: ApiErrorKind, message: &str) -> Error {
    Error {
        source: Some(message.to_string().into()),
        error_kind: ErrorKind::Api(kind),
    }
}
