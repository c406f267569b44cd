//! Access token type.

use secrecy::{ExposeSecret, SecretString};

/// Provider-issued access token.
///
/// No expiry is tracked locally; the provider decides when it stops working.
/// The value is redacted from `Debug` output.
#[derive(Debug, Clone)]
pub struct AccessToken(SecretString);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::from(token.into()))
    }

    /// The raw token value, for building an `Authorization` header.
    pub fn secret(&self) -> &str {
        self.0.expose_secret()
    }
}

impl From<String> for AccessToken {
    fn from(token: String) -> Self {
        Self::new(token)
    }
}

impl PartialEq for AccessToken {
    fn eq(&self, other: &Self) -> bool {
        self.secret() == other.secret()
    }
}

impl Eq for AccessToken {}
