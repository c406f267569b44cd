//! # repo-auth
//!
//! Everything needed to talk to a git hosting provider on behalf of a user:
//! - Provider configuration (client credentials, scopes, endpoints) for GitHub and GitLab
//! - OAuth 2.0 authorization URL construction and authorization code exchange
//! - Bearer-authenticated REST calls for the user profile and repository listing
//! - HTTP client building with a bounded timeout
//!
//! ## Architecture
//!
//! `domain` composes the providers from this crate with the in-memory review
//! store and session carrier. Nothing in here holds mutable state.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use repo_auth::{
//!     http::HttpClientBuilder,
//!     oauth::{providers, Provider},
//!     providers::github_config,
//! };
//!
//! let http_client = HttpClientBuilder::new().build()?;
//! let github = providers::github::Provider::new(github_config(id, secret, redirect), http_client);
//! let url = github.authorization_url(repo_auth::oauth::FIXED_STATE).url;
//! ```

pub mod error;
pub mod http;
pub mod oauth;
pub mod providers;

// Re-export commonly used types
pub use error::{Error, ErrorKind};
