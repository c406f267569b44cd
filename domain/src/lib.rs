//! This module re-exports the provider-facing types from the `repo-auth` crate.
//!
//! The purpose of this re-export is to ensure that consumers of the `domain` crate do not need to
//! directly depend on the `repo-auth` crate. `web` works with providers, tokens and repository
//! identities only through `domain`.
pub use repo_auth::oauth::{
    token::AccessToken, Provider, ProviderKind, RemoteRepository, RepoIdentity, UserProfile,
};

pub mod error;
pub mod gateway;
pub mod oauth;
pub mod platform;
pub mod repository;
pub mod review;
pub mod session;

pub use platform::Platform;
pub use repository::RepoSummary;
pub use session::SessionHandle;
