//! OAuth 2.0 authorization code flow and provider REST access.

mod client;
mod provider;

pub mod providers;
pub mod token;

pub use client::OAuthClient;
pub use provider::{
    AuthorizationRequest, ParseProviderKindError, Provider, ProviderKind, RemoteRepository,
    RepoIdentity, UserProfile,
};

/// State value sent with every authorization request.
///
/// The callback does not check it.
pub const FIXED_STATE: &str = "state";
