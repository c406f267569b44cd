//! The composition root handed to the web layer.

use std::sync::Arc;
use std::time::Duration;

use log::*;
use service::config::Config;

use crate::error::{caller_error, CallerErrorKind, Error};
use crate::repository::{self, RepoSummary};
use crate::review::ReviewStore;
use crate::session::{SessionCarrier, SessionHandle};
use crate::{gateway, oauth};
use crate::{AccessToken, Provider, ProviderKind, RepoIdentity, UserProfile};

/// Both providers plus the process-wide review store and session carrier.
///
/// Cheap to clone; every clone shares the same store and carrier.
#[derive(Clone)]
pub struct Platform {
    github: Arc<dyn Provider>,
    gitlab: Arc<dyn Provider>,
    reviews: Arc<ReviewStore>,
    sessions: Arc<SessionCarrier>,
}

impl Platform {
    pub fn new(
        github: Arc<dyn Provider>,
        gitlab: Arc<dyn Provider>,
        reviews: Arc<ReviewStore>,
        sessions: Arc<SessionCarrier>,
    ) -> Self {
        Self {
            github,
            gitlab,
            reviews,
            sessions,
        }
    }

    /// Build providers from config with an empty review store and no sessions.
    ///
    /// Session handles expire after `SESSION_EXPIRY_SECONDS` without use.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let http_client = gateway::http_client(config)?;

        if config.github_client_id().is_empty() {
            warn!("GITHUB_CLIENT_ID is not set, GitHub logins will fail");
        }
        if config.gitlab_client_id().is_empty() {
            warn!("GITLAB_CLIENT_ID is not set, GitLab logins will fail");
        }

        let sessions = SessionCarrier::with_ttl(Duration::from_secs(config.session_expiry_seconds));
        info!("Session handles expire after {:?} without use", sessions.ttl());

        Ok(Self::new(
            gateway::github_provider(config, http_client.clone()),
            gateway::gitlab_provider(config, http_client),
            Arc::new(ReviewStore::new()),
            Arc::new(sessions),
        ))
    }

    fn provider(&self, kind: ProviderKind) -> &dyn Provider {
        match kind {
            ProviderKind::Github => self.github.as_ref(),
            ProviderKind::Gitlab => self.gitlab.as_ref(),
        }
    }

    pub fn reviews(&self) -> &ReviewStore {
        &self.reviews
    }

    pub fn begin_auth(&self, kind: ProviderKind) -> String {
        oauth::begin_auth(self.provider(kind))
    }

    pub async fn complete_auth(&self, kind: ProviderKind, code: &str) -> Result<AccessToken, Error> {
        oauth::complete_auth(self.provider(kind), code).await
    }

    /// Hand the token over to the session carrier and return the caller's handle.
    pub fn start_session(&self, kind: ProviderKind, access_token: AccessToken) -> SessionHandle {
        self.sessions.issue(kind, access_token)
    }

    /// Resolve a caller's handle back to its token.
    pub fn resolve_session(
        &self,
        kind: ProviderKind,
        handle: Option<&SessionHandle>,
    ) -> Result<AccessToken, Error> {
        handle
            .and_then(|handle| self.sessions.resolve(kind, handle))
            .ok_or_else(|| {
                caller_error(
                    CallerErrorKind::MissingSession,
                    &format!("No {} session, log in first", kind),
                )
            })
    }

    pub async fn get_user_profile(
        &self,
        kind: ProviderKind,
        access_token: &AccessToken,
    ) -> Result<UserProfile, Error> {
        oauth::get_user_profile(self.provider(kind), access_token).await
    }

    pub async fn list_repos(
        &self,
        kind: ProviderKind,
        access_token: &AccessToken,
        limit: usize,
    ) -> Result<Vec<RepoSummary>, Error> {
        repository::list(self.provider(kind), &self.reviews, access_token, limit).await
    }

    pub fn toggle_review(&self, kind: ProviderKind, identity: &RepoIdentity) -> Result<bool, Error> {
        let reviewed = self.reviews.toggle(kind, identity)?;
        info!("Repository {} on {} reviewed: {}", identity, kind, reviewed);
        Ok(reviewed)
    }

    /// Stop honoring the handle. The token is not revoked with the provider.
    pub fn logout(&self, kind: ProviderKind, handle: &SessionHandle) {
        if self.sessions.revoke(kind, handle) {
            info!("Logged out of {}", kind);
        } else {
            debug!("Logout for {} without a live session", kind);
        }
    }
}
