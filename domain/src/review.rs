//! In-memory review state shared by every request in the process.
//!
//! The store maps a provider-qualified [`ReviewKey`] to a reviewed flag and
//! keeps the most recently loaded repository list per provider. Entries are
//! never evicted and nothing is persisted: a restart starts from an empty store.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use log::*;

use crate::error::{caller_error, CallerErrorKind, Error};
use crate::repository::RepoSummary;
use crate::{ProviderKind, RemoteRepository, RepoIdentity};

/// Provider-qualified key into the review store.
///
/// GitLab projects map to `gitlab:<id>`, GitHub repositories to their bare
/// full name. A GitHub full name always contains a `/`, which the GitLab form
/// never does, so keys from the two providers cannot collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReviewKey(String);

impl ReviewKey {
    /// Build the key for a repository, rejecting identities that do not fit the provider.
    pub fn new(provider: ProviderKind, identity: &RepoIdentity) -> Result<Self, Error> {
        match (provider, identity) {
            (ProviderKind::Github, RepoIdentity::FullName(full_name)) => {
                match full_name.split_once('/') {
                    Some((owner, name))
                        if !owner.trim().is_empty()
                            && !name.trim().is_empty()
                            && !name.contains('/') =>
                    {
                        Ok(ReviewKey(full_name.clone()))
                    }
                    _ => Err(caller_error(
                        CallerErrorKind::MalformedToggle,
                        "GitHub repositories are identified as owner/name",
                    )),
                }
            }
            (ProviderKind::Gitlab, RepoIdentity::ProjectId(id)) => {
                Ok(ReviewKey(format!("gitlab:{}", id)))
            }
            (ProviderKind::Github, RepoIdentity::ProjectId(_)) => Err(caller_error(
                CallerErrorKind::MalformedToggle,
                "GitHub repositories are identified by full name",
            )),
            (ProviderKind::Gitlab, RepoIdentity::FullName(_)) => Err(caller_error(
                CallerErrorKind::MalformedToggle,
                "GitLab projects are identified by numeric id",
            )),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReviewKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Default)]
struct Inner {
    reviewed: HashMap<ReviewKey, bool>,
    loaded: HashMap<ProviderKind, Vec<RepoSummary>>,
}

/// Process-wide review state.
///
/// One mutex guards both the flags and the loaded lists, so a toggle and the
/// matching loaded-list update are observed together.
#[derive(Default)]
pub struct ReviewStore {
    inner: Mutex<Inner>,
}

impl ReviewStore {
    pub fn new() -> Self {
        Self::default()
    }

    // A panic while holding the lock cannot leave a flag half-written, so a
    // poisoned lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Flip the reviewed flag for a repository and return the new value.
    ///
    /// An absent entry counts as not reviewed, so the first toggle sets it.
    /// If the provider's loaded list holds this repository its flag is
    /// updated as well.
    pub fn toggle(&self, provider: ProviderKind, identity: &RepoIdentity) -> Result<bool, Error> {
        let key = ReviewKey::new(provider, identity)?;
        let mut inner = self.lock();

        let reviewed = inner.reviewed.entry(key.clone()).or_insert(false);
        *reviewed = !*reviewed;
        let new_state = *reviewed;

        if let Some(repo) = inner
            .loaded
            .get_mut(&provider)
            .and_then(|repos| repos.iter_mut().find(|repo| &repo.identity == identity))
        {
            repo.reviewed = new_state;
        }

        debug!("Toggled review state of {} to {}", key, new_state);
        Ok(new_state)
    }

    /// Current reviewed flag, `false` for repositories never toggled.
    pub fn is_reviewed(&self, provider: ProviderKind, identity: &RepoIdentity) -> bool {
        match ReviewKey::new(provider, identity) {
            Ok(key) => self.lock().reviewed.get(&key).copied().unwrap_or(false),
            Err(_) => false,
        }
    }

    /// Attach the current reviewed flags to a freshly fetched list.
    ///
    /// The resulting list replaces the provider's loaded list.
    pub fn overlay(
        &self,
        provider: ProviderKind,
        repos: Vec<RemoteRepository>,
    ) -> Vec<RepoSummary> {
        let mut inner = self.lock();

        let summaries: Vec<RepoSummary> = repos
            .into_iter()
            .map(|repo| {
                let reviewed = match ReviewKey::new(provider, &repo.identity) {
                    Ok(key) => inner.reviewed.get(&key).copied().unwrap_or(false),
                    Err(_) => {
                        warn!("{} returned an unexpected identity: {}", provider, repo.identity);
                        false
                    }
                };
                RepoSummary::new(repo, reviewed)
            })
            .collect();

        inner.loaded.insert(provider, summaries.clone());
        summaries
    }

    /// Snapshot of the provider's most recently loaded list.
    pub fn loaded(&self, provider: ProviderKind) -> Vec<RepoSummary> {
        self.lock()
            .loaded
            .get(&provider)
            .cloned()
            .unwrap_or_default()
    }

    /// Number of repositories that have ever been toggled.
    pub fn len(&self) -> usize {
        self.lock().reviewed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
