//! Session carrier: opaque handles standing in for provider access tokens.
//!
//! After a successful code exchange the token is registered here and the
//! caller only ever holds the handle. A handle lives until logout or until it
//! has gone unused for the carrier's TTL; the token itself is never revoked
//! with the provider.

use std::time::{Duration, Instant};

use dashmap::DashMap;
use log::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{AccessToken, ProviderKind};

/// Idle lifetime of a handle when none is configured.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(60 * 60);

// Upper bound on the TTL so deadlines never overflow `Instant`.
const MAX_SESSION_TTL: Duration = Duration::from_secs(10 * 365 * 24 * 60 * 60);

/// Opaque session handle given to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionHandle(String);

impl SessionHandle {
    /// Generate a cryptographically random handle.
    fn generate() -> Self {
        let random_bytes: [u8; 32] = rand::thread_rng().gen();
        SessionHandle(hex::encode(random_bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for SessionHandle {
    fn from(handle: String) -> Self {
        SessionHandle(handle)
    }
}

struct Entry {
    provider: ProviderKind,
    access_token: AccessToken,
    expires_at: Instant,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at <= now
    }
}

/// Maps live session handles to the provider and token they were issued for.
///
/// Every successful [`resolve`](Self::resolve) pushes the handle's deadline
/// out by the TTL, matching the inactivity expiry of the cookie session.
pub struct SessionCarrier {
    sessions: DashMap<SessionHandle, Entry>,
    ttl: Duration,
}

impl Default for SessionCarrier {
    fn default() -> Self {
        Self::with_ttl(DEFAULT_SESSION_TTL)
    }
}

impl SessionCarrier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a carrier whose handles expire after `ttl` without use.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl: ttl.min(MAX_SESSION_TTL),
        }
    }

    /// Register a token and return the handle that stands for it.
    ///
    /// Expired handles are evicted first.
    pub fn issue(&self, provider: ProviderKind, access_token: AccessToken) -> SessionHandle {
        let now = Instant::now();
        self.evict_expired(now);

        let handle = SessionHandle::generate();
        self.sessions.insert(
            handle.clone(),
            Entry {
                provider,
                access_token,
                expires_at: now + self.ttl,
            },
        );
        debug!("Issued {} session, {} live", provider, self.sessions.len());
        handle
    }

    /// The token behind a handle, if the handle is live and belongs to `provider`.
    pub fn resolve(&self, provider: ProviderKind, handle: &SessionHandle) -> Option<AccessToken> {
        let now = Instant::now();
        let mut entry = self.sessions.get_mut(handle)?;
        if entry.provider != provider {
            return None;
        }

        if entry.is_expired(now) {
            // The shard lock must be released before removing.
            drop(entry);
            self.sessions
                .remove_if(handle, |_, entry| entry.is_expired(now));
            debug!("Dropped expired {} session", provider);
            return None;
        }

        entry.expires_at = now + self.ttl;
        Some(entry.access_token.clone())
    }

    /// Stop honoring a handle. Returns whether a live session was dropped.
    pub fn revoke(&self, provider: ProviderKind, handle: &SessionHandle) -> bool {
        let removed = self
            .sessions
            .remove_if(handle, |_, entry| entry.provider == provider)
            .is_some();
        if removed {
            debug!("Revoked {} session", provider);
        }
        removed
    }

    /// Idle lifetime of a handle.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn evict_expired(&self, now: Instant) {
        let before = self.sessions.len();
        self.sessions.retain(|_, entry| !entry.is_expired(now));
        let evicted = before.saturating_sub(self.sessions.len());
        if evicted > 0 {
            debug!("Evicted {} expired sessions", evicted);
        }
    }

    /// Number of held sessions, including expired ones not yet evicted.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
