//! Pending search sessions for the HTTP surface.
//!
//! Each passenger has at most one pending session: the ranked candidates
//! of their latest search. A new search replaces it and a commit takes it
//! out. Abandoned sessions expire after a TTL.

use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::passengers::PassengerId;
use crate::planner::SearchSession;

/// Configuration for the session cache.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// How long an uncommitted session is kept.
    pub ttl: Duration,

    /// Maximum number of pending sessions.
    pub max_capacity: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(15 * 60),
            max_capacity: 10_000,
        }
    }
}

/// Pending sessions keyed by passenger.
#[derive(Clone)]
pub struct SessionCache {
    sessions: MokaCache<PassengerId, SearchSession>,
}

impl SessionCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &SessionConfig) -> Self {
        let sessions = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { sessions }
    }

    /// Store a session, replacing the passenger's previous one.
    pub async fn insert(&self, session: SearchSession) {
        self.sessions.insert(session.passenger(), session).await;
    }

    /// Peek at a passenger's pending session.
    pub async fn get(&self, passenger: PassengerId) -> Option<SearchSession> {
        self.sessions.get(&passenger).await
    }

    /// Take a passenger's pending session out of the cache.
    ///
    /// A missing or expired session comes back empty.
    pub async fn take(&self, passenger: PassengerId) -> SearchSession {
        self.sessions
            .remove(&passenger)
            .await
            .unwrap_or_else(|| SearchSession::empty(passenger))
    }

    /// Number of pending sessions (approximate, for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.sessions.entry_count()
    }
}
