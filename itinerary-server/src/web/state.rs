//! Application state for the web layer.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::catalog::Catalog;
use crate::passengers::Passengers;
use crate::planner::{Network, SearchConfig};
use crate::sessions::{SessionCache, SessionConfig};

/// Shared application state.
///
/// The network is read-only after start-up. Passengers change on
/// registration and commit, so they sit behind a lock. Searches and
/// commits hold its write lock while they touch the passenger's pending
/// session.
#[derive(Clone)]
pub struct AppState {
    /// Service network
    pub network: Arc<Network>,

    /// Passenger registry
    pub passengers: Arc<RwLock<Passengers>>,

    /// Pending search sessions
    pub sessions: SessionCache,

    /// Itinerary search configuration
    pub config: Arc<SearchConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        network: Network,
        passengers: Passengers,
        config: SearchConfig,
        session_config: &SessionConfig,
    ) -> Self {
        Self {
            network: Arc::new(network),
            passengers: Arc::new(RwLock::new(passengers)),
            sessions: SessionCache::new(session_config),
            config: Arc::new(config),
        }
    }

    /// Create app state from an imported catalog.
    pub fn from_catalog(
        catalog: Catalog,
        config: SearchConfig,
        session_config: &SessionConfig,
    ) -> Self {
        Self::new(catalog.network, catalog.passengers, config, session_config)
    }
}
