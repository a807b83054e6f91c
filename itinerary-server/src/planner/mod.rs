//! Itinerary planner.
//!
//! This module implements the core search that answers: "how can I get
//! from here to there, leaving after this time?"
//!
//! The network index narrows each step to the services that can actually
//! be boarded, the explorer walks the network from the origin, and the
//! ranked result is handed back as a session the passenger commits from.

mod config;
mod index;
mod rank;
mod search;
mod session;

pub use config::SearchConfig;
pub use index::Network;
pub use rank::{compare_itineraries, rank_itineraries};
pub use search::{Planner, SearchError, SearchRequest, SearchResult};
pub use session::SearchSession;
