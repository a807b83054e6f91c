//! Search configuration for the itinerary planner.

/// Configuration parameters for itinerary search.
///
/// Every limit bounds the traversal so that cyclic or densely connected
/// timetables still terminate.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Maximum number of segments (services boarded) in one itinerary.
    pub max_legs: usize,

    /// Maximum number of stops travelled along one branch.
    pub max_hops: usize,

    /// Maximum number of search states expanded per search.
    pub max_states: usize,

    /// Maximum number of itineraries offered, if any.
    pub max_results: Option<usize>,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        max_legs: usize,
        max_hops: usize,
        max_states: usize,
        max_results: Option<usize>,
    ) -> Self {
        Self {
            max_legs,
            max_hops,
            max_states,
            max_results,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_legs: 4,
            max_hops: 64,
            max_states: 10_000,
            max_results: Some(50),
        }
    }
}
