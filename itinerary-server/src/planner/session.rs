//! Propose/commit selection protocol.
//!
//! `propose` runs a search and returns the ranked candidates as a
//! `SearchSession`. The caller later hands the session back to `commit`
//! with a 1-based choice; the session is consumed either way.

use tracing::{debug, info};

use crate::domain::Itinerary;
use crate::passengers::{PassengerId, PassengerStore};

use super::rank::rank_itineraries;
use super::search::{Planner, SearchError, SearchRequest};

/// The ranked, not yet committed result of one search.
#[derive(Debug, Clone)]
pub struct SearchSession {
    passenger: PassengerId,
    candidates: Vec<Itinerary>,
    truncated: bool,
}

impl SearchSession {
    /// A session with nothing to choose from.
    pub fn empty(passenger: PassengerId) -> Self {
        Self {
            passenger,
            candidates: Vec::new(),
            truncated: false,
        }
    }

    /// Passenger the search was made for.
    pub fn passenger(&self) -> PassengerId {
        self.passenger
    }

    /// Candidates, best first. Choice `n` is `candidates()[n - 1]`.
    pub fn candidates(&self) -> &[Itinerary] {
        &self.candidates
    }

    /// Number of candidates; the highest valid choice.
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Whether there is nothing to choose.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Whether the search hit its state limit, so better itineraries
    /// may exist than those offered.
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    /// Commit one candidate to the passenger's history.
    ///
    /// Choice 0 declines every candidate. Otherwise the choice is 1-based;
    /// the committed itinerary is returned after the store has recorded it.
    /// The session is consumed whatever the outcome.
    ///
    /// # Errors
    ///
    /// Returns `NoSuchItineraryChoice` if the choice is past the end of the
    /// list, or `NoSuchPassenger` if the passenger has disappeared from the
    /// store.
    pub fn commit<P: PassengerStore>(
        self,
        choice: usize,
        passengers: &mut P,
    ) -> Result<Option<Itinerary>, SearchError> {
        let passenger = self.passenger;

        if choice == 0 {
            debug!(passenger = %passenger, "all candidates declined");
            return Ok(None);
        }

        let Some(itinerary) = self.candidates.into_iter().nth(choice - 1) else {
            return Err(SearchError::NoSuchItineraryChoice { passenger, choice });
        };

        passengers.record_itinerary(passenger, itinerary.clone())?;

        info!(
            passenger = %passenger,
            choice,
            price = itinerary.price(),
            "itinerary committed"
        );
        Ok(Some(itinerary))
    }
}

impl Planner<'_> {
    /// Search and rank itineraries for a passenger.
    ///
    /// # Errors
    ///
    /// Returns `NoSuchPassenger` if the passenger is not in the store, then
    /// `NoSuchStation` if the origin or destination is unknown.
    pub fn propose<P: PassengerStore>(
        &self,
        passengers: &P,
        request: &SearchRequest,
    ) -> Result<SearchSession, SearchError> {
        if !passengers.exists(request.passenger) {
            return Err(SearchError::NoSuchPassenger(request.passenger));
        }

        let result = self.explore(request)?;
        let mut candidates = rank_itineraries(result.itineraries);
        if let Some(max) = self.config.max_results {
            candidates.truncate(max);
        }

        debug!(
            passenger = %request.passenger,
            candidates = candidates.len(),
            states_explored = result.states_explored,
            truncated = result.truncated,
            "proposed itineraries"
        );

        Ok(SearchSession {
            passenger: request.passenger,
            candidates,
            truncated: result.truncated,
        })
    }
}
