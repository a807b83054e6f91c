//! Route exploration.
//!
//! Finds every itinerary from an origin to a destination that departs
//! after a given time, combining services at shared stations.
//!
//! The search walks the network stop by stop from a worklist. A state is
//! "at this station at this time, possibly still on a train". From each
//! state the passenger either stays on the current service or changes to
//! any service leaving the station later. A service that reaches the
//! destination ends its branch with a candidate itinerary.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, trace, warn};

use crate::domain::{
    ClockTime, DomainError, Itinerary, ItineraryKey, Segment, Service, ServiceId, Station,
    StopIndex,
};
use crate::passengers::{PassengerError, PassengerId};

use super::config::SearchConfig;
use super::index::Network;

/// Error from itinerary search and selection.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SearchError {
    /// No service calls at the station
    #[error("no such station: {0}")]
    NoSuchStation(String),

    /// No service has this id
    #[error("no such service: {0}")]
    NoSuchService(ServiceId),

    /// The passenger is not registered
    #[error("no such passenger: {0}")]
    NoSuchPassenger(PassengerId),

    /// Commit ordinal outside the candidate list
    #[error("no itinerary choice {choice} for passenger {passenger}")]
    NoSuchItineraryChoice { passenger: PassengerId, choice: usize },

    /// The passenger store rejected the itinerary
    #[error(transparent)]
    Passenger(PassengerError),

    /// Internal invariant violated while assembling an itinerary
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl From<PassengerError> for SearchError {
    fn from(err: PassengerError) -> Self {
        match err {
            PassengerError::NoSuchPassenger(id) => SearchError::NoSuchPassenger(id),
            other => SearchError::Passenger(other),
        }
    }
}

/// Request for itinerary search.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// Who is travelling.
    pub passenger: PassengerId,

    /// Where the itinerary starts.
    pub origin: Station,

    /// Where the itinerary ends.
    pub destination: Station,

    /// Travel date, carried onto every itinerary.
    pub date: NaiveDate,

    /// Departures must be strictly after this time.
    pub time: ClockTime,
}

impl SearchRequest {
    /// Create a new search request.
    pub fn new(
        passenger: PassengerId,
        origin: Station,
        destination: Station,
        date: NaiveDate,
        time: ClockTime,
    ) -> Self {
        Self {
            passenger,
            origin,
            destination,
            date,
            time,
        }
    }
}

/// Result of route exploration, before ranking.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Distinct itineraries in discovery order.
    pub itineraries: Vec<Itinerary>,

    /// Number of states expanded.
    pub states_explored: usize,

    /// The state limit stopped the search before the worklist ran dry.
    pub truncated: bool,
}

/// The service a passenger is currently aboard.
#[derive(Debug, Clone)]
struct Riding {
    service: Arc<Service>,
    board: StopIndex,
    at: StopIndex,
}

/// Worklist state during search.
#[derive(Debug, Clone)]
struct SearchState {
    /// Current station.
    station: Station,

    /// Arrival time at this station (the requested time at the origin).
    time: ClockTime,

    /// Service still being ridden, if any.
    riding: Option<Riding>,

    /// Segments already alighted from.
    legs: Vec<Segment>,

    /// Services boarded so far on this branch.
    used_services: HashSet<ServiceId>,

    /// Latest time each station was reached on this branch.
    visited: HashMap<Station, ClockTime>,

    /// Stops travelled on this branch.
    hops: usize,
}

impl SearchState {
    fn initial(request: &SearchRequest) -> Self {
        let mut visited = HashMap::new();
        visited.insert(request.origin.clone(), request.time);

        Self {
            station: request.origin.clone(),
            time: request.time,
            riding: None,
            legs: Vec::new(),
            used_services: HashSet::new(),
            visited,
            hops: 0,
        }
    }

    /// Segments boarded so far, including the one being ridden.
    fn segment_count(&self) -> usize {
        self.legs.len() + usize::from(self.riding.is_some())
    }

    /// Completed legs if the passenger alights here.
    fn legs_alighting_here(&self) -> Result<Vec<Segment>, DomainError> {
        let mut legs = self.legs.clone();
        if let Some(riding) = &self.riding {
            legs.push(Segment::new(riding.service.clone(), riding.board, riding.at)?);
        }
        Ok(legs)
    }

    /// A station may be revisited only at a strictly later time.
    fn makes_progress(&self, station: &Station, time: ClockTime) -> bool {
        self.visited.get(station).is_none_or(|prev| time > *prev)
    }
}

/// One way of leaving the current station on a service.
struct Boarding {
    service: Arc<Service>,
    board: StopIndex,
    at: StopIndex,
    legs: Vec<Segment>,
}

/// First call at `station`, before the last stop, leaving after `after`.
fn boarding_index(service: &Service, station: &Station, after: ClockTime) -> Option<StopIndex> {
    service.stops()[..service.len() - 1]
        .iter()
        .position(|stop| stop.station() == station && stop.time() > after)
        .map(StopIndex)
}

/// Itinerary planner over a network index.
pub struct Planner<'a> {
    pub(super) network: &'a Network,
    pub(super) config: &'a SearchConfig,
}

impl<'a> Planner<'a> {
    /// Create a new planner.
    pub fn new(network: &'a Network, config: &'a SearchConfig) -> Self {
        Self { network, config }
    }

    /// Enumerate candidate itineraries for a request, unranked.
    ///
    /// # Errors
    ///
    /// Returns `NoSuchStation` if the origin or destination is unknown.
    pub fn explore(&self, request: &SearchRequest) -> Result<SearchResult, SearchError> {
        self.network.require_station(&request.origin)?;
        self.network.require_station(&request.destination)?;

        // Round trips are never itineraries
        if request.origin == request.destination {
            debug!(station = %request.origin, "origin is the destination");
            return Ok(SearchResult {
                itineraries: Vec::new(),
                states_explored: 0,
                truncated: false,
            });
        }

        debug!(
            origin = %request.origin,
            destination = %request.destination,
            after = %request.time,
            "exploring itineraries"
        );

        let mut itineraries = Vec::new();
        let mut seen: HashSet<ItineraryKey> = HashSet::new();
        let mut states_explored = 0;
        let mut truncated = false;

        let mut queue = VecDeque::from([SearchState::initial(request)]);

        while let Some(state) = queue.pop_front() {
            states_explored += 1;
            if states_explored > self.config.max_states {
                warn!(
                    max_states = self.config.max_states,
                    found = itineraries.len(),
                    "state limit reached, search truncated"
                );
                truncated = true;
                break;
            }

            for boarding in self.boardings(&state)? {
                let destination = boarding
                    .service
                    .find_stop(&request.destination, boarding.at.next())
                    .map(|(idx, _)| idx);

                if let Some(alight) = destination {
                    let mut segments = boarding.legs;
                    segments.push(Segment::new(boarding.service, boarding.board, alight)?);
                    let itinerary = Itinerary::new(request.date, segments)?;

                    if seen.insert(itinerary.key()) {
                        trace!(
                            departure = %itinerary.departure_time(),
                            arrival = %itinerary.arrival_time(),
                            segments = itinerary.segment_count(),
                            "found itinerary"
                        );
                        itineraries.push(itinerary);
                    }
                    continue;
                }

                if let Some(next) = self.advance(&state, boarding) {
                    queue.push_back(next);
                }
            }
        }

        debug!(
            found = itineraries.len(),
            states_explored, "exploration finished"
        );

        Ok(SearchResult {
            itineraries,
            states_explored,
            truncated,
        })
    }

    /// Every service the passenger could be on when leaving this state.
    fn boardings(&self, state: &SearchState) -> Result<Vec<Boarding>, SearchError> {
        let mut boardings = Vec::new();

        if let Some(riding) = &state.riding {
            boardings.push(Boarding {
                service: riding.service.clone(),
                board: riding.board,
                at: riding.at,
                legs: state.legs.clone(),
            });
        }

        // A change adds a segment
        if state.segment_count() >= self.config.max_legs {
            return Ok(boardings);
        }

        let legs = state.legs_alighting_here()?;

        for service in self
            .network
            .services_departing_after(&state.station, state.time)?
        {
            if state.used_services.contains(&service.id()) {
                continue;
            }

            // Zero running time means no segment of it can be priced
            if service.total_minutes() == 0 {
                trace!(service = %service.id(), "skipping service with zero running time");
                continue;
            }

            let Some(board) = boarding_index(&service, &state.station, state.time) else {
                continue;
            };

            boardings.push(Boarding {
                service,
                board,
                at: board,
                legs: legs.clone(),
            });
        }

        Ok(boardings)
    }

    /// Ride one stop further, if limits and progress allow.
    fn advance(&self, state: &SearchState, boarding: Boarding) -> Option<SearchState> {
        let next = boarding.at.next();
        let stop = boarding.service.stop(next)?;

        if state.hops >= self.config.max_hops {
            return None;
        }

        if !state.makes_progress(stop.station(), stop.time()) {
            trace!(station = %stop.station(), "no progress, dropping branch");
            return None;
        }

        let station = stop.station().clone();
        let time = stop.time();

        let mut used_services = state.used_services.clone();
        used_services.insert(boarding.service.id());

        let mut visited = state.visited.clone();
        visited.insert(station.clone(), time);

        Some(SearchState {
            station,
            time,
            riding: Some(Riding {
                service: boarding.service,
                board: boarding.board,
                at: next,
            }),
            legs: boarding.legs,
            used_services,
            visited,
            hops: state.hops + 1,
        })
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
