//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Itinerary, Segment, Service, Stop};
use crate::passengers::{Passenger, Purchase};
use crate::planner::SearchSession;

/// Request to register a passenger.
#[derive(Debug, Deserialize)]
pub struct CreatePassengerRequest {
    /// Unique passenger name
    pub name: String,
}

/// Request to search for itineraries.
#[derive(Debug, Deserialize)]
pub struct SearchItinerariesRequest {
    /// Passenger id
    pub passenger: u32,

    /// Origin station name
    pub origin: String,

    /// Destination station name
    pub destination: String,

    /// Travel date, YYYY-MM-DD
    pub date: String,

    /// Earliest departure (exclusive), HH:MM
    pub time: String,
}

/// Request to commit one of the pending candidates.
#[derive(Debug, Deserialize)]
pub struct CommitRequest {
    /// Passenger id
    pub passenger: u32,

    /// 1-based candidate number, or 0 to decline all
    pub choice: usize,
}

/// One timed station call.
#[derive(Debug, Serialize)]
pub struct StopResult {
    /// Time, HH:MM
    pub time: String,

    /// Station name
    pub station: String,
}

/// A scheduled service.
#[derive(Debug, Serialize)]
pub struct ServiceResult {
    /// Service id
    pub id: u32,

    /// Price of the whole run
    pub price: f64,

    /// First departure, HH:MM
    pub departure: String,

    /// Final arrival, HH:MM
    pub arrival: String,

    /// Running time in minutes
    pub duration_mins: i64,

    /// All stops in order
    pub stops: Vec<StopResult>,
}

/// A segment of an itinerary.
#[derive(Debug, Serialize)]
pub struct SegmentResult {
    /// Service ridden
    pub service_id: u32,

    /// Boarding station
    pub origin: String,

    /// Alighting station
    pub destination: String,

    /// Boarding time, HH:MM
    pub departure: String,

    /// Alighting time, HH:MM
    pub arrival: String,

    /// Share of the service price for this segment
    pub price: f64,

    /// Stops travelled, boarding and alighting included
    pub stops: Vec<StopResult>,
}

/// A complete itinerary.
#[derive(Debug, Serialize)]
pub struct ItineraryResult {
    /// Travel date, YYYY-MM-DD
    pub date: String,

    /// Departure time, HH:MM
    pub departure_time: String,

    /// Arrival time, HH:MM
    pub arrival_time: String,

    /// Total duration in minutes, waits included
    pub duration_mins: i64,

    /// Total price before any passenger discount
    pub price: f64,

    /// Number of changes
    pub changes: usize,

    /// Segments in order
    pub segments: Vec<SegmentResult>,
}

/// A numbered search candidate.
#[derive(Debug, Serialize)]
pub struct CandidateResult {
    /// Number to pass to commit
    pub choice: usize,

    #[serde(flatten)]
    pub itinerary: ItineraryResult,
}

/// Response to an itinerary search.
#[derive(Debug, Serialize)]
pub struct SearchItinerariesResponse {
    /// Passenger the candidates are held for
    pub passenger: u32,

    /// Candidates, best first
    pub candidates: Vec<CandidateResult>,

    /// The search stopped at its state limit
    pub truncated: bool,
}

/// Response to a commit.
#[derive(Debug, Serialize)]
pub struct CommitResponse {
    /// Passenger id
    pub passenger: u32,

    /// The committed itinerary, absent when all were declined
    pub committed: Option<ItineraryResult>,
}

/// A registered passenger.
#[derive(Debug, Serialize)]
pub struct PassengerResult {
    /// Passenger id
    pub id: u32,

    /// Passenger name
    pub name: String,

    /// Fare category
    pub category: String,

    /// Number of committed itineraries
    pub itineraries: usize,

    /// Total amount paid
    pub paid_total: f64,

    /// Total time travelled in minutes
    pub travel_mins: i64,
}

/// A committed itinerary in a passenger's history.
#[derive(Debug, Serialize)]
pub struct PurchaseResult {
    /// Amount paid after discount
    pub paid: f64,

    #[serde(flatten)]
    pub itinerary: ItineraryResult,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl StopResult {
    /// Create from a domain Stop.
    pub fn from_stop(stop: &Stop) -> Self {
        Self {
            time: stop.time().to_string(),
            station: stop.station().as_str().to_string(),
        }
    }
}

impl ServiceResult {
    /// Create from a domain Service.
    pub fn from_service(service: &Service) -> Self {
        Self {
            id: service.id().get(),
            price: service.price(),
            departure: service.departure_time().to_string(),
            arrival: service.arrival_time().to_string(),
            duration_mins: service.total_minutes(),
            stops: service.stops().iter().map(StopResult::from_stop).collect(),
        }
    }
}

impl SegmentResult {
    /// Create from a domain Segment.
    pub fn from_segment(segment: &Segment) -> Self {
        Self {
            service_id: segment.service_id().get(),
            origin: segment.board_station().as_str().to_string(),
            destination: segment.alight_station().as_str().to_string(),
            departure: segment.departure_time().to_string(),
            arrival: segment.arrival_time().to_string(),
            price: segment.price(),
            stops: segment.stops().iter().map(StopResult::from_stop).collect(),
        }
    }
}

impl ItineraryResult {
    /// Create from a domain Itinerary.
    pub fn from_itinerary(itinerary: &Itinerary) -> Self {
        Self {
            date: itinerary.date().format("%Y-%m-%d").to_string(),
            departure_time: itinerary.departure_time().to_string(),
            arrival_time: itinerary.arrival_time().to_string(),
            duration_mins: itinerary.duration().num_minutes(),
            price: itinerary.price(),
            changes: itinerary.change_count(),
            segments: itinerary
                .segments()
                .iter()
                .map(SegmentResult::from_segment)
                .collect(),
        }
    }
}

impl SearchItinerariesResponse {
    /// Number the session's candidates from 1.
    pub fn from_session(session: &SearchSession) -> Self {
        let candidates = session
            .candidates()
            .iter()
            .enumerate()
            .map(|(i, itinerary)| CandidateResult {
                choice: i + 1,
                itinerary: ItineraryResult::from_itinerary(itinerary),
            })
            .collect();

        Self {
            passenger: session.passenger().get(),
            candidates,
            truncated: session.truncated(),
        }
    }
}

impl PassengerResult {
    /// Create from a registry Passenger.
    pub fn from_passenger(passenger: &Passenger) -> Self {
        Self {
            id: passenger.id().get(),
            name: passenger.name().to_string(),
            category: passenger.category().to_string(),
            itineraries: passenger.itinerary_count(),
            paid_total: passenger.paid_total(),
            travel_mins: passenger.travel_time().num_minutes(),
        }
    }
}

impl PurchaseResult {
    /// Create from a registry Purchase.
    pub fn from_purchase(purchase: &Purchase) -> Self {
        Self {
            paid: purchase.paid,
            itinerary: ItineraryResult::from_itinerary(&purchase.itinerary),
        }
    }
}
