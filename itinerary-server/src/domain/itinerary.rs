//! Itinerary type.
//!
//! An `Itinerary` is a complete dated trip from origin to destination made
//! of one or more segments, possibly on different services. Its price and
//! duration are derived once, when it is assembled.

use chrono::{Duration, NaiveDate};

use super::{ClockTime, DomainError, Segment, ServiceId, Station, Stop, StopIndex};

/// Structural identity of an itinerary: its segments' services and stop indices.
pub type ItineraryKey = Vec<(ServiceId, StopIndex, StopIndex)>;

/// A complete itinerary for a given date.
///
/// # Invariants
///
/// - At least one segment
/// - Consecutive segments connect (alighting station of one is the
///   boarding station of the next)
/// - `price` is the sum of the segment prices
/// - `duration` is the sum of the gaps between consecutive stop times over
///   every stop travelled, transfers included
#[derive(Debug, Clone)]
pub struct Itinerary {
    date: NaiveDate,
    segments: Vec<Segment>,
    price: f64,
    duration: Duration,
}

impl Itinerary {
    /// Assemble an itinerary from validated segments.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the segment list is empty or two consecutive segments
    /// don't meet at the same station.
    ///
    /// # Examples
    ///
    /// ```
    /// use itinerary_server::domain::{ClockTime, Itinerary, Segment, Service, ServiceId, Station, StopIndex};
    /// use chrono::NaiveDate;
    /// use std::sync::Arc;
    ///
    /// let service = Arc::new(
    ///     Service::builder(ServiceId::new(1), 100.0)
    ///         .stop(ClockTime::parse_hhmm("08:00").unwrap(), Station::parse("X").unwrap())
    ///         .stop(ClockTime::parse_hhmm("09:00").unwrap(), Station::parse("Y").unwrap())
    ///         .stop(ClockTime::parse_hhmm("10:00").unwrap(), Station::parse("Z").unwrap())
    ///         .build()
    ///         .unwrap(),
    /// );
    ///
    /// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    /// let segment = Segment::new(service, StopIndex(0), StopIndex(2)).unwrap();
    /// let itinerary = Itinerary::new(date, vec![segment]).unwrap();
    ///
    /// assert_eq!(itinerary.price(), 100.0);
    /// assert_eq!(itinerary.duration().num_minutes(), 120);
    /// ```
    pub fn new(date: NaiveDate, segments: Vec<Segment>) -> Result<Self, DomainError> {
        if segments.is_empty() {
            return Err(DomainError::EmptyItinerary);
        }

        for window in segments.windows(2) {
            let alight = window[0].alight_station();
            let board = window[1].board_station();
            if alight != board {
                return Err(DomainError::SegmentsNotConnected(
                    alight.clone(),
                    board.clone(),
                ));
            }
        }

        let price = segments.iter().map(Segment::price).sum();

        let travelled: Vec<&Stop> = segments.iter().flat_map(|s| s.stops()).collect();
        let duration = travelled
            .windows(2)
            .map(|pair| pair[1].time().signed_duration_since(pair[0].time()))
            .fold(Duration::zero(), |total, gap| total + gap);

        Ok(Itinerary {
            date,
            segments,
            price,
            duration,
        })
    }

    /// Returns the travel date.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns all segments in order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns the number of segments.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Returns the number of changes (segments - 1).
    pub fn change_count(&self) -> usize {
        self.segments.len().saturating_sub(1)
    }

    /// Returns the total price before any passenger discount.
    pub fn price(&self) -> f64 {
        self.price
    }

    /// Returns the total duration.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Returns the origin station.
    pub fn origin(&self) -> &Station {
        // Safe: validated non-empty at construction
        self.segments[0].board_station()
    }

    /// Returns the destination station.
    pub fn destination(&self) -> &Station {
        self.segments[self.segments.len() - 1].alight_station()
    }

    /// Returns the departure time (from the first segment).
    pub fn departure_time(&self) -> ClockTime {
        self.segments[0].departure_time()
    }

    /// Returns the arrival time (at the end of the last segment).
    pub fn arrival_time(&self) -> ClockTime {
        self.segments[self.segments.len() - 1].arrival_time()
    }

    /// Returns the structural key used to detect duplicate itineraries.
    pub fn key(&self) -> ItineraryKey {
        self.segments.iter().map(Segment::key).collect()
    }

    /// Returns the ids of the services used, in order.
    pub fn service_ids(&self) -> impl Iterator<Item = ServiceId> + '_ {
        self.segments.iter().map(Segment::service_id)
    }
}
