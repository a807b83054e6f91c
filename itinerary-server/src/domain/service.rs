//! Scheduled service types.
//!
//! A `Service` is one timetabled train run: an id, a flat nominal price for
//! the whole run, and its ordered stops. Services are assembled with a
//! `ServiceBuilder` while the catalog is loaded and are immutable afterwards.

use chrono::Duration;

use super::{ClockTime, DomainError, ServiceId, Station, Stop, StopIndex};

/// A complete scheduled service.
///
/// # Invariants
///
/// - At least one stop
/// - Stops are in non-decreasing time order
/// - Price is finite and non-negative
/// - `total_minutes` is the whole-minute span from first to last stop,
///   computed once at construction
#[derive(Debug, Clone, PartialEq)]
pub struct Service {
    id: ServiceId,
    price: f64,
    stops: Vec<Stop>,
    total_minutes: i64,
}

impl Service {
    /// Construct a service, validating its stop sequence.
    ///
    /// # Examples
    ///
    /// ```
    /// use itinerary_server::domain::{ClockTime, Service, ServiceId, Station, Stop};
    ///
    /// let stops = vec![
    ///     Stop::new(ClockTime::parse_hhmm("08:00").unwrap(), Station::parse("X").unwrap()),
    ///     Stop::new(ClockTime::parse_hhmm("10:00").unwrap(), Station::parse("Z").unwrap()),
    /// ];
    /// let service = Service::new(ServiceId::new(1), 100.0, stops).unwrap();
    /// assert_eq!(service.total_minutes(), 120);
    /// ```
    pub fn new(id: ServiceId, price: f64, stops: Vec<Stop>) -> Result<Self, DomainError> {
        if !price.is_finite() || price < 0.0 {
            return Err(DomainError::InvalidPrice { service: id });
        }

        let (first, last) = match (stops.first(), stops.last()) {
            (Some(first), Some(last)) => (first.time(), last.time()),
            _ => return Err(DomainError::EmptyService),
        };

        if stops.windows(2).any(|pair| pair[1].time() < pair[0].time()) {
            return Err(DomainError::StopsOutOfOrder { service: id });
        }

        Ok(Self {
            id,
            price,
            stops,
            total_minutes: last.minutes_since(first),
        })
    }

    /// Start building a service stop by stop.
    pub fn builder(id: ServiceId, price: f64) -> ServiceBuilder {
        ServiceBuilder::new(id, price)
    }

    /// Returns the service id.
    pub fn id(&self) -> ServiceId {
        self.id
    }

    /// Returns the flat nominal price of the whole run.
    pub fn price(&self) -> f64 {
        self.price
    }

    /// Returns all stops in order.
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Returns the stop at an index.
    pub fn stop(&self, idx: StopIndex) -> Option<&Stop> {
        self.stops.get(idx.0)
    }

    /// Returns the number of stops.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Always false: services have at least one stop.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Index of the last stop.
    pub fn last_index(&self) -> StopIndex {
        StopIndex(self.stops.len() - 1)
    }

    /// Returns the first stop.
    pub fn first_stop(&self) -> &Stop {
        // Safe: validated non-empty at construction
        &self.stops[0]
    }

    /// Returns the last stop.
    pub fn last_stop(&self) -> &Stop {
        &self.stops[self.stops.len() - 1]
    }

    /// Departure time from the first stop.
    pub fn departure_time(&self) -> ClockTime {
        self.first_stop().time()
    }

    /// Arrival time at the last stop.
    pub fn arrival_time(&self) -> ClockTime {
        self.last_stop().time()
    }

    /// Whole minutes from first to last stop.
    pub fn total_minutes(&self) -> i64 {
        self.total_minutes
    }

    /// Duration from first to last stop.
    pub fn duration(&self) -> Duration {
        Duration::minutes(self.total_minutes)
    }

    /// Find the first stop at a station at or after the given index.
    ///
    /// Returns both the index and the stop, allowing unambiguous segment
    /// construction for services that call at a station more than once.
    pub fn find_stop(&self, station: &Station, after: StopIndex) -> Option<(StopIndex, &Stop)> {
        self.stops
            .iter()
            .enumerate()
            .skip(after.0)
            .find(|(_, stop)| stop.station() == station)
            .map(|(i, stop)| (StopIndex(i), stop))
    }

    /// Index of the first stop equal to `stop` (same time and station).
    pub fn index_of(&self, stop: &Stop) -> Option<StopIndex> {
        self.stops.iter().position(|s| s == stop).map(StopIndex)
    }

    /// Does this service call at the station at all?
    pub fn calls_at(&self, station: &Station) -> bool {
        self.find_stop(station, StopIndex(0)).is_some()
    }

    /// The station immediately after the first call at `station`.
    ///
    /// Returns `None` if the service does not call there or that call is
    /// its last stop.
    pub fn next_station(&self, station: &Station) -> Option<&Station> {
        let (idx, _) = self.find_stop(station, StopIndex(0))?;
        self.stop(idx.next()).map(Stop::station)
    }

    /// Time of the first call at `station`.
    pub fn time_at(&self, station: &Station) -> Option<ClockTime> {
        self.find_stop(station, StopIndex(0))
            .map(|(_, stop)| stop.time())
    }

    /// Does this service start at the station?
    pub fn starts_at(&self, station: &Station) -> bool {
        self.first_stop().station() == station
    }

    /// Does this service terminate at the station?
    pub fn ends_at(&self, station: &Station) -> bool {
        self.last_stop().station() == station
    }
}

/// Append-only builder used while the catalog is loaded.
#[derive(Debug, Clone)]
pub struct ServiceBuilder {
    id: ServiceId,
    price: f64,
    stops: Vec<Stop>,
}

impl ServiceBuilder {
    /// Create a builder for a service with no stops yet.
    pub fn new(id: ServiceId, price: f64) -> Self {
        Self {
            id,
            price,
            stops: Vec::new(),
        }
    }

    /// Append a stop.
    pub fn push(&mut self, stop: Stop) {
        self.stops.push(stop);
    }

    /// Append a stop, builder style.
    pub fn stop(mut self, time: ClockTime, station: Station) -> Self {
        self.push(Stop::new(time, station));
        self
    }

    /// Validate and freeze the service.
    pub fn build(self) -> Result<Service, DomainError> {
        Service::new(self.id, self.price, self.stops)
    }
}
