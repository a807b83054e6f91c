//! Itinerary segment type.
//!
//! A `Segment` is the part of one service's run between boarding and
//! alighting. It uses `Arc<Service>` for cheap cloning during search.

use std::sync::Arc;

use chrono::Duration;

use super::{ClockTime, DomainError, Service, ServiceId, Station, Stop, StopIndex, price_between};

/// A segment of an itinerary (one service, board to alight).
///
/// # Invariants
///
/// - `board_idx < alight_idx` (by index, so a station repeated at the same
///   time cannot produce an empty segment)
/// - Both indices are valid for the service's stops
/// - The price is computed once, at construction
#[derive(Debug, Clone)]
pub struct Segment {
    service: Arc<Service>,
    board_idx: StopIndex,
    alight_idx: StopIndex,
    price: f64,
}

impl Segment {
    /// Construct a segment, validating the indices and pricing it.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidSegment` if `alight_idx <= board_idx`,
    /// either index is out of bounds, or the service cannot be priced.
    ///
    /// # Examples
    ///
    /// ```
    /// use itinerary_server::domain::{ClockTime, Segment, Service, ServiceId, Station, StopIndex};
    /// use std::sync::Arc;
    ///
    /// let service = Service::builder(ServiceId::new(1), 100.0)
    ///     .stop(ClockTime::parse_hhmm("08:00").unwrap(), Station::parse("X").unwrap())
    ///     .stop(ClockTime::parse_hhmm("09:00").unwrap(), Station::parse("Y").unwrap())
    ///     .stop(ClockTime::parse_hhmm("10:00").unwrap(), Station::parse("Z").unwrap())
    ///     .build()
    ///     .unwrap();
    ///
    /// let segment = Segment::new(Arc::new(service), StopIndex(0), StopIndex(1)).unwrap();
    /// assert_eq!(segment.departure_time().to_string(), "08:00");
    /// assert_eq!(segment.arrival_time().to_string(), "09:00");
    /// assert_eq!(segment.price(), 50.0);
    /// ```
    pub fn new(
        service: Arc<Service>,
        board_idx: StopIndex,
        alight_idx: StopIndex,
    ) -> Result<Self, DomainError> {
        if alight_idx <= board_idx {
            return Err(DomainError::InvalidSegment(
                "alight index must be after board index",
            ));
        }

        let price = price_between(&service, board_idx, alight_idx)?;

        Ok(Segment {
            service,
            board_idx,
            alight_idx,
            price,
        })
    }

    /// Returns the service this segment is on.
    pub fn service(&self) -> &Arc<Service> {
        &self.service
    }

    /// Returns the service id.
    pub fn service_id(&self) -> ServiceId {
        self.service.id()
    }

    /// Returns the boarding stop index.
    pub fn board_idx(&self) -> StopIndex {
        self.board_idx
    }

    /// Returns the alighting stop index.
    pub fn alight_idx(&self) -> StopIndex {
        self.alight_idx
    }

    /// Returns the boarding stop.
    pub fn board_stop(&self) -> &Stop {
        // Safe: validated at construction
        &self.service.stops()[self.board_idx.0]
    }

    /// Returns the alighting stop.
    pub fn alight_stop(&self) -> &Stop {
        &self.service.stops()[self.alight_idx.0]
    }

    /// Returns the boarding station.
    pub fn board_station(&self) -> &Station {
        self.board_stop().station()
    }

    /// Returns the alighting station.
    pub fn alight_station(&self) -> &Station {
        self.alight_stop().station()
    }

    /// Returns the departure time from the boarding stop.
    pub fn departure_time(&self) -> ClockTime {
        self.board_stop().time()
    }

    /// Returns the arrival time at the alighting stop.
    pub fn arrival_time(&self) -> ClockTime {
        self.alight_stop().time()
    }

    /// Returns the fare for this segment.
    pub fn price(&self) -> f64 {
        self.price
    }

    /// Returns the time spent on the train.
    pub fn duration(&self) -> Duration {
        self.arrival_time()
            .signed_duration_since(self.departure_time())
    }

    /// Returns all stops travelled (from board to alight, inclusive).
    pub fn stops(&self) -> &[Stop] {
        &self.service.stops()[self.board_idx.0..=self.alight_idx.0]
    }

    /// Structural identity: service and stop indices.
    pub fn key(&self) -> (ServiceId, StopIndex, StopIndex) {
        (self.service.id(), self.board_idx, self.alight_idx)
    }
}

impl PartialEq for Segment {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Segment {}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(s: &str) -> ClockTime {
        ClockTime::parse_hhmm(s).unwrap()
    }

    fn station(s: &str) -> Station {
        Station::parse(s).unwrap()
    }

    fn make_service() -> Arc<Service> {
        Arc::new(
            Service::builder(ServiceId::new(1), 100.0)
                .stop(time("08:00"), station("X"))
                .stop(time("09:00"), station("Y"))
                .stop(time("10:00"), station("Z"))
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn segment_accessors() {
        let segment = Segment::new(make_service(), StopIndex(1), StopIndex(2)).unwrap();

        assert_eq!(segment.service_id(), ServiceId::new(1));
        assert_eq!(segment.board_station(), &station("Y"));
        assert_eq!(segment.alight_station(), &station("Z"));
        assert_eq!(segment.departure_time(), time("09:00"));
        assert_eq!(segment.arrival_time(), time("10:00"));
        assert_eq!(segment.duration(), Duration::minutes(60));
        assert_eq!(segment.price(), 50.0);
        assert_eq!(segment.stops().len(), 2);
    }

    #[test]
    fn reject_backwards() {
        let result = Segment::new(make_service(), StopIndex(2), StopIndex(1));
        assert!(matches!(result, Err(DomainError::InvalidSegment(_))));
    }

    #[test]
    fn reject_same_stop() {
        let result = Segment::new(make_service(), StopIndex(1), StopIndex(1));
        assert!(matches!(result, Err(DomainError::InvalidSegment(_))));
    }

    #[test]
    fn reject_out_of_bounds() {
        let result = Segment::new(make_service(), StopIndex(0), StopIndex(5));
        assert!(matches!(result, Err(DomainError::InvalidSegment(_))));
    }

    #[test]
    fn reject_same_time_duplicate_station() {
        // Two stops at the same time: a segment between them is still
        // index-ordered, but a zero-length service cannot be priced.
        let service = Arc::new(
            Service::builder(ServiceId::new(9), 10.0)
                .stop(time("08:00"), station("X"))
                .stop(time("08:00"), station("X"))
                .build()
                .unwrap(),
        );
        let result = Segment::new(service, StopIndex(0), StopIndex(1));
        assert!(matches!(result, Err(DomainError::InvalidSegment(_))));
    }

    #[test]
    fn equality_is_structural() {
        let service = make_service();
        let a = Segment::new(service.clone(), StopIndex(0), StopIndex(2)).unwrap();
        let b = Segment::new(service.clone(), StopIndex(0), StopIndex(2)).unwrap();
        let c = Segment::new(service, StopIndex(0), StopIndex(1)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
