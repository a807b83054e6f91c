//! Stop types for scheduled services.
//!
//! A `Stop` is one timed station call of a service. A `StopIndex` is an
//! unambiguous position within a service's stop sequence.

use super::{ClockTime, Station};

/// Index of a stop within a service's stop sequence.
///
/// Used instead of `Station` to disambiguate services that call at the same
/// station more than once.
///
/// # Examples
///
/// ```
/// use itinerary_server::domain::StopIndex;
///
/// let idx = StopIndex(0);
/// assert_eq!(idx.next(), StopIndex(1));
/// assert_eq!(idx.prev(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StopIndex(pub usize);

impl StopIndex {
    /// Returns the next index.
    pub fn next(self) -> Self {
        StopIndex(self.0 + 1)
    }

    /// Returns the previous index, if any.
    pub fn prev(self) -> Option<Self> {
        self.0.checked_sub(1).map(StopIndex)
    }
}

impl std::fmt::Display for StopIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for StopIndex {
    fn from(value: usize) -> Self {
        StopIndex(value)
    }
}

/// A timed station call on a service.
///
/// The timetable gives a single time per stop, which is both when the train
/// reaches the station and when it leaves it. Two stops are the same stop
/// only if both time and station match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Stop {
    time: ClockTime,
    station: Station,
}

impl Stop {
    /// Creates a new stop.
    pub fn new(time: ClockTime, station: Station) -> Self {
        Self { time, station }
    }

    /// Time of day at this stop.
    pub fn time(&self) -> ClockTime {
        self.time
    }

    /// Station of this stop.
    pub fn station(&self) -> &Station {
        &self.station
    }
}

impl std::fmt::Display for Stop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.time, self.station)
    }
}
