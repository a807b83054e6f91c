//! Domain error types.
//!
//! These errors represent validation failures and data inconsistencies
//! in the domain layer. They are distinct from search and API errors.

use super::{ServiceId, Station};

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// A segment cannot be priced or does not exist on its service
    #[error("invalid segment: {0}")]
    InvalidSegment(&'static str),

    /// Service has no stops
    #[error("service must have at least one stop")]
    EmptyService,

    /// Service stops are not in time order
    #[error("stops of service {service} are not in time order")]
    StopsOutOfOrder { service: ServiceId },

    /// Service price is negative or not a number
    #[error("price of service {service} must be a non-negative number")]
    InvalidPrice { service: ServiceId },

    /// Two services share an id
    #[error("duplicate service id {0}")]
    DuplicateService(ServiceId),

    /// Itinerary has no segments
    #[error("itinerary must have at least one segment")]
    EmptyItinerary,

    /// Consecutive segments don't meet at the same station
    #[error("segments are not connected: alight at {0}, board at {1}")]
    SegmentsNotConnected(Station, Station),
}
