//! Segment pricing.
//!
//! A segment costs the share of its service's price proportional to the
//! share of the service's running time it covers, in whole minutes:
//!
//! ```text
//! price(board, alight) = service_price * minutes(board, alight) / minutes(first, last)
//! ```

use super::{DomainError, Service, Stop, StopIndex};

/// Price of travelling between two stops of a service.
///
/// The boarding stop is matched by time and station; the alighting stop is
/// matched at or after it, so a service calling at a station twice prices
/// the forward journey.
///
/// # Errors
///
/// Returns `DomainError::InvalidSegment` if either stop is not on the
/// service (in order) or the service has zero running time.
///
/// # Examples
///
/// ```
/// use itinerary_server::domain::{segment_price, ClockTime, Service, ServiceId, Station, Stop};
///
/// let x = Stop::new(ClockTime::parse_hhmm("08:00").unwrap(), Station::parse("X").unwrap());
/// let y = Stop::new(ClockTime::parse_hhmm("09:00").unwrap(), Station::parse("Y").unwrap());
/// let z = Stop::new(ClockTime::parse_hhmm("10:00").unwrap(), Station::parse("Z").unwrap());
/// let service = Service::new(ServiceId::new(1), 100.0, vec![x.clone(), y.clone(), z.clone()]).unwrap();
///
/// assert_eq!(segment_price(&service, &x, &y).unwrap(), 50.0);
/// assert_eq!(segment_price(&service, &x, &z).unwrap(), 100.0);
/// ```
pub fn segment_price(service: &Service, board: &Stop, alight: &Stop) -> Result<f64, DomainError> {
    let board_idx = service
        .index_of(board)
        .ok_or(DomainError::InvalidSegment("boarding stop is not on the service"))?;

    let alight_idx = service.stops()[board_idx.0..]
        .iter()
        .position(|s| s == alight)
        .map(|offset| StopIndex(board_idx.0 + offset))
        .ok_or(DomainError::InvalidSegment(
            "alighting stop is not on the service after boarding",
        ))?;

    price_between(service, board_idx, alight_idx)
}

/// Price of travelling between two stop indices of a service.
///
/// # Errors
///
/// Returns `DomainError::InvalidSegment` if an index is out of bounds,
/// `alight` precedes `board`, or the service has zero running time.
pub fn price_between(
    service: &Service,
    board: StopIndex,
    alight: StopIndex,
) -> Result<f64, DomainError> {
    if alight < board {
        return Err(DomainError::InvalidSegment(
            "alighting stop precedes boarding stop",
        ));
    }

    let board_stop = service
        .stop(board)
        .ok_or(DomainError::InvalidSegment("boarding index out of bounds"))?;
    let alight_stop = service
        .stop(alight)
        .ok_or(DomainError::InvalidSegment("alighting index out of bounds"))?;

    let total = service.total_minutes();
    if total == 0 {
        return Err(DomainError::InvalidSegment("service has zero running time"));
    }

    let minutes = alight_stop.time().minutes_since(board_stop.time());
    Ok(service.price() * minutes as f64 / total as f64)
}
