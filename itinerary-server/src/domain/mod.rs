//! Domain types for the itinerary planner.
//!
//! This module contains the core domain model types that represent
//! validated timetable data. All types enforce their invariants at
//! construction time, so code that receives these types can trust their
//! validity.

mod error;
mod itinerary;
mod pricing;
mod segment;
mod service;
mod service_id;
mod station;
mod stop;
mod time;

pub use error::DomainError;
pub use itinerary::{Itinerary, ItineraryKey};
pub use pricing::{price_between, segment_price};
pub use segment::Segment;
pub use service::{Service, ServiceBuilder};
pub use service_id::{InvalidServiceId, ServiceId};
pub use station::{InvalidStation, Station};
pub use stop::{Stop, StopIndex};
pub use time::{ClockTime, TimeError, parse_date};
