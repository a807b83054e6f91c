//! Passenger records.
//!
//! Passengers own their committed itinerary history. Search only needs to
//! know whether a passenger exists and how to hand over a chosen itinerary,
//! which is what the `PassengerStore` trait captures; `Passengers` is the
//! in-memory registry behind it.

mod category;
mod error;
mod registry;

pub use category::Category;
pub use error::PassengerError;
pub use registry::{Passenger, PassengerId, Passengers, Purchase};

use crate::domain::Itinerary;

/// What the itinerary planner needs from the passenger records.
///
/// This abstraction allows the planner to be tested without a registry.
pub trait PassengerStore {
    /// Does a passenger with this id exist?
    fn exists(&self, id: PassengerId) -> bool;

    /// Append a committed itinerary to the passenger's history.
    ///
    /// The itinerary's price is passed through unmodified; any discount is
    /// the store's business.
    fn record_itinerary(
        &mut self,
        id: PassengerId,
        itinerary: Itinerary,
    ) -> Result<(), PassengerError>;
}
