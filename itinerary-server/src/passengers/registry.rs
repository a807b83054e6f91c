//! In-memory passenger registry.

use std::collections::BTreeMap;
use std::fmt;

use chrono::Duration;
use tracing::debug;

use crate::domain::Itinerary;

use super::{Category, PassengerError, PassengerStore};

/// How many of the latest itineraries count towards the fare category.
const RECENT_WINDOW: usize = 10;

/// Sequential passenger identifier, assigned at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PassengerId(u32);

impl PassengerId {
    /// Wrap a raw id.
    pub fn new(id: u32) -> Self {
        PassengerId(id)
    }

    /// Returns the raw id.
    pub fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for PassengerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A committed itinerary and what the passenger paid for it.
#[derive(Debug, Clone)]
pub struct Purchase {
    /// The itinerary as offered by search
    pub itinerary: Itinerary,
    /// Amount charged after the category discount
    pub paid: f64,
}

/// A passenger and their itinerary history.
#[derive(Debug, Clone)]
pub struct Passenger {
    id: PassengerId,
    name: String,
    category: Category,
    purchases: Vec<Purchase>,
    paid_total: f64,
    travel_time: Duration,
}

impl Passenger {
    fn new(id: PassengerId, name: String) -> Self {
        Self {
            id,
            name,
            category: Category::Normal,
            purchases: Vec::new(),
            paid_total: 0.0,
            travel_time: Duration::zero(),
        }
    }

    /// Returns the passenger id.
    pub fn id(&self) -> PassengerId {
        self.id
    }

    /// Returns the passenger name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the current fare category.
    pub fn category(&self) -> Category {
        self.category
    }

    /// Returns the number of committed itineraries.
    pub fn itinerary_count(&self) -> usize {
        self.purchases.len()
    }

    /// Returns purchases in commit order.
    pub fn purchases(&self) -> &[Purchase] {
        &self.purchases
    }

    /// Returns purchases ordered by travel date (commit order among equal dates).
    pub fn purchases_by_date(&self) -> Vec<&Purchase> {
        let mut purchases: Vec<&Purchase> = self.purchases.iter().collect();
        purchases.sort_by_key(|p| p.itinerary.date());
        purchases
    }

    /// Returns the total amount paid.
    pub fn paid_total(&self) -> f64 {
        self.paid_total
    }

    /// Returns the total time spent travelling.
    pub fn travel_time(&self) -> Duration {
        self.travel_time
    }

    /// Amount paid over the latest itineraries, which decides the category.
    pub fn recent_spend(&self) -> f64 {
        let skip = self.purchases.len().saturating_sub(RECENT_WINDOW);
        self.purchases.iter().skip(skip).map(|p| p.paid).sum()
    }

    fn record(&mut self, itinerary: Itinerary) {
        let paid = itinerary.price() * self.category.discount();
        self.paid_total += paid;
        self.travel_time = self.travel_time + itinerary.duration();
        self.purchases.push(Purchase { itinerary, paid });
        self.category = Category::for_recent_spend(self.recent_spend());
    }
}

/// All registered passengers, ordered by id.
#[derive(Debug, Default)]
pub struct Passengers {
    passengers: BTreeMap<PassengerId, Passenger>,
    next_id: u32,
}

impl Passengers {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a passenger under a unique name.
    pub fn register(&mut self, name: &str) -> Result<PassengerId, PassengerError> {
        let name = self.check_name(name)?;

        let id = PassengerId(self.next_id);
        self.next_id += 1;
        self.passengers.insert(id, Passenger::new(id, name));

        debug!(passenger = %id, "registered passenger");
        Ok(id)
    }

    /// Change a passenger's name, keeping names unique.
    pub fn rename(&mut self, id: PassengerId, name: &str) -> Result<(), PassengerError> {
        if !self.passengers.contains_key(&id) {
            return Err(PassengerError::NoSuchPassenger(id));
        }
        let name = self.check_name(name)?;

        if let Some(passenger) = self.passengers.get_mut(&id) {
            passenger.name = name;
        }
        Ok(())
    }

    /// Look up a passenger.
    pub fn get(&self, id: PassengerId) -> Result<&Passenger, PassengerError> {
        self.passengers
            .get(&id)
            .ok_or(PassengerError::NoSuchPassenger(id))
    }

    /// All passengers, ordered by id.
    pub fn iter(&self) -> impl Iterator<Item = &Passenger> {
        self.passengers.values()
    }

    /// Returns the number of passengers.
    pub fn len(&self) -> usize {
        self.passengers.len()
    }

    /// Returns true if no passenger is registered.
    pub fn is_empty(&self) -> bool {
        self.passengers.is_empty()
    }

    fn check_name(&self, name: &str) -> Result<String, PassengerError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PassengerError::InvalidName);
        }
        if self.passengers.values().any(|p| p.name == name) {
            return Err(PassengerError::NonUniqueName(name.to_string()));
        }
        Ok(name.to_string())
    }
}

impl PassengerStore for Passengers {
    fn exists(&self, id: PassengerId) -> bool {
        self.passengers.contains_key(&id)
    }

    fn record_itinerary(
        &mut self,
        id: PassengerId,
        itinerary: Itinerary,
    ) -> Result<(), PassengerError> {
        let passenger = self
            .passengers
            .get_mut(&id)
            .ok_or(PassengerError::NoSuchPassenger(id))?;

        passenger.record(itinerary);

        debug!(
            passenger = %id,
            category = %passenger.category,
            itineraries = passenger.purchases.len(),
            "recorded itinerary"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClockTime, Segment, Service, ServiceId, Station, StopIndex};
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn itinerary(price: f64, day: u32) -> Itinerary {
        let service = Service::builder(ServiceId::new(1), price)
            .stop(ClockTime::parse_hhmm("08:00").unwrap(), Station::parse("X").unwrap())
            .stop(ClockTime::parse_hhmm("09:30").unwrap(), Station::parse("Y").unwrap())
            .build()
            .unwrap();
        let segment = Segment::new(Arc::new(service), StopIndex(0), StopIndex(1)).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 3, day).unwrap();
        Itinerary::new(date, vec![segment]).unwrap()
    }

    #[test]
    fn register_assigns_sequential_ids() {
        let mut passengers = Passengers::new();
        let ana = passengers.register("Ana").unwrap();
        let rui = passengers.register("Rui").unwrap();

        assert_eq!(ana, PassengerId::new(0));
        assert_eq!(rui, PassengerId::new(1));
        assert_eq!(passengers.len(), 2);
        assert_eq!(passengers.get(rui).unwrap().name(), "Rui");
    }

    #[test]
    fn names_must_be_unique() {
        let mut passengers = Passengers::new();
        passengers.register("Ana").unwrap();

        assert_eq!(
            passengers.register(" Ana "),
            Err(PassengerError::NonUniqueName("Ana".into()))
        );
        assert_eq!(passengers.register("  "), Err(PassengerError::InvalidName));
    }

    #[test]
    fn rename_checks_uniqueness_and_existence() {
        let mut passengers = Passengers::new();
        let ana = passengers.register("Ana").unwrap();
        passengers.register("Rui").unwrap();

        assert_eq!(
            passengers.rename(ana, "Rui"),
            Err(PassengerError::NonUniqueName("Rui".into()))
        );
        assert_eq!(
            passengers.rename(PassengerId::new(9), "Eva"),
            Err(PassengerError::NoSuchPassenger(PassengerId::new(9)))
        );

        passengers.rename(ana, "Ana Maria").unwrap();
        assert_eq!(passengers.get(ana).unwrap().name(), "Ana Maria");
    }

    #[test]
    fn unknown_passenger() {
        let passengers = Passengers::new();
        assert!(!passengers.exists(PassengerId::new(0)));
        assert!(passengers.get(PassengerId::new(0)).is_err());
    }

    #[test]
    fn record_accumulates_totals() {
        let mut passengers = Passengers::new();
        let ana = passengers.register("Ana").unwrap();

        passengers.record_itinerary(ana, itinerary(100.0, 2)).unwrap();
        passengers.record_itinerary(ana, itinerary(50.0, 1)).unwrap();

        let passenger = passengers.get(ana).unwrap();
        assert_eq!(passenger.itinerary_count(), 2);
        assert_eq!(passenger.paid_total(), 150.0);
        assert_eq!(passenger.travel_time(), Duration::minutes(180));
        assert_eq!(passenger.category(), Category::Normal);

        let by_date: Vec<f64> = passenger
            .purchases_by_date()
            .iter()
            .map(|p| p.itinerary.price())
            .collect();
        assert_eq!(by_date, vec![50.0, 100.0]);
    }

    #[test]
    fn category_discount_applies_to_later_itineraries() {
        let mut passengers = Passengers::new();
        let ana = passengers.register("Ana").unwrap();

        // 300 paid at full fare: becomes frequent afterwards
        passengers.record_itinerary(ana, itinerary(300.0, 1)).unwrap();
        assert_eq!(passengers.get(ana).unwrap().category(), Category::Frequent);

        passengers.record_itinerary(ana, itinerary(100.0, 2)).unwrap();
        let passenger = passengers.get(ana).unwrap();
        assert!((passenger.purchases()[1].paid - 85.0).abs() < 1e-9);
        assert!((passenger.paid_total() - 385.0).abs() < 1e-9);
    }

    #[test]
    fn special_category_after_large_spend() {
        let mut passengers = Passengers::new();
        let ana = passengers.register("Ana").unwrap();

        passengers.record_itinerary(ana, itinerary(3000.0, 1)).unwrap();
        assert_eq!(passengers.get(ana).unwrap().category(), Category::Special);
    }

    #[test]
    fn only_recent_itineraries_count() {
        let mut passengers = Passengers::new();
        let ana = passengers.register("Ana").unwrap();

        passengers.record_itinerary(ana, itinerary(300.0, 1)).unwrap();
        for day in 2..12 {
            passengers.record_itinerary(ana, itinerary(1.0, day)).unwrap();
        }

        let passenger = passengers.get(ana).unwrap();
        assert_eq!(passenger.itinerary_count(), 11);
        // The 300 has dropped out of the window of ten
        assert!(passenger.recent_spend() < 10.0);
        assert_eq!(passenger.category(), Category::Normal);
    }

    #[test]
    fn record_for_unknown_passenger_fails() {
        let mut passengers = Passengers::new();
        let result = passengers.record_itinerary(PassengerId::new(3), itinerary(10.0, 1));
        assert_eq!(result, Err(PassengerError::NoSuchPassenger(PassengerId::new(3))));
    }
}
