//! Itinerary ranking for search results.
//!
//! Orders candidates so the earliest departures come first.

use std::cmp::Ordering;

use crate::domain::Itinerary;

/// Compare two itineraries by preference.
///
/// Itineraries are ranked by:
/// 1. Departure time (earlier is better)
/// 2. Arrival time (earlier is better)
/// 3. Price (cheaper is better)
pub fn compare_itineraries(a: &Itinerary, b: &Itinerary) -> Ordering {
    a.departure_time()
        .cmp(&b.departure_time())
        .then_with(|| a.arrival_time().cmp(&b.arrival_time()))
        .then_with(|| a.price().total_cmp(&b.price()))
}

/// Rank itineraries by preference, best first.
///
/// The sort is stable: itineraries that tie on every key keep the order
/// in which they were found.
pub fn rank_itineraries(mut itineraries: Vec<Itinerary>) -> Vec<Itinerary> {
    itineraries.sort_by(compare_itineraries);
    itineraries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClockTime, Segment, Service, ServiceId, Station, StopIndex};
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn time(s: &str) -> ClockTime {
        ClockTime::parse_hhmm(s).unwrap()
    }

    fn itinerary(id: u32, price: f64, depart: &str, arrive: &str) -> Itinerary {
        let service = Service::builder(ServiceId::new(id), price)
            .stop(time(depart), Station::parse("X").unwrap())
            .stop(time(arrive), Station::parse("Z").unwrap())
            .build()
            .unwrap();
        let segment = Segment::new(Arc::new(service), StopIndex(0), StopIndex(1)).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        Itinerary::new(date, vec![segment]).unwrap()
    }

    fn ids(itineraries: &[Itinerary]) -> Vec<u32> {
        itineraries
            .iter()
            .flat_map(|i| i.service_ids())
            .map(|id| id.get())
            .collect()
    }

    #[test]
    fn departure_time_first() {
        let ranked = rank_itineraries(vec![
            itinerary(1, 10.0, "09:00", "09:30"),
            itinerary(2, 90.0, "08:00", "11:00"),
        ]);
        assert_eq!(ids(&ranked), vec![2, 1]);
    }

    #[test]
    fn arrival_breaks_departure_ties() {
        let ranked = rank_itineraries(vec![
            itinerary(1, 10.0, "08:00", "10:00"),
            itinerary(2, 90.0, "08:00", "09:00"),
        ]);
        assert_eq!(ids(&ranked), vec![2, 1]);
    }

    #[test]
    fn price_breaks_remaining_ties() {
        let ranked = rank_itineraries(vec![
            itinerary(1, 30.0, "08:00", "09:00"),
            itinerary(2, 20.0, "08:00", "09:00"),
        ]);
        assert_eq!(ids(&ranked), vec![2, 1]);
    }

    #[test]
    fn exact_ties_keep_discovery_order() {
        let ranked = rank_itineraries(vec![
            itinerary(3, 20.0, "08:00", "09:00"),
            itinerary(1, 20.0, "08:00", "09:00"),
            itinerary(2, 20.0, "08:00", "09:00"),
        ]);
        assert_eq!(ids(&ranked), vec![3, 1, 2]);
    }

    #[test]
    fn empty_list() {
        assert!(rank_itineraries(Vec::new()).is_empty());
    }
}
