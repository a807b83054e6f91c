//! Unit tests for route exploration.

use super::*;
use crate::domain::ClockTime;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
}

fn time(s: &str) -> ClockTime {
    ClockTime::parse_hhmm(s).unwrap()
}

fn station(s: &str) -> Station {
    Station::parse(s).unwrap()
}

fn make_service(id: u32, price: f64, stops: &[(&str, &str)]) -> Service {
    stops
        .iter()
        .fold(Service::builder(ServiceId::new(id), price), |b, (t, s)| {
            b.stop(time(t), station(s))
        })
        .build()
        .unwrap()
}

fn request(origin: &str, destination: &str, after: &str) -> SearchRequest {
    SearchRequest::new(
        PassengerId::new(0),
        station(origin),
        station(destination),
        date(),
        time(after),
    )
}

fn explore(services: Vec<Service>, request: &SearchRequest) -> Result<SearchResult, SearchError> {
    explore_with(services, &SearchConfig::default(), request)
}

fn explore_with(
    services: Vec<Service>,
    config: &SearchConfig,
    request: &SearchRequest,
) -> Result<SearchResult, SearchError> {
    let network = Network::new(services).unwrap();
    Planner::new(&network, config).explore(request)
}

fn service_chain(itinerary: &Itinerary) -> Vec<u32> {
    itinerary.service_ids().map(|id| id.get()).collect()
}

fn service_a() -> Service {
    make_service(1, 100.0, &[("08:00", "X"), ("09:00", "Y"), ("10:00", "Z")])
}

#[test]
fn direct_itinerary_found() {
    let result = explore(vec![service_a()], &request("X", "Z", "07:00")).unwrap();

    assert_eq!(result.itineraries.len(), 1);
    let itinerary = &result.itineraries[0];
    assert_eq!(service_chain(itinerary), vec![1]);
    assert_eq!(itinerary.price(), 100.0);
    assert_eq!(itinerary.departure_time(), time("08:00"));
    assert_eq!(itinerary.arrival_time(), time("10:00"));
    assert_eq!(itinerary.date(), date());
}

#[test]
fn departure_must_be_strictly_after_requested_time() {
    let result = explore(vec![service_a()], &request("X", "Z", "08:00")).unwrap();
    assert!(result.itineraries.is_empty());
}

#[test]
fn boarding_mid_service() {
    let result = explore(vec![service_a()], &request("Y", "Z", "07:00")).unwrap();

    assert_eq!(result.itineraries.len(), 1);
    let itinerary = &result.itineraries[0];
    assert_eq!(itinerary.price(), 50.0);
    assert_eq!(itinerary.departure_time(), time("09:00"));
}

#[test]
fn one_change_itinerary_found() {
    let services = vec![
        make_service(1, 60.0, &[("08:00", "X"), ("09:00", "Y")]),
        make_service(2, 40.0, &[("09:30", "Y"), ("10:00", "Z")]),
    ];

    let result = explore(services, &request("X", "Z", "07:00")).unwrap();

    assert_eq!(result.itineraries.len(), 1);
    let itinerary = &result.itineraries[0];
    assert_eq!(service_chain(itinerary), vec![1, 2]);
    assert_eq!(itinerary.price(), 100.0);
    // 60 minutes on 1, 30 waiting at Y, 30 on 2
    assert_eq!(itinerary.duration().num_minutes(), 120);
}

#[test]
fn change_needs_a_later_departure() {
    let services = vec![
        make_service(1, 60.0, &[("08:00", "X"), ("09:00", "Y")]),
        make_service(2, 40.0, &[("09:00", "Y"), ("10:00", "Z")]),
    ];

    let result = explore(services, &request("X", "Z", "07:00")).unwrap();
    assert!(result.itineraries.is_empty());
}

#[test]
fn change_at_an_intermediate_stop() {
    let services = vec![
        make_service(1, 90.0, &[("08:00", "X"), ("08:30", "Y"), ("09:00", "W")]),
        make_service(2, 40.0, &[("08:45", "Y"), ("09:15", "Z")]),
    ];

    let result = explore(services, &request("X", "Z", "07:00")).unwrap();

    assert_eq!(result.itineraries.len(), 1);
    let segments = result.itineraries[0].segments();
    assert_eq!(segments[0].alight_station(), &station("Y"));
    assert_eq!(segments[0].price(), 45.0);
    assert_eq!(segments[1].board_station(), &station("Y"));
}

#[test]
fn several_routes_are_all_found() {
    let services = vec![
        service_a(),
        make_service(2, 30.0, &[("08:10", "X"), ("08:40", "Q")]),
        make_service(3, 30.0, &[("08:50", "Q"), ("09:20", "Z")]),
        make_service(4, 20.0, &[("09:10", "Y"), ("09:50", "Z")]),
    ];

    let result = explore(services, &request("X", "Z", "07:00")).unwrap();

    let mut chains: Vec<Vec<u32>> = result.itineraries.iter().map(service_chain).collect();
    chains.sort();
    // Service 1 reaches Z itself, so it is never left at Y for service 4
    assert_eq!(chains, vec![vec![1], vec![2, 3]]);
}

#[test]
fn boarding_always_precedes_alighting() {
    let services = vec![
        service_a(),
        make_service(2, 30.0, &[("08:10", "X"), ("08:40", "Q"), ("09:05", "Y")]),
        make_service(3, 30.0, &[("08:50", "Q"), ("09:20", "Z")]),
        make_service(4, 20.0, &[("09:10", "Y"), ("09:50", "Z")]),
        make_service(5, 20.0, &[("08:55", "Q"), ("09:07", "Y"), ("09:30", "Q")]),
    ];

    let result = explore(services, &request("X", "Z", "07:00")).unwrap();

    assert!(!result.itineraries.is_empty());
    for itinerary in &result.itineraries {
        for segment in itinerary.segments() {
            assert!(segment.board_idx() < segment.alight_idx());
        }
        assert_eq!(itinerary.origin(), &station("X"));
        assert_eq!(itinerary.destination(), &station("Z"));
    }
}

#[test]
fn itineraries_are_distinct() {
    let services = vec![
        make_service(1, 10.0, &[("08:00", "X"), ("08:10", "Y"), ("08:20", "Q")]),
        make_service(2, 10.0, &[("08:15", "Y"), ("08:25", "Q"), ("08:40", "Y")]),
        make_service(3, 10.0, &[("08:30", "Q"), ("08:45", "Y"), ("09:00", "Z")]),
    ];

    let result = explore(services, &request("X", "Z", "07:00")).unwrap();

    let keys: HashSet<ItineraryKey> = result.itineraries.iter().map(Itinerary::key).collect();
    assert_eq!(keys.len(), result.itineraries.len());
    assert!(!result.itineraries.is_empty());
}

#[test]
fn max_legs_limits_changes() {
    let services = vec![
        make_service(1, 10.0, &[("08:00", "X"), ("08:30", "Y")]),
        make_service(2, 10.0, &[("08:40", "Y"), ("09:00", "W")]),
        make_service(3, 10.0, &[("09:10", "W"), ("09:30", "Z")]),
    ];

    let unlimited = explore(services.clone(), &request("X", "Z", "07:00")).unwrap();
    assert_eq!(unlimited.itineraries.len(), 1);
    assert_eq!(service_chain(&unlimited.itineraries[0]), vec![1, 2, 3]);

    let config = SearchConfig {
        max_legs: 2,
        ..SearchConfig::default()
    };
    let limited = explore_with(services, &config, &request("X", "Z", "07:00")).unwrap();
    assert!(limited.itineraries.is_empty());
}

#[test]
fn max_hops_limits_branch_length() {
    let services = vec![make_service(
        1,
        10.0,
        &[("08:00", "X"), ("08:10", "A"), ("08:20", "B"), ("08:30", "C"), ("08:40", "D")],
    )];

    let config = SearchConfig {
        max_hops: 1,
        ..SearchConfig::default()
    };

    // Direct hits do not count against the hop limit
    let direct = explore_with(services.clone(), &config, &request("X", "D", "07:00")).unwrap();
    assert_eq!(direct.itineraries.len(), 1);

    // Reaching D via a change would need more stops than allowed
    let more = vec![
        services[0].clone(),
        make_service(2, 10.0, &[("08:45", "D"), ("09:00", "Z")]),
    ];
    let limited = explore_with(more, &config, &request("X", "Z", "07:00")).unwrap();
    assert!(limited.itineraries.is_empty());
}

#[test]
fn cyclic_network_terminates() {
    let services = vec![
        // Returns to Y at the same time, which is not progress
        make_service(
            1,
            10.0,
            &[("08:00", "X"), ("08:00", "Y"), ("08:00", "X"), ("08:00", "Y"), ("08:30", "W")],
        ),
        make_service(2, 10.0, &[("08:30", "Y"), ("08:40", "X")]),
        make_service(3, 10.0, &[("08:50", "X"), ("09:00", "Y")]),
        make_service(4, 10.0, &[("05:00", "Z"), ("06:00", "V")]),
    ];

    // Z exists but nothing reaches it
    let result = explore(services, &request("X", "Z", "07:00")).unwrap();
    assert!(result.itineraries.is_empty());
    assert!(result.states_explored < SearchConfig::default().max_states);
}

#[test]
fn repeated_station_without_progress_ends_branch() {
    let services = vec![
        make_service(
            1,
            10.0,
            &[("08:00", "X"), ("08:00", "Y"), ("08:00", "X"), ("08:00", "Y"), ("08:30", "V")],
        ),
        make_service(2, 10.0, &[("08:40", "V"), ("09:00", "W")]),
    ];

    // Changing at V means riding through Y twice at 08:00
    let result = explore(services, &request("X", "W", "07:00")).unwrap();
    assert!(result.itineraries.is_empty());
}

#[test]
fn state_limit_truncates_search() {
    let services = vec![service_a()];
    let config = SearchConfig {
        max_states: 0,
        ..SearchConfig::default()
    };

    let result = explore_with(services.clone(), &config, &request("X", "Z", "07:00")).unwrap();
    assert!(result.itineraries.is_empty());
    assert!(result.truncated);

    let full = explore(services, &request("X", "Z", "07:00")).unwrap();
    assert_eq!(full.itineraries.len(), 1);
    assert!(!full.truncated);
}

#[test]
fn round_trips_are_not_itineraries() {
    let services = vec![
        make_service(1, 40.0, &[("08:00", "X"), ("08:30", "Y"), ("09:00", "X")]),
        make_service(2, 60.0, &[("08:10", "X"), ("08:40", "Q")]),
        make_service(3, 60.0, &[("08:50", "Q"), ("09:30", "X")]),
    ];

    let result = explore(services.clone(), &request("X", "X", "07:00")).unwrap();
    assert!(result.itineraries.is_empty());
    assert!(!result.truncated);

    // The same network still serves real journeys
    let onward = explore(services, &request("X", "Q", "07:00")).unwrap();
    assert_eq!(onward.itineraries.len(), 1);
}

#[test]
fn zero_running_time_services_are_skipped() {
    let services = vec![
        make_service(1, 10.0, &[("08:00", "X"), ("08:00", "Z")]),
        make_service(2, 10.0, &[("08:00", "X"), ("08:20", "Z")]),
    ];

    let result = explore(services, &request("X", "Z", "07:00")).unwrap();
    assert_eq!(result.itineraries.len(), 1);
    assert_eq!(service_chain(&result.itineraries[0]), vec![2]);
}

#[test]
fn unknown_origin_or_destination() {
    let origin = explore(vec![service_a()], &request("Nowhere", "Z", "07:00"));
    assert_eq!(origin.unwrap_err(), SearchError::NoSuchStation("Nowhere".into()));

    let destination = explore(vec![service_a()], &request("X", "Nowhere", "07:00"));
    assert_eq!(
        destination.unwrap_err(),
        SearchError::NoSuchStation("Nowhere".into())
    );
}

#[test]
fn passenger_error_conversion() {
    let missing: SearchError = PassengerError::NoSuchPassenger(PassengerId::new(4)).into();
    assert_eq!(missing, SearchError::NoSuchPassenger(PassengerId::new(4)));

    let other: SearchError = PassengerError::InvalidName.into();
    assert_eq!(other, SearchError::Passenger(PassengerError::InvalidName));
}
