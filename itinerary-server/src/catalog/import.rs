//! Parser for the pipe-delimited import format.
//!
//! ```text
//! SERVICE|<id>|<price>|<HH:MM>|<station>|<HH:MM>|<station>...
//! PASSENGER|<name>
//! ITINERARY|<passenger id>|<YYYY-MM-DD>|<service>/<from>/<to>|...
//! ```
//!
//! Records are applied in file order, so an itinerary may only refer to
//! passengers and services that appear above it.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::{
    ClockTime, DomainError, Itinerary, Segment, Service, ServiceId, Station, StopIndex,
    parse_date,
};
use crate::passengers::{PassengerId, PassengerStore, Passengers};
use crate::planner::Network;

use super::error::ImportError;

/// Everything loaded from an import file.
#[derive(Debug)]
pub struct Catalog {
    /// The finished service network.
    pub network: Network,
    /// Registered passengers with their imported history.
    pub passengers: Passengers,
}

/// Builds a catalog record by record.
#[derive(Debug, Default)]
struct Importer {
    services: BTreeMap<ServiceId, Arc<Service>>,
    passengers: Passengers,
    itineraries: usize,
}

/// Parse a whole import file.
///
/// # Errors
///
/// Returns the first malformed or invalid record, with its 1-based line
/// number.
///
/// # Examples
///
/// ```
/// use itinerary_server::catalog::parse;
///
/// let catalog = parse("SERVICE|1|100|08:00|X|10:00|Z\nPASSENGER|Ana\n").unwrap();
/// assert_eq!(catalog.network.len(), 1);
/// assert_eq!(catalog.passengers.len(), 1);
/// ```
pub fn parse(text: &str) -> Result<Catalog, ImportError> {
    let mut importer = Importer::default();

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let record = raw.trim();
        if record.is_empty() {
            continue;
        }

        let fields: Vec<&str> = record.split('|').map(str::trim).collect();
        match fields[0] {
            "SERVICE" => importer.service(line, &fields[1..])?,
            "PASSENGER" => importer.passenger(line, &fields[1..])?,
            "ITINERARY" => importer.itinerary(line, &fields[1..])?,
            other => {
                return Err(parse_error(line, format!("unknown record kind: {other}")));
            }
        }
    }

    importer.finish()
}

fn parse_error(line: usize, message: impl Into<String>) -> ImportError {
    ImportError::Parse {
        line,
        message: message.into(),
    }
}

impl Importer {
    fn service(&mut self, line: usize, fields: &[&str]) -> Result<(), ImportError> {
        let [id, price, stops @ ..] = fields else {
            return Err(parse_error(line, "service needs an id and a price"));
        };

        let id: ServiceId = id.parse().map_err(|e| parse_error(line, format!("{e}")))?;
        let price: f64 = price
            .parse()
            .map_err(|_| parse_error(line, format!("invalid price: {price}")))?;

        if stops.is_empty() || stops.len() % 2 != 0 {
            return Err(parse_error(line, "stops must be <HH:MM>|<station> pairs"));
        }

        let mut builder = Service::builder(id, price);
        for pair in stops.chunks_exact(2) {
            let time = ClockTime::parse_hhmm(pair[0]).map_err(|e| parse_error(line, e.to_string()))?;
            let station = Station::parse(pair[1]).map_err(|e| parse_error(line, e.to_string()))?;
            builder = builder.stop(time, station);
        }

        let service = builder
            .build()
            .map_err(|source| ImportError::Domain { line, source })?;

        if self.services.contains_key(&id) {
            return Err(ImportError::Domain {
                line,
                source: DomainError::DuplicateService(id),
            });
        }

        debug!(service = %id, stops = service.len(), "imported service");
        self.services.insert(id, Arc::new(service));
        Ok(())
    }

    fn passenger(&mut self, line: usize, fields: &[&str]) -> Result<(), ImportError> {
        let [name] = fields else {
            return Err(parse_error(line, "passenger record takes exactly one name"));
        };

        self.passengers
            .register(name)
            .map_err(|source| ImportError::Passenger { line, source })?;
        Ok(())
    }

    fn itinerary(&mut self, line: usize, fields: &[&str]) -> Result<(), ImportError> {
        let [passenger, date, legs @ ..] = fields else {
            return Err(parse_error(line, "itinerary needs a passenger and a date"));
        };
        if legs.is_empty() {
            return Err(parse_error(line, "itinerary needs at least one segment"));
        }

        let passenger = passenger
            .parse::<u32>()
            .map(PassengerId::new)
            .map_err(|_| parse_error(line, format!("invalid passenger id: {passenger}")))?;
        let date = parse_date(date).map_err(|e| parse_error(line, e.to_string()))?;

        let segments = legs
            .iter()
            .map(|leg| self.segment(line, leg))
            .collect::<Result<Vec<_>, _>>()?;

        let itinerary =
            Itinerary::new(date, segments).map_err(|source| ImportError::Domain { line, source })?;

        self.passengers
            .record_itinerary(passenger, itinerary)
            .map_err(|source| ImportError::Passenger { line, source })?;
        self.itineraries += 1;
        Ok(())
    }

    /// Resolve `<service>/<from>/<to>` against the services seen so far.
    fn segment(&self, line: usize, leg: &str) -> Result<Segment, ImportError> {
        let parts: Vec<&str> = leg.split('/').map(str::trim).collect();
        let [service, from, to] = parts.as_slice() else {
            return Err(parse_error(line, format!("segment must be <service>/<from>/<to>: {leg}")));
        };

        let id: ServiceId = service.parse().map_err(|e| parse_error(line, format!("{e}")))?;
        let service = self
            .services
            .get(&id)
            .ok_or_else(|| parse_error(line, format!("no such service: {id}")))?;

        let from = Station::parse(from).map_err(|e| parse_error(line, e.to_string()))?;
        let to = Station::parse(to).map_err(|e| parse_error(line, e.to_string()))?;

        let (board, _) = service
            .find_stop(&from, StopIndex(0))
            .ok_or_else(|| parse_error(line, format!("service {id} does not call at {from}")))?;
        let (alight, _) = service
            .find_stop(&to, board.next())
            .ok_or_else(|| parse_error(line, format!("service {id} does not reach {to} after {from}")))?;

        Segment::new(service.clone(), board, alight)
            .map_err(|source| ImportError::Domain { line, source })
    }

    fn finish(self) -> Result<Catalog, ImportError> {
        let services = self.services.len();
        let network = Network::new(self.services.into_values())
            .map_err(|source| ImportError::Domain { line: 0, source })?;

        info!(
            services,
            passengers = self.passengers.len(),
            itineraries = self.itineraries,
            "catalog imported"
        );

        Ok(Catalog {
            network,
            passengers: self.passengers,
        })
    }
}
