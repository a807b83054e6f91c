//! Network index over the service catalog.
//!
//! Built once from the loaded services and read-only afterwards. Each
//! station maps to the services calling there, so the explorer can find
//! onward services without scanning the whole catalog.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::domain::{ClockTime, DomainError, Service, ServiceId, Station};

use super::search::SearchError;

/// Read-only structural queries over a set of services.
#[derive(Debug, Default)]
pub struct Network {
    /// All services, keyed by id.
    services: BTreeMap<ServiceId, Arc<Service>>,

    /// Map from station -> ids of services calling there, ascending.
    calling_at: HashMap<Station, Vec<ServiceId>>,
}

impl Network {
    /// Build the index from a finished catalog.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DuplicateService` if two services share an id.
    pub fn new<S>(services: impl IntoIterator<Item = S>) -> Result<Self, DomainError>
    where
        S: Into<Arc<Service>>,
    {
        let mut by_id = BTreeMap::new();
        for service in services {
            let service: Arc<Service> = service.into();
            let id = service.id();
            if by_id.insert(id, service).is_some() {
                return Err(DomainError::DuplicateService(id));
            }
        }

        let mut calling_at: HashMap<Station, Vec<ServiceId>> = HashMap::new();
        for (id, service) in &by_id {
            for stop in service.stops() {
                let ids = calling_at.entry(stop.station().clone()).or_default();
                // Ids arrive in ascending order, so a repeat call is always last
                if ids.last() != Some(id) {
                    ids.push(*id);
                }
            }
        }

        Ok(Self {
            services: by_id,
            calling_at,
        })
    }

    /// Number of services.
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// True if the catalog holds no services.
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// All services, ordered by id.
    pub fn services(&self) -> impl Iterator<Item = &Arc<Service>> {
        self.services.values()
    }

    /// Look up a service by id.
    pub fn service(&self, id: ServiceId) -> Result<&Arc<Service>, SearchError> {
        self.services.get(&id).ok_or(SearchError::NoSuchService(id))
    }

    /// Does any service call at the station?
    pub fn contains_station(&self, station: &Station) -> bool {
        self.calling_at.contains_key(station)
    }

    /// Fail with `NoSuchStation` unless some service calls at the station.
    pub fn require_station(&self, station: &Station) -> Result<(), SearchError> {
        if self.contains_station(station) {
            Ok(())
        } else {
            Err(SearchError::NoSuchStation(station.as_str().to_string()))
        }
    }

    /// Services that can be boarded at `station` strictly after `time`.
    ///
    /// A service qualifies if it calls at the station somewhere other than
    /// its last stop with a departure later than `time`, and does not
    /// terminate at the station. Results are ordered by service id.
    pub fn services_departing_after(
        &self,
        station: &Station,
        time: ClockTime,
    ) -> Result<Vec<Arc<Service>>, SearchError> {
        let departing = self
            .calling(station)?
            .filter(|service| !service.ends_at(station))
            .filter(|service| {
                let onward = &service.stops()[..service.len() - 1];
                onward
                    .iter()
                    .any(|stop| stop.station() == station && stop.time() > time)
            })
            .cloned()
            .collect();

        Ok(departing)
    }

    /// Station following the first call at `station` on a service.
    pub fn next_station<'s>(&self, service: &'s Service, station: &Station) -> Option<&'s Station> {
        service.next_station(station)
    }

    /// Departure time at the first call at `station` on a service.
    pub fn stop_time(&self, service: &Service, station: &Station) -> Option<ClockTime> {
        service.time_at(station)
    }

    /// Services whose first stop is `station`, ordered by departure time.
    pub fn services_starting_at(&self, station: &Station) -> Result<Vec<Arc<Service>>, SearchError> {
        let mut starting: Vec<Arc<Service>> = self
            .calling(station)?
            .filter(|service| service.starts_at(station))
            .cloned()
            .collect();
        starting.sort_by_key(|service| service.departure_time());
        Ok(starting)
    }

    /// Services whose last stop is `station`, ordered by arrival time.
    pub fn services_ending_at(&self, station: &Station) -> Result<Vec<Arc<Service>>, SearchError> {
        let mut ending: Vec<Arc<Service>> = self
            .calling(station)?
            .filter(|service| service.ends_at(station))
            .cloned()
            .collect();
        ending.sort_by_key(|service| service.arrival_time());
        Ok(ending)
    }

    fn calling(
        &self,
        station: &Station,
    ) -> Result<impl Iterator<Item = &Arc<Service>>, SearchError> {
        let ids = self
            .calling_at
            .get(station)
            .ok_or_else(|| SearchError::NoSuchStation(station.as_str().to_string()))?;

        Ok(ids.iter().filter_map(|id| self.services.get(id)))
    }
}
