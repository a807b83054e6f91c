//! Service identifier type.

use std::fmt;
use std::str::FromStr;

/// Error returned when parsing an invalid service id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid service id: {reason}")]
pub struct InvalidServiceId {
    reason: &'static str,
}

/// Numeric identifier of a scheduled service in the catalog.
///
/// # Examples
///
/// ```
/// use itinerary_server::domain::ServiceId;
///
/// let id: ServiceId = "1234".parse().unwrap();
/// assert_eq!(id.get(), 1234);
/// assert_eq!(id.to_string(), "1234");
///
/// assert!("".parse::<ServiceId>().is_err());
/// assert!("-1".parse::<ServiceId>().is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ServiceId(u32);

impl ServiceId {
    /// Create a service id from its numeric value.
    pub fn new(id: u32) -> Self {
        ServiceId(id)
    }

    /// Returns the numeric value.
    pub fn get(&self) -> u32 {
        self.0
    }
}

impl FromStr for ServiceId {
    type Err = InvalidServiceId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(InvalidServiceId {
                reason: "service id cannot be empty",
            });
        }
        s.parse::<u32>().map(ServiceId).map_err(|_| InvalidServiceId {
            reason: "must be a non-negative integer",
        })
    }
}

impl fmt::Debug for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ServiceId({})", self.0)
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
