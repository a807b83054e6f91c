//! Station name type.

use std::fmt;

/// Error returned when parsing an invalid station name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station name: {reason}")]
pub struct InvalidStation {
    reason: &'static str,
}

/// A station name as it appears in the service catalog.
///
/// Station names are free text, compared exactly. Surrounding whitespace is
/// trimmed, and the name may not be empty or contain the `|` record
/// separator used by the import format.
///
/// # Examples
///
/// ```
/// use itinerary_server::domain::Station;
///
/// let lisbon = Station::parse("Lisboa").unwrap();
/// assert_eq!(lisbon.as_str(), "Lisboa");
///
/// // Surrounding whitespace is dropped
/// assert_eq!(Station::parse("  Porto ").unwrap().as_str(), "Porto");
///
/// // Empty names are rejected
/// assert!(Station::parse("").is_err());
/// assert!(Station::parse("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Station(String);

impl Station {
    /// Parse a station name from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidStation> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(InvalidStation {
                reason: "must not be empty",
            });
        }

        if trimmed.contains('|') {
            return Err(InvalidStation {
                reason: "must not contain '|'",
            });
        }

        Ok(Station(trimmed.to_string()))
    }

    /// Returns the station name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Station({})", self.0)
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
