//! Import error types.

use std::path::PathBuf;

use crate::domain::DomainError;
use crate::passengers::PassengerError;

/// Errors that can occur while importing a catalog file.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// The file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A record is malformed
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    /// A record describes an invalid service or itinerary
    #[error("line {line}: {source}")]
    Domain { line: usize, source: DomainError },

    /// The passenger registry rejected a record
    #[error("line {line}: {source}")]
    Passenger { line: usize, source: PassengerError },
}

impl ImportError {
    /// Line the error was found on, if it came from a record.
    pub fn line(&self) -> Option<usize> {
        match self {
            ImportError::Io { .. } => None,
            ImportError::Parse { line, .. }
            | ImportError::Domain { line, .. }
            | ImportError::Passenger { line, .. } => Some(*line),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ServiceId;

    #[test]
    fn error_display() {
        let err = ImportError::Parse {
            line: 3,
            message: "unknown record kind: TRAM".to_string(),
        };
        assert_eq!(err.to_string(), "line 3: unknown record kind: TRAM");
        assert_eq!(err.line(), Some(3));

        let err = ImportError::Domain {
            line: 7,
            source: DomainError::DuplicateService(ServiceId::new(12)),
        };
        assert!(err.to_string().starts_with("line 7: "));
    }
}
