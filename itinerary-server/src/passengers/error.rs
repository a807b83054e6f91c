//! Passenger registry error types.

use super::PassengerId;

/// Errors from the passenger registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PassengerError {
    /// No passenger with this id
    #[error("no such passenger: {0}")]
    NoSuchPassenger(PassengerId),

    /// Another passenger already has this name
    #[error("passenger name already in use: {0}")]
    NonUniqueName(String),

    /// Name is blank
    #[error("passenger name must not be empty")]
    InvalidName,
}
