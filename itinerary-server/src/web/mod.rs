//! Web layer for the itinerary planner.
//!
//! Provides a JSON API over the catalog, the passenger registry and the
//! propose/commit itinerary search.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
