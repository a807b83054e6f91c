//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::domain::{ClockTime, ServiceId, Station, parse_date};
use crate::passengers::{PassengerError, PassengerId};
use crate::planner::{Planner, SearchError, SearchRequest};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/services", get(list_services))
        .route("/services/:id", get(get_service))
        .route("/stations/:station/departures", get(station_departures))
        .route("/stations/:station/arrivals", get(station_arrivals))
        .route("/passengers", get(list_passengers).post(create_passenger))
        .route("/passengers/:id", get(get_passenger))
        .route("/passengers/:id/itineraries", get(passenger_itineraries))
        .route("/itineraries/search", post(search_itineraries))
        .route("/itineraries/commit", post(commit_itinerary))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// All services, ordered by id.
async fn list_services(State(state): State<AppState>) -> Json<Vec<ServiceResult>> {
    let services = state
        .network
        .services()
        .map(|s| ServiceResult::from_service(s))
        .collect();
    Json(services)
}

/// One service by id.
async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<ServiceResult>, AppError> {
    let service = state.network.service(ServiceId::new(id))?;
    Ok(Json(ServiceResult::from_service(service)))
}

/// Services starting at a station, by departure time.
async fn station_departures(
    State(state): State<AppState>,
    Path(station): Path<String>,
) -> Result<Json<Vec<ServiceResult>>, AppError> {
    let station = parse_station(&station)?;
    let services = state.network.services_starting_at(&station)?;
    Ok(Json(
        services.iter().map(|s| ServiceResult::from_service(s)).collect(),
    ))
}

/// Services ending at a station, by arrival time.
async fn station_arrivals(
    State(state): State<AppState>,
    Path(station): Path<String>,
) -> Result<Json<Vec<ServiceResult>>, AppError> {
    let station = parse_station(&station)?;
    let services = state.network.services_ending_at(&station)?;
    Ok(Json(
        services.iter().map(|s| ServiceResult::from_service(s)).collect(),
    ))
}

/// Register a passenger.
async fn create_passenger(
    State(state): State<AppState>,
    Json(req): Json<CreatePassengerRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut passengers = state.passengers.write().await;
    let id = passengers.register(&req.name)?;
    let passenger = passengers.get(id)?;

    info!(passenger = %id, "passenger registered");
    Ok((
        StatusCode::CREATED,
        Json(PassengerResult::from_passenger(passenger)),
    ))
}

/// All passengers, ordered by id.
async fn list_passengers(State(state): State<AppState>) -> Json<Vec<PassengerResult>> {
    let passengers = state.passengers.read().await;
    Json(passengers.iter().map(PassengerResult::from_passenger).collect())
}

/// One passenger by id.
async fn get_passenger(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<PassengerResult>, AppError> {
    let passengers = state.passengers.read().await;
    let passenger = passengers.get(PassengerId::new(id))?;
    Ok(Json(PassengerResult::from_passenger(passenger)))
}

/// A passenger's committed itineraries, by travel date.
async fn passenger_itineraries(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<Vec<PurchaseResult>>, AppError> {
    let passengers = state.passengers.read().await;
    let passenger = passengers.get(PassengerId::new(id))?;
    Ok(Json(
        passenger
            .purchases_by_date()
            .into_iter()
            .map(PurchaseResult::from_purchase)
            .collect(),
    ))
}

/// Search itineraries and hold the ranked candidates for commit.
async fn search_itineraries(
    State(state): State<AppState>,
    Json(req): Json<SearchItinerariesRequest>,
) -> Result<Json<SearchItinerariesResponse>, AppError> {
    let origin = parse_station(&req.origin)?;
    let destination = parse_station(&req.destination)?;
    let date = parse_date(&req.date).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })?;
    let time = ClockTime::parse_hhmm(&req.time).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })?;

    let request = SearchRequest::new(
        PassengerId::new(req.passenger),
        origin,
        destination,
        date,
        time,
    );

    // Held until the session is stored
    let passengers = state.passengers.write().await;
    let session = Planner::new(&state.network, &state.config).propose(&*passengers, &request)?;

    let response = SearchItinerariesResponse::from_session(&session);
    state.sessions.insert(session).await;
    drop(passengers);

    Ok(Json(response))
}

/// Commit a pending candidate, or decline them all with choice 0.
async fn commit_itinerary(
    State(state): State<AppState>,
    Json(req): Json<CommitRequest>,
) -> Result<Json<CommitResponse>, AppError> {
    let passenger = PassengerId::new(req.passenger);

    let committed = {
        let mut passengers = state.passengers.write().await;
        let session = state.sessions.take(passenger).await;
        session.commit(req.choice, &mut *passengers)?
    };

    Ok(Json(CommitResponse {
        passenger: passenger.get(),
        committed: committed.as_ref().map(ItineraryResult::from_itinerary),
    }))
}

fn parse_station(name: &str) -> Result<Station, AppError> {
    Station::parse(name).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<SearchError> for AppError {
    fn from(e: SearchError) -> Self {
        let message = e.to_string();
        match e {
            SearchError::NoSuchStation(_)
            | SearchError::NoSuchService(_)
            | SearchError::NoSuchPassenger(_) => AppError::NotFound { message },
            SearchError::NoSuchItineraryChoice { .. } => AppError::BadRequest { message },
            SearchError::Passenger(e) => e.into(),
            SearchError::Domain(_) => AppError::Internal { message },
        }
    }
}

impl From<PassengerError> for AppError {
    fn from(e: PassengerError) -> Self {
        let message = e.to_string();
        match e {
            PassengerError::NoSuchPassenger(_) => AppError::NotFound { message },
            PassengerError::NonUniqueName(_) | PassengerError::InvalidName => {
                AppError::BadRequest { message }
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
