//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
};
use tracing::{error, warn};

use crate::domain::{LineId, StationId};
use crate::network::{NetworkError, SubwayNetwork};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/stations", get(list_stations).post(create_station))
        .route("/stations/:id", delete(delete_station))
        .route("/lines", get(list_lines).post(create_line))
        .route(
            "/lines/:id",
            get(show_line).put(update_line).delete(delete_line),
        )
        .route(
            "/lines/:id/sections",
            get(list_sections).post(add_section).delete(remove_section),
        )
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

async fn create_station(
    State(state): State<AppState>,
    Json(req): Json<StationRequest>,
) -> Result<(StatusCode, Json<StationResponse>), AppError> {
    let mut network = state.network.write().await;
    let station = network.create_station(&req.name)?;
    Ok((StatusCode::CREATED, Json(StationResponse::from(station))))
}

async fn list_stations(State(state): State<AppState>) -> Json<Vec<StationResponse>> {
    let network = state.network.read().await;
    Json(network.stations().map(StationResponse::from).collect())
}

async fn delete_station(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, AppError> {
    let mut network = state.network.write().await;
    network.delete_station(StationId(id))?;
    Ok(StatusCode::NO_CONTENT)
}

/// Build the line view: metadata plus stations in path order.
fn line_response(network: &SubwayNetwork, id: LineId) -> Result<LineResponse, NetworkError> {
    let line = network.line(id)?;
    let stations = network.line_stations(id)?;
    Ok(LineResponse::new(line, stations))
}

async fn create_line(
    State(state): State<AppState>,
    Json(req): Json<LineRequest>,
) -> Result<(StatusCode, Json<LineResponse>), AppError> {
    let mut network = state.network.write().await;
    let id = network
        .create_line(
            &req.name,
            &req.color,
            StationId(req.up_station_id),
            StationId(req.down_station_id),
            req.distance,
        )
        .map_err(AppError::invalid_request)?
        .id();
    let response = line_response(&network, id)?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_lines(State(state): State<AppState>) -> Result<Json<Vec<LineResponse>>, AppError> {
    let network = state.network.read().await;
    let lines = network
        .lines()
        .map(|line| line_response(&network, line.id()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(lines))
}

async fn show_line(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<LineResponse>, AppError> {
    let network = state.network.read().await;
    Ok(Json(line_response(&network, LineId(id))?))
}

async fn update_line(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(req): Json<LineUpdateRequest>,
) -> Result<Json<LineResponse>, AppError> {
    let mut network = state.network.write().await;
    network.update_line(LineId(id), &req.name, &req.color)?;
    Ok(Json(line_response(&network, LineId(id))?))
}

async fn delete_line(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, AppError> {
    let mut network = state.network.write().await;
    network.delete_line(LineId(id))?;
    Ok(StatusCode::NO_CONTENT)
}

/// Register a section on a line.
///
/// Every rejection, including an unknown line or station, is a client error.
async fn add_section(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(req): Json<SectionRequest>,
) -> Result<(StatusCode, Json<SectionResponse>), AppError> {
    let mut network = state.network.write().await;
    let segment = network
        .add_segment(
            LineId(id),
            StationId(req.up_station_id),
            StationId(req.down_station_id),
            req.distance,
        )
        .map_err(AppError::invalid_request)?;
    Ok((StatusCode::CREATED, Json(SectionResponse::from(&segment))))
}

/// List a line's sections in path order.
async fn list_sections(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Vec<SectionResponse>>, AppError> {
    let network = state.network.read().await;
    let sections = network
        .line_segments(LineId(id))?
        .iter()
        .map(SectionResponse::from)
        .collect();
    Ok(Json(sections))
}

/// Remove a station from a line.
async fn remove_section(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Query(query): Query<SectionDeleteQuery>,
) -> Result<StatusCode, AppError> {
    let mut network = state.network.write().await;
    network
        .remove_station_from_line(LineId(id), StationId(query.station_id))
        .map_err(AppError::invalid_request)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl AppError {
    /// Map an error where a missing line or station is part of a bad
    /// request rather than a missing resource.
    pub fn invalid_request(e: NetworkError) -> Self {
        match AppError::from(e) {
            AppError::NotFound { message } => AppError::BadRequest { message },
            other => other,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            AppError::BadRequest { message }
            | AppError::NotFound { message }
            | AppError::Internal { message } => message,
        }
    }
}

impl From<NetworkError> for AppError {
    fn from(e: NetworkError) -> Self {
        let message = e.to_string();
        if e.is_internal() {
            return AppError::Internal { message };
        }
        match e {
            NetworkError::LineNotFound(_) | NetworkError::StationNotFound(_) => {
                AppError::NotFound { message }
            }
            _ => AppError::BadRequest { message },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if status.is_server_error() {
            error!(%status, message = self.message(), "request failed");
        } else {
            warn!(%status, message = self.message(), "request rejected");
        }

        let body = Json(ErrorResponse {
            error: self.message().to_string(),
        });
        (status, body).into_response()
    }
}
