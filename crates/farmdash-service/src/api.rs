//! REST API endpoints for the farmdash-service.
//!
//! Every handler that touches the store, the audit log or the animal file
//! locks `state.dashboard` for the duration of that work and nothing else.
//!
//! ## Error Handling
//!
//! All endpoints return structured JSON errors via [`AppError`]. Store errors
//! return HTTP 500. Client errors (not found, bad request) return the
//! matching 4xx status code.
//!
//! # Example
//!
//! ```ignore
//! use farmdash_service::api;
//!
//! let app = api::router().with_state(state);
//! ```

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{ConnectInfo, Path, Query, Request, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::warn;

use farmdash_core::{Animal, Snapshot, Submission};
use farmdash_store::ReadingQuery;
use farmdash_types::{AlertSignal, LogEntry, Measurement, Reading, timestamp};

use crate::state::AppState;

/// Largest `n` accepted by the events endpoint.
pub const MAX_EVENTS: usize = 1000;

/// Create the API router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/health", get(health))
        // Readings
        .route("/api/readings", get(get_readings).post(submit_reading))
        .route("/api/readings.csv", get(export_csv))
        .route("/api/alerts", get(get_alerts))
        .route("/api/dashboard", get(get_dashboard))
        // Audit log
        .route("/api/events", get(get_events).post(record_event))
        .route("/api/events/simulate", post(simulate_event))
        // Animal detection
        .route("/api/animal", get(get_animal).put(set_animal))
        // Decoy
        .route("/api/secret/{token}", get(honeypot))
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    /// Number of stored readings.
    pub readings: u64,
}

async fn health(State(state): State<Arc<AppState>>) -> Result<Json<HealthResponse>, AppError> {
    let readings = state.dashboard.lock().await.store().count()?;
    Ok(Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: OffsetDateTime::now_utc(),
        readings,
    }))
}

/// Query parameters for listing readings.
///
/// `since` and `until` use the stored `YYYY-MM-DD HH:MM:SS` form.
#[derive(Debug, Default, Deserialize)]
pub struct ReadingsQuery {
    pub since: Option<String>,
    pub until: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl ReadingsQuery {
    /// Convert to a store query, rejecting bad timestamps and inverted ranges.
    pub fn to_store_query(&self) -> Result<ReadingQuery, AppError> {
        let parse = |name: &str, value: &Option<String>| {
            value
                .as_deref()
                .map(|s| {
                    timestamp::parse(s)
                        .map_err(|e| AppError::BadRequest(format!("Invalid '{}': {}", name, e)))
                })
                .transpose()
        };

        let since = parse("since", &self.since)?;
        let until = parse("until", &self.until)?;

        if let (Some(since), Some(until)) = (since, until)
            && since > until
        {
            return Err(AppError::BadRequest(
                "Invalid time range: 'since' must be less than or equal to 'until'".to_string(),
            ));
        }

        let mut query = ReadingQuery::new();
        if let Some(since) = since {
            query = query.since(since);
        }
        if let Some(until) = until {
            query = query.until(until);
        }
        if let Some(limit) = self.limit {
            query = query.limit(limit);
        }
        if let Some(offset) = self.offset {
            query = query.offset(offset);
        }
        Ok(query)
    }
}

/// Paginated response wrapper with metadata.
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    /// The data items.
    pub data: Vec<T>,
    /// Pagination metadata.
    pub pagination: PaginationMeta,
}

/// Pagination metadata.
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    /// Number of items returned.
    pub count: usize,
    /// Offset from the beginning.
    pub offset: u32,
    /// Maximum items requested (if specified).
    pub limit: Option<u32>,
}

/// Readings, newest first.
async fn get_readings(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ReadingsQuery>,
) -> Result<Json<PaginatedResponse<Reading>>, AppError> {
    let query = params.to_store_query()?;
    let data = state.dashboard.lock().await.store().query(&query)?;

    Ok(Json(PaginatedResponse {
        pagination: PaginationMeta {
            count: data.len(),
            offset: params.offset.unwrap_or(0),
            limit: params.limit,
        },
        data,
    }))
}

/// Store a manually entered reading.
async fn submit_reading(
    State(state): State<Arc<AppState>>,
    Json(measurement): Json<Measurement>,
) -> Result<(StatusCode, Json<Submission>), AppError> {
    if !measurement.is_finite() {
        return Err(AppError::BadRequest(
            "temperature, humidity and ph must be finite numbers".to_string(),
        ));
    }

    let submission = state.dashboard.lock().await.submit(measurement)?;
    Ok((StatusCode::CREATED, Json(submission)))
}

/// All readings as a CSV download.
async fn export_csv(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, AppError> {
    let readings = state.dashboard.lock().await.store().fetch_all()?;
    let csv = farmdash_store::to_csv(&readings)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"sensor_data.csv\"",
            ),
        ],
        csv,
    ))
}

/// Alerts for the newest reading.
#[derive(Debug, Serialize)]
pub struct AlertsResponse {
    pub reading: Option<Reading>,
    pub alerts: Vec<AlertSignal>,
}

async fn get_alerts(State(state): State<Arc<AppState>>) -> Result<Json<AlertsResponse>, AppError> {
    let dashboard = state.dashboard.lock().await;
    let reading = dashboard.store().latest()?;
    let alerts = reading
        .map(|r| dashboard.thresholds().evaluate_reading(&r))
        .unwrap_or_default();

    Ok(Json(AlertsResponse { reading, alerts }))
}

/// Everything the home view shows.
async fn get_dashboard(State(state): State<Arc<AppState>>) -> Result<Json<Snapshot>, AppError> {
    let tail = state.config.dashboard.tail_lines;
    let snapshot = state.dashboard.lock().await.snapshot(tail)?;
    Ok(Json(snapshot))
}

#[derive(Debug, Deserialize)]
pub struct EventsQuery {
    pub n: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct EventsResponse {
    /// Most recent log lines, oldest first.
    pub events: Vec<String>,
}

async fn get_events(
    State(state): State<Arc<AppState>>,
    Query(params): Query<EventsQuery>,
) -> Result<Json<EventsResponse>, AppError> {
    let n = params.n.unwrap_or(state.config.dashboard.tail_lines);
    if n > MAX_EVENTS {
        return Err(AppError::BadRequest(format!(
            "n must be at most {}",
            MAX_EVENTS
        )));
    }

    let events = state.dashboard.lock().await.log().tail(n)?;
    Ok(Json(EventsResponse { events }))
}

#[derive(Debug, Deserialize)]
pub struct RecordEventRequest {
    pub message: String,
}

async fn record_event(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RecordEventRequest>,
) -> Result<(StatusCode, Json<LogEntry>), AppError> {
    if request.message.trim().is_empty() {
        return Err(AppError::BadRequest("message cannot be empty".to_string()));
    }

    let entry = state.dashboard.lock().await.record_event(&request.message)?;
    Ok((StatusCode::CREATED, Json(entry)))
}

async fn simulate_event(
    State(state): State<Arc<AppState>>,
) -> Result<(StatusCode, Json<LogEntry>), AppError> {
    let entry = state.dashboard.lock().await.simulate_event()?;
    Ok((StatusCode::CREATED, Json(entry)))
}

#[derive(Debug, Serialize)]
pub struct AnimalResponse {
    pub animal: Option<Animal>,
}

#[derive(Debug, Deserialize)]
pub struct SetAnimalRequest {
    pub animal: String,
}

async fn get_animal(State(state): State<Arc<AppState>>) -> Result<Json<AnimalResponse>, AppError> {
    let animal = state.dashboard.lock().await.animal().get()?;
    Ok(Json(AnimalResponse { animal }))
}

async fn set_animal(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SetAnimalRequest>,
) -> Result<Json<AnimalResponse>, AppError> {
    let animal: Animal = request
        .animal
        .parse()
        .map_err(|e: farmdash_types::ParseError| AppError::BadRequest(e.to_string()))?;

    state.dashboard.lock().await.animal().set(animal)?;
    Ok(Json(AnimalResponse {
        animal: Some(animal),
    }))
}

/// Decoy route: records who asked, then answers like any missing page.
async fn honeypot(
    State(state): State<Arc<AppState>>,
    Path(_token): Path<String>,
    request: Request,
) -> AppError {
    let source = client_address(&request);

    warn!(
        "Honeypot accessed from {}",
        source.as_deref().unwrap_or(farmdash_core::audit::UNKNOWN_SOURCE)
    );
    if let Err(e) = state
        .dashboard
        .lock()
        .await
        .log()
        .record_honeypot_access(source.as_deref())
    {
        warn!("Failed to record honeypot access: {}", e);
    }

    AppError::NotFound("Not found".to_string())
}

/// Peer address from the connection, falling back to `X-Forwarded-For`.
fn client_address(request: &Request) -> Option<String> {
    if let Some(ConnectInfo(addr)) = request.extensions().get::<ConnectInfo<SocketAddr>>() {
        return Some(addr.ip().to_string());
    }

    request
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// API error type.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Store(farmdash_store::Error),
    Internal(String),
}

impl From<farmdash_store::Error> for AppError {
    fn from(e: farmdash_store::Error) -> Self {
        AppError::Store(e)
    }
}

impl From<farmdash_core::Error> for AppError {
    fn from(e: farmdash_core::Error) -> Self {
        match e {
            farmdash_core::Error::Storage(e) => AppError::Store(e),
            farmdash_core::Error::InvalidAnimal(_) => AppError::BadRequest(e.to_string()),
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = serde_json::json!({
            "error": message,
        });

        (status, Json(body)).into_response()
    }
}
