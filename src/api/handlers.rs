use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use chrono::{Duration, Local, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use sqlx::SqlitePool;
use tracing::info;
use utoipa::OpenApi;

use super::{dto::SensorReadingDto, errors::ApiError};
use crate::db::models::NewReading;
use crate::db::readings::{self, ReadingFilter};

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ByDateParams {
    pub date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct TimeRangeParams {
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
}

#[derive(Debug, Deserialize)]
pub struct LastNMinutesParams {
    pub minutes: i64,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
    pub start_time: Option<NaiveDateTime>,
    pub end_time: Option<NaiveDateTime>,
}

fn default_limit() -> i64 {
    100
}

/// Unwrap a `Query` extractor, turning axum's rejection into a 422 instead
/// of its default 400.
fn query<T>(result: Result<Query<T>, QueryRejection>) -> Result<T, ApiError> {
    result
        .map(|Query(params)| params)
        .map_err(|e| ApiError::Validation(e.body_text()))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Ingest one reading. `id` and `timestamp` are assigned server-side; the
/// stored record is echoed back.
#[utoipa::path(
    post,
    path = "/sensor-data/",
    request_body = NewReading,
    responses(
        (status = 200, description = "Created reading", body = SensorReadingDto),
        (status = 422, description = "Missing or non-numeric measurement field"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "sensor-data"
)]
pub async fn ingest(
    State(pool): State<SqlitePool>,
    body: Result<Json<NewReading>, JsonRejection>,
) -> Result<Json<SensorReadingDto>, ApiError> {
    let Json(input) = body.map_err(|e| ApiError::Validation(e.body_text()))?;
    let stored = readings::insert(&pool, &input).await?;
    info!(id = stored.id, "Reading ingested");
    Ok(Json(stored.into()))
}

/// Fetch the most recently ingested reading.
#[utoipa::path(
    get,
    path = "/sensor-data/latest/",
    responses(
        (status = 200, description = "Latest reading", body = SensorReadingDto),
        (status = 404, description = "No readings recorded yet"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "sensor-data"
)]
pub async fn get_latest(
    State(pool): State<SqlitePool>,
) -> Result<Json<SensorReadingDto>, ApiError> {
    let reading = readings::latest(&pool)
        .await?
        .ok_or(ApiError::NotFound("no sensor data recorded yet"))?;
    Ok(Json(reading.into()))
}

/// Fetch all readings recorded on a calendar day, newest first.
/// The day covers `[00:00:00.000000, 23:59:59.999999]` inclusive.
#[utoipa::path(
    get,
    path = "/sensor-data/by-date/",
    params(
        ("date" = NaiveDate, Query, description = "Calendar date (YYYY-MM-DD)"),
    ),
    responses(
        (status = 200, description = "Readings for the day, newest first", body = Vec<SensorReadingDto>),
        (status = 422, description = "Malformed date"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "sensor-data"
)]
pub async fn get_by_date(
    State(pool): State<SqlitePool>,
    params: Result<Query<ByDateParams>, QueryRejection>,
) -> Result<Json<Vec<SensorReadingDto>>, ApiError> {
    let params = query(params)?;
    let rows = readings::list(&pool, &ReadingFilter::for_date(params.date)).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// Fetch readings with `start_time <= timestamp <= end_time`, newest first.
/// An inverted range matches nothing and returns an empty list.
#[utoipa::path(
    get,
    path = "/sensor-data/time-range/",
    params(
        ("start_time" = NaiveDateTime, Query, description = "Start of range (inclusive)"),
        ("end_time" = NaiveDateTime, Query, description = "End of range (inclusive)"),
    ),
    responses(
        (status = 200, description = "Readings in range, newest first", body = Vec<SensorReadingDto>),
        (status = 422, description = "Malformed or missing bound"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "sensor-data"
)]
pub async fn get_by_time_range(
    State(pool): State<SqlitePool>,
    params: Result<Query<TimeRangeParams>, QueryRejection>,
) -> Result<Json<Vec<SensorReadingDto>>, ApiError> {
    let params = query(params)?;
    let filter = ReadingFilter::between(params.start_time, params.end_time);
    let rows = readings::list(&pool, &filter).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// Fetch readings from the last `minutes` minutes of wall-clock time,
/// newest first. Zero or negative values simply match nothing.
#[utoipa::path(
    get,
    path = "/sensor-data/last-n-minutes/",
    params(
        ("minutes" = i64, Query, description = "Window size in minutes, ending now"),
    ),
    responses(
        (status = 200, description = "Readings in the window, newest first", body = Vec<SensorReadingDto>),
        (status = 422, description = "Malformed minutes value"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "sensor-data"
)]
pub async fn get_last_n_minutes(
    State(pool): State<SqlitePool>,
    params: Result<Query<LastNMinutesParams>, QueryRejection>,
) -> Result<Json<Vec<SensorReadingDto>>, ApiError> {
    let params = query(params)?;
    let window = Duration::try_minutes(params.minutes)
        .ok_or_else(|| ApiError::Validation("minutes value out of range".to_owned()))?;
    let start = Local::now().naive_local() - window;
    let rows = readings::list(&pool, &ReadingFilter::since(start)).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// General-purpose paginated listing: optional inclusive timestamp bounds,
/// newest first, then `skip`/`limit` applied to the ordered sequence.
#[utoipa::path(
    get,
    path = "/sensor-data/",
    params(
        ("skip" = i64, Query, description = "Records to drop from the front (default 0)"),
        ("limit" = i64, Query, description = "Maximum records to return (default 100)"),
        ("start_time" = Option<NaiveDateTime>, Query, description = "Start bound (inclusive)"),
        ("end_time" = Option<NaiveDateTime>, Query, description = "End bound (inclusive)"),
    ),
    responses(
        (status = 200, description = "Matching readings, newest first", body = Vec<SensorReadingDto>),
        (status = 422, description = "Malformed parameter"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "sensor-data"
)]
pub async fn list_readings(
    State(pool): State<SqlitePool>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<SensorReadingDto>>, ApiError> {
    let params = query(params)?;
    let filter = ReadingFilter {
        start: params.start_time,
        end: params.end_time,
        skip: params.skip,
        limit: Some(params.limit),
    };
    let rows = readings::list(&pool, &filter).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Returns `200 OK` with `{"status":"ok"}` when the server is running.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy"),
    ),
    tag = "system"
)]
pub async fn health() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "ok" }))
}

// ---------------------------------------------------------------------------
// OpenAPI spec
// ---------------------------------------------------------------------------

#[derive(OpenApi)]
#[openapi(
    paths(
        ingest,
        get_latest,
        get_by_date,
        get_by_time_range,
        get_last_n_minutes,
        list_readings,
        health
    ),
    components(schemas(SensorReadingDto, NewReading)),
    tags(
        (name = "sensor-data", description = "Telemetry ingestion and query endpoints"),
        (name = "system",      description = "System endpoints"),
    ),
    info(
        title = "CanSat Telemetry API",
        version = "0.1.0",
        description = "REST API for CanSat sensor telemetry"
    )
)]
pub struct ApiDoc;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
