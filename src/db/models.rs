use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// One persisted telemetry record from the `sensor_data` table.
///
/// `id` and `timestamp` are assigned by the server at insertion; everything
/// else comes from the payload. Rows are insert-only — there is no update
/// or delete path anywhere in the service.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct SensorReading {
    pub id: i64,
    pub timestamp: NaiveDateTime,
    // DHT11
    pub temperature: f64,
    pub humidity: f64,
    // MPU6050
    pub accel_x: f64,
    pub accel_y: f64,
    pub accel_z: f64,
    pub gyro_x: f64,
    pub gyro_y: f64,
    pub gyro_z: f64,
    // BMP280
    pub bmp_temperature: f64,
    pub pressure: f64,
    pub altitude: f64,
}

/// The eleven measurement fields accepted at ingestion.
///
/// All fields are required and numeric; no range validation is applied.
/// A missing or non-numeric field fails body deserialisation and is
/// surfaced to the caller as a 422.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewReading {
    pub temperature: f64,
    pub humidity: f64,
    pub accel_x: f64,
    pub accel_y: f64,
    pub accel_z: f64,
    pub gyro_x: f64,
    pub gyro_y: f64,
    pub gyro_z: f64,
    pub bmp_temperature: f64,
    pub pressure: f64,
    pub altitude: f64,
}
