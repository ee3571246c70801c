use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::db::models::SensorReading;

/// Wire shape of one stored reading.
///
/// `timestamp` serialises as an ISO 8601 naive date-time
/// (e.g. `2024-01-01T12:30:00.123456`).
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SensorReadingDto {
    pub id: i64,
    pub timestamp: NaiveDateTime,
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

impl From<SensorReading> for SensorReadingDto {
    fn from(r: SensorReading) -> Self {
        Self {
            id: r.id,
            timestamp: r.timestamp,
            temperature: r.temperature,
            humidity: r.humidity,
            accel_x: r.accel_x,
            accel_y: r.accel_y,
            accel_z: r.accel_z,
            gyro_x: r.gyro_x,
            gyro_y: r.gyro_y,
            gyro_z: r.gyro_z,
            bmp_temperature: r.bmp_temperature,
            pressure: r.pressure,
            altitude: r.altitude,
        }
    }
}
