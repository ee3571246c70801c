//! Insert-and-query layer over the `sensor_data` table.
//!
//! Every read endpoint is a thin parameterisation of [`list`]: optional
//! inclusive timestamp bounds, newest-first ordering, then offset/limit.
//! The specialised endpoints (by-date, time-range, last-n-minutes) only
//! differ in how they construct their [`ReadingFilter`].

use chrono::{Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};
use sqlx::SqlitePool;

use super::models::{NewReading, SensorReading};

/// Timestamp bounds plus pagination applied to a read of `sensor_data`.
///
/// Both bounds are inclusive and independently optional. `limit: None`
/// means unbounded. An inverted range (start after end) matches nothing,
/// which is the contract — it is not rejected.
#[derive(Debug, Clone, Default)]
pub struct ReadingFilter {
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub skip: i64,
    pub limit: Option<i64>,
}

impl ReadingFilter {
    /// Readings with `start <= timestamp <= end`.
    pub fn between(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            ..Self::default()
        }
    }

    /// Readings with `timestamp >= start`.
    pub fn since(start: NaiveDateTime) -> Self {
        Self {
            start: Some(start),
            ..Self::default()
        }
    }

    /// All readings recorded on the given calendar day.
    pub fn for_date(date: NaiveDate) -> Self {
        let (start, end) = day_bounds(date);
        Self::between(start, end)
    }
}

/// Inclusive bounds of a calendar day: `[00:00:00.000000, 23:59:59.999999]`.
pub(crate) fn day_bounds(date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    let start = date.and_time(NaiveTime::MIN);
    let end = start + Duration::days(1) - Duration::microseconds(1);
    (start, end)
}

/// Persist one reading, assigning `id` and `timestamp` server-side, and
/// return the stored row.
pub async fn insert(pool: &SqlitePool, input: &NewReading) -> sqlx::Result<SensorReading> {
    // Naive local time, matching the timestamps served back by the queries.
    let timestamp = Local::now().naive_local();

    sqlx::query_as::<_, SensorReading>(
        r#"
        INSERT INTO sensor_data
            (timestamp, temperature, humidity, accel_x, accel_y, accel_z,
             gyro_x, gyro_y, gyro_z, bmp_temperature, pressure, altitude)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
        RETURNING id, timestamp, temperature, humidity, accel_x, accel_y, accel_z,
                  gyro_x, gyro_y, gyro_z, bmp_temperature, pressure, altitude
        "#,
    )
    .bind(timestamp)
    .bind(input.temperature)
    .bind(input.humidity)
    .bind(input.accel_x)
    .bind(input.accel_y)
    .bind(input.accel_z)
    .bind(input.gyro_x)
    .bind(input.gyro_y)
    .bind(input.gyro_z)
    .bind(input.bmp_temperature)
    .bind(input.pressure)
    .bind(input.altitude)
    .fetch_one(pool)
    .await
}

/// The most recently inserted reading (maximum `id`), if any.
pub async fn latest(pool: &SqlitePool) -> sqlx::Result<Option<SensorReading>> {
    sqlx::query_as::<_, SensorReading>(
        r#"
        SELECT id, timestamp, temperature, humidity, accel_x, accel_y, accel_z,
               gyro_x, gyro_y, gyro_z, bmp_temperature, pressure, altitude
        FROM sensor_data
        ORDER BY id DESC
        LIMIT 1
        "#,
    )
    .fetch_optional(pool)
    .await
}

/// The shared filtered read: apply whichever bounds are present, order
/// newest first (`id` breaks timestamp ties), then paginate.
pub async fn list(pool: &SqlitePool, filter: &ReadingFilter) -> sqlx::Result<Vec<SensorReading>> {
    sqlx::query_as::<_, SensorReading>(
        r#"
        SELECT id, timestamp, temperature, humidity, accel_x, accel_y, accel_z,
               gyro_x, gyro_y, gyro_z, bmp_temperature, pressure, altitude
        FROM sensor_data
        WHERE (?1 IS NULL OR timestamp >= ?1)
          AND (?2 IS NULL OR timestamp <= ?2)
        ORDER BY timestamp DESC, id DESC
        LIMIT ?3 OFFSET ?4
        "#,
    )
    .bind(filter.start)
    .bind(filter.end)
    // SQLite treats a negative LIMIT as "no limit".
    .bind(filter.limit.unwrap_or(-1))
    .bind(filter.skip)
    .fetch_all(pool)
    .await
}
