//! Test data generation utilities.
//!
//! This module builds small SQLite climate databases with fully known
//! contents so tests can assert exact response bodies.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;

// Fixture building talks straight to the driver, so use its error type
type Result<T> = std::result::Result<T, sqlx::Error>;

/// Measurement fixture rows, in insertion order.
///
/// The latest date is 2017-08-23, so the observation window starts at
/// 2016-08-23 inclusive. USC00519281 holds the unique top activity rank with
/// 6 rows; the other two stations have 3 each, so only ranks below the top
/// are tied. Duplicate dates across stations exercise the last-row-wins fold,
/// and the NULL readings exercise null passthrough and aggregate skipping.
const MEASUREMENTS: &[(&str, &str, Option<f64>, Option<f64>)] = &[
    // USC00519281 - the most active station
    ("USC00519281", "2015-03-01", Some(0.2), Some(65.0)),
    ("USC00519281", "2016-08-24", Some(2.15), Some(77.0)),
    ("USC00519281", "2017-01-01", Some(0.0), Some(62.0)),
    ("USC00519281", "2017-08-20", Some(0.5), Some(78.0)),
    ("USC00519281", "2017-08-22", None, Some(76.0)),
    ("USC00519281", "2017-08-23", Some(0.45), Some(81.0)),
    // USC00514830 - shares dates with the station above; inserted later, so
    // its precipitation values win the fold on those dates
    ("USC00514830", "2017-01-01", Some(0.05), Some(60.0)),
    ("USC00514830", "2017-06-15", Some(0.1), Some(79.0)),
    ("USC00514830", "2017-08-23", Some(0.08), Some(82.0)),
    // USC00517948 - one row on the window boundary, one just outside it, one
    // with a NULL temperature inside the window
    ("USC00517948", "2016-08-22", Some(0.9), Some(69.0)),
    ("USC00517948", "2016-08-23", Some(1.3), Some(70.0)),
    ("USC00517948", "2017-07-04", Some(0.0), None),
];

/// Station fixture rows.
const STATIONS: &[(&str, &str, f64, f64, f64)] = &[
    ("USC00519281", "WAIHEE 837.5, HI US", 21.45167, -157.84889, 32.9),
    (
        "USC00514830",
        "KUALOA RANCH HEADQUARTERS 886.9, HI US",
        21.5213,
        -157.8374,
        7.0,
    ),
    ("USC00517948", "PEARL CITY, HI US", 21.3934, -157.9751, 11.9),
];

/// Create the seeded fixture database at `path` and close the writing pool.
pub async fn create_climate_db(path: &Path) -> Result<()> {
    let pool = open_writable(path).await?;
    create_schema(&pool).await?;

    for &(station, date, prcp, tobs) in MEASUREMENTS {
        sqlx::query("INSERT INTO measurement (station, date, prcp, tobs) VALUES (?1, ?2, ?3, ?4)")
            .bind(station)
            .bind(date)
            .bind(prcp)
            .bind(tobs)
            .execute(&pool)
            .await?;
    }
    for &(station, name, latitude, longitude, elevation) in STATIONS {
        sqlx::query(
            "INSERT INTO station (station, name, latitude, longitude, elevation) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(station)
        .bind(name)
        .bind(latitude)
        .bind(longitude)
        .bind(elevation)
        .execute(&pool)
        .await?;
    }

    pool.close().await;
    Ok(())
}

/// Create a fixture database with the expected schema and no rows at all.
pub async fn create_empty_climate_db(path: &Path) -> Result<()> {
    let pool = open_writable(path).await?;
    create_schema(&pool).await?;
    pool.close().await;
    Ok(())
}

async fn open_writable(path: &Path) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);
    SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
}

/// The production dataset layout.
async fn create_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        "CREATE TABLE measurement (
            id INTEGER PRIMARY KEY,
            station TEXT,
            date TEXT,
            prcp FLOAT,
            tobs FLOAT
        )",
    )
    .execute(pool)
    .await?;
    sqlx::query(
        "CREATE TABLE station (
            id INTEGER PRIMARY KEY,
            station TEXT,
            name TEXT,
            latitude FLOAT,
            longitude FLOAT,
            elevation FLOAT
        )",
    )
    .execute(pool)
    .await?;
    Ok(())
}
