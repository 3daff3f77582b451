//! Read-only data access for the climate dataset.
//!
//! This module owns the SQLite connection pool and every query the API runs.
//! The pool is opened once at startup, verified against the declared row
//! structures, and shared with handlers through the application state. No
//! caller writes; every route re-executes its query against the store.

use std::path::Path;

use chrono::{Days, NaiveDate};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

use crate::error::{KonaError, Result};
use crate::models::{DailyReading, DatasetSummary, Measurement, Station, TemperatureStats};

/// Storage format for calendar dates. Lexicographic order on stored values
/// equals calendar order, which is what the range filters rely on.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Length of the rolling observation window in days.
pub const OBSERVATION_WINDOW_DAYS: u64 = 365;

/// Shared, read-only handle to the climate database.
#[derive(Debug, Clone)]
pub struct ClimateStore {
    pool: SqlitePool,
}

impl ClimateStore {
    /// Open the SQLite file read-only and build the shared connection pool.
    pub async fn connect(path: &Path, max_connections: u32) -> Result<Self> {
        // Check if the file exists; SQLite would otherwise report a less
        // helpful generic open error.
        if !path.exists() {
            return Err(KonaError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Database file not found: {}", path.display()),
            )));
        }

        let options = SqliteConnectOptions::new().filename(path).read_only(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        info!("Opened climate database: {}", path.display());
        Ok(Self { pool })
    }

    /// Wrap an already-open pool. Used by tests that seed their own fixture
    /// database and reuse the seeding pool.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Check the physical tables against the declared row structures.
    ///
    /// Startup must fail when either table or any required column is missing,
    /// because the fixed queries would only fault later, per request.
    pub async fn verify_schema(&self) -> Result<()> {
        self.verify_table(Measurement::TABLE, &Measurement::REQUIRED_COLUMNS)
            .await?;
        self.verify_table(Station::TABLE, &Station::REQUIRED_COLUMNS)
            .await?;
        Ok(())
    }

    async fn verify_table(&self, table: &str, required: &[&str]) -> Result<()> {
        let columns: Vec<String> = sqlx::query_scalar("SELECT name FROM pragma_table_info(?1)")
            .bind(table)
            .fetch_all(&self.pool)
            .await?;

        // pragma_table_info yields no rows for an unknown table.
        if columns.is_empty() {
            return Err(KonaError::SchemaMismatch {
                table: table.to_string(),
                message: "table not found".to_string(),
            });
        }

        let missing: Vec<&str> = required
            .iter()
            .filter(|name| !columns.iter().any(|column| column == *name))
            .copied()
            .collect();
        if !missing.is_empty() {
            return Err(KonaError::SchemaMismatch {
                table: table.to_string(),
                message: format!("missing columns: {}", missing.join(", ")),
            });
        }

        debug!(table = table, columns = columns.len(), "Schema check passed");
        Ok(())
    }

    /// Most recent observation date across all measurements, if any rows exist.
    pub async fn latest_date(&self) -> Result<Option<String>> {
        let latest: Option<String> = sqlx::query_scalar("SELECT MAX(date) FROM measurement")
            .fetch_one(&self.pool)
            .await?;
        Ok(latest)
    }

    /// Inclusive lower bound of the rolling observation window, anchored at
    /// the dataset's most recent date.
    ///
    /// Errors when the measurement table is empty: the window cannot be
    /// anchored and must never fall back to a default.
    pub async fn observation_window_start(&self) -> Result<String> {
        let latest = self.latest_date().await?.ok_or_else(|| KonaError::EmptyDataset {
            message: "measurement table has no rows to anchor the observation window".to_string(),
        })?;
        Ok(window_start(&latest)?.to_string())
    }

    /// All (date, precipitation) pairs on or after `start`, in storage order.
    pub async fn precipitation_since(&self, start: &str) -> Result<Vec<DailyReading>> {
        let readings = sqlx::query_as::<_, DailyReading>(
            "SELECT date, prcp AS value FROM measurement WHERE date >= ?1",
        )
        .bind(start)
        .fetch_all(&self.pool)
        .await?;
        Ok(readings)
    }

    /// All station identifiers, unfiltered and undeduplicated, in storage
    /// order. The order is deterministic per file but otherwise unspecified.
    pub async fn station_ids(&self) -> Result<Vec<String>> {
        let ids: Vec<String> = sqlx::query_scalar("SELECT station FROM station")
            .fetch_all(&self.pool)
            .await?;
        Ok(ids)
    }

    /// Station with the most measurement rows.
    ///
    /// Ties are broken by whatever order the store's sort yields; nothing may
    /// rely on which of the tied stations wins. Errors when the measurement
    /// table is empty, never falling back to a default station.
    pub async fn most_active_station(&self) -> Result<String> {
        let station: Option<String> = sqlx::query_scalar(
            "SELECT station FROM measurement GROUP BY station ORDER BY COUNT(station) DESC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;
        station.ok_or_else(|| KonaError::EmptyDataset {
            message: "measurement table has no rows to rank station activity".to_string(),
        })
    }

    /// All (date, temperature) pairs for one station on or after `start`, in
    /// storage order.
    pub async fn tobs_for_station_since(
        &self,
        station: &str,
        start: &str,
    ) -> Result<Vec<DailyReading>> {
        let readings = sqlx::query_as::<_, DailyReading>(
            "SELECT date, tobs AS value FROM measurement WHERE station = ?1 AND date >= ?2",
        )
        .bind(station)
        .bind(start)
        .fetch_all(&self.pool)
        .await?;
        Ok(readings)
    }

    /// MIN/AVG/MAX of temperature over `date >= start`, additionally bounded
    /// by `date <= end` when given.
    ///
    /// The bounds are raw strings compared lexicographically; they are not
    /// validated as dates. NULL temperatures are skipped by the aggregates,
    /// and a range matching no rows yields all-NULL stats, which is a valid
    /// result rather than an error.
    pub async fn temperature_stats(
        &self,
        start: &str,
        end: Option<&str>,
    ) -> Result<TemperatureStats> {
        let stats = match end {
            Some(end) => {
                sqlx::query_as::<_, TemperatureStats>(
                    "SELECT MIN(tobs) AS tmin, AVG(tobs) AS tavg, MAX(tobs) AS tmax \
                     FROM measurement WHERE date >= ?1 AND date <= ?2",
                )
                .bind(start)
                .bind(end)
                .fetch_one(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, TemperatureStats>(
                    "SELECT MIN(tobs) AS tmin, AVG(tobs) AS tavg, MAX(tobs) AS tmax \
                     FROM measurement WHERE date >= ?1",
                )
                .bind(start)
                .fetch_one(&self.pool)
                .await?
            }
        };
        Ok(stats)
    }

    /// Row counts and the most recent observation date, for startup logging.
    pub async fn dataset_summary(&self) -> Result<DatasetSummary> {
        let summary = sqlx::query_as::<_, DatasetSummary>(
            "SELECT \
                (SELECT COUNT(*) FROM measurement) AS measurement_rows, \
                (SELECT COUNT(*) FROM station) AS station_rows, \
                (SELECT MAX(date) FROM measurement) AS latest_date",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(summary)
    }
}

/// Compute the inclusive window start: parse the anchor date and step back one
/// observation window. Calendar subtraction, so leap days count like any other
/// day.
pub fn window_start(anchor: &str) -> Result<NaiveDate> {
    let date = NaiveDate::parse_from_str(anchor, DATE_FORMAT).map_err(|e| KonaError::DateParse {
        value: anchor.to_string(),
        message: e.to_string(),
    })?;
    date.checked_sub_days(Days::new(OBSERVATION_WINDOW_DAYS))
        .ok_or_else(|| KonaError::DateParse {
            value: anchor.to_string(),
            message: "window start would precede the calendar".to_string(),
        })
}

/// Create a seeded test database file with a small, known set of rows.
#[cfg(test)]
async fn create_test_climate_db(path: &Path) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    sqlx::query(
        "CREATE TABLE measurement (
            id INTEGER PRIMARY KEY,
            station TEXT,
            date TEXT,
            prcp FLOAT,
            tobs FLOAT
        )",
    )
    .execute(&pool)
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
    .execute(&pool)
    .await?;

    let measurements: &[(&str, &str, Option<f64>, Option<f64>)] = &[
        ("USC00519281", "2016-08-20", Some(0.9), Some(69.0)),
        ("USC00519281", "2016-08-23", Some(1.3), Some(70.0)),
        ("USC00519281", "2017-08-20", Some(0.5), Some(78.0)),
        ("USC00519281", "2017-08-23", Some(0.45), Some(81.0)),
        ("USC00514830", "2017-08-22", None, Some(76.0)),
    ];
    for &(station, date, prcp, tobs) in measurements {
        sqlx::query("INSERT INTO measurement (station, date, prcp, tobs) VALUES (?1, ?2, ?3, ?4)")
            .bind(station)
            .bind(date)
            .bind(prcp)
            .bind(tobs)
            .execute(&pool)
            .await?;
    }

    let stations: &[(&str, &str)] = &[
        ("USC00519281", "WAIHEE 837.5, HI US"),
        ("USC00514830", "KUALOA RANCH HEADQUARTERS 886.9, HI US"),
    ];
    for &(station, name) in stations {
        sqlx::query(
            "INSERT INTO station (station, name, latitude, longitude, elevation) \
             VALUES (?1, ?2, 21.45, -157.84, 32.9)",
        )
        .bind(station)
        .bind(name)
        .execute(&pool)
        .await?;
    }

    Ok(pool)
}
