//! Row structures for the climate dataset and the shapes queries return.
//!
//! The dataset is read-only: nothing here is ever inserted or updated. The
//! table row structs exist to declare, statically, the schema the fixed
//! queries rely on; `ClimateStore::verify_schema` checks the physical tables
//! against the `TABLE` and `REQUIRED_COLUMNS` constants at startup instead of
//! reflecting on whatever columns happen to exist.

use serde::Serialize;
use sqlx::FromRow;

/// Row shape of the `measurement` table: one daily reading from one station.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Measurement {
    /// Station identifier, e.g. "USC00519281"
    pub station: String,
    /// Observation date stored as "YYYY-MM-DD"; lexicographic order equals
    /// calendar order
    pub date: String,
    /// Precipitation in inches; missing readings are NULL
    pub prcp: Option<f64>,
    /// Temperature observation in degrees Fahrenheit; missing readings are NULL
    pub tobs: Option<f64>,
}

impl Measurement {
    /// Physical table name.
    pub const TABLE: &'static str = "measurement";

    /// Columns the fixed queries reference; startup fails if any is missing.
    pub const REQUIRED_COLUMNS: [&'static str; 4] = ["station", "date", "prcp", "tobs"];
}

/// Row shape of the `station` table: one weather-observation site.
///
/// Only the identifier is read by any route. The descriptive columns are
/// declared for completeness but are not part of the startup schema check.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Station {
    /// Station identifier
    pub station: String,
    /// Human-readable site name
    pub name: Option<String>,
    /// Site latitude in decimal degrees
    pub latitude: Option<f64>,
    /// Site longitude in decimal degrees
    pub longitude: Option<f64>,
    /// Site elevation in feet
    pub elevation: Option<f64>,
}

impl Station {
    /// Physical table name.
    pub const TABLE: &'static str = "station";

    /// Columns the fixed queries reference; startup fails if any is missing.
    pub const REQUIRED_COLUMNS: [&'static str; 1] = ["station"];
}

/// One (date, value) pair pulled from the measurement table.
///
/// `value` is whichever measurement column the query selected (precipitation
/// or temperature); NULL readings stay `None` and serialize as JSON null.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DailyReading {
    pub date: String,
    pub value: Option<f64>,
}

/// Aggregate temperature statistics for a date range.
///
/// Serialized with the fixed `TMIN`/`TAVG`/`TMAX` keys the API contract uses.
/// All three are `None` when no rows match the range; that is a valid
/// response, not an error.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct TemperatureStats {
    #[serde(rename = "TMIN")]
    pub tmin: Option<f64>,
    #[serde(rename = "TAVG")]
    pub tavg: Option<f64>,
    #[serde(rename = "TMAX")]
    pub tmax: Option<f64>,
}

/// Row counts and the most recent observation date, logged at startup.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DatasetSummary {
    pub measurement_rows: i64,
    pub station_rows: i64,
    pub latest_date: Option<String>,
}
