//! HTTP request handlers for the kona API.
//!
//! This module contains all the endpoint handlers for the web server, the
//! router that wires them up, and the helpers they share.

pub mod index;
pub mod precipitation;
pub mod stations;
pub mod temperature;
pub mod tobs;

pub use index::index_handler;
pub use precipitation::precipitation_handler;
pub use stations::stations_handler;
pub use temperature::{temperature_range_handler, temperature_start_handler};
pub use tobs::tobs_handler;

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};

use crate::error::KonaError;
use crate::logging::log_request_error;
use crate::models::DailyReading;
use crate::state::AppState;

/// Build the application router.
///
/// Static segments win over the `:start` capture, so the three named data
/// routes stay reachable alongside the aggregate routes.
pub fn api_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/v1.0/precipitation", get(precipitation_handler))
        .route("/api/v1.0/stations", get(stations_handler))
        .route("/api/v1.0/tobs", get(tobs_handler))
        .route("/api/v1.0/:start", get(temperature_start_handler))
        .route("/api/v1.0/:start/:end", get(temperature_range_handler))
        .with_state(state)
}

/// Fold (date, value) rows into the date-keyed mapping the JSON routes
/// return. Later rows overwrite earlier ones on duplicate dates, and the
/// BTreeMap keeps the serialized object date-ordered.
pub(crate) fn into_date_map(readings: Vec<DailyReading>) -> BTreeMap<String, Option<f64>> {
    readings.into_iter().map(|r| (r.date, r.value)).collect()
}

/// Handle error responses for the data routes.
///
/// Every fault on this read-only API is a server-side failure: client input
/// is never rejected, it just matches nothing.
pub(crate) fn error_response(
    error: KonaError,
    endpoint: &str,
    request_id: &str,
    params: Option<&str>,
) -> Response {
    log_request_error(&error, endpoint, request_id, params);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({
            "error": error.to_string(),
            "request_id": request_id
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_date_map_last_value_wins() {
        let readings = vec![
            DailyReading {
                date: "2017-01-01".to_string(),
                value: Some(0.0),
            },
            DailyReading {
                date: "2016-08-24".to_string(),
                value: Some(2.15),
            },
            DailyReading {
                date: "2017-01-01".to_string(),
                value: Some(0.05),
            },
        ];

        let map = into_date_map(readings);
        assert_eq!(map.len(), 2);
        assert_eq!(map["2017-01-01"], Some(0.05));
    }

    #[test]
    fn test_into_date_map_orders_by_date_and_keeps_nulls() {
        let readings = vec![
            DailyReading {
                date: "2017-08-22".to_string(),
                value: None,
            },
            DailyReading {
                date: "2016-08-23".to_string(),
                value: Some(1.3),
            },
        ];

        let map = into_date_map(readings);
        let dates: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(dates, ["2016-08-23", "2017-08-22"]);
        assert_eq!(map["2017-08-22"], None);
    }
}
