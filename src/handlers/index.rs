//! Index endpoint handler.
//!
//! Serves the static route directory so the API is discoverable from a browser.

use axum::response::Html;
use std::time::Instant;
use tracing::{debug, info};

use crate::logging::generate_request_id;

/// The route directory served at the root path.
const ROUTE_DIRECTORY: &str = "\
Welcome to the kona climate API!<br/>\
Available Routes:<br/>\
/api/v1.0/precipitation - last 12 months of precipitation readings<br/>\
/api/v1.0/stations - all weather station identifiers<br/>\
/api/v1.0/tobs - last 12 months of temperature at the most active station<br/>\
/api/v1.0/{start} - TMIN/TAVG/TMAX of temperature from a start date (YYYY-MM-DD)<br/>\
/api/v1.0/{start}/{end} - TMIN/TAVG/TMAX of temperature over a date range (YYYY-MM-DD)";

/// Handle GET / requests
pub async fn index_handler() -> Html<&'static str> {
    let request_id = generate_request_id();
    let start_time = Instant::now();

    debug!(
        endpoint = "/",
        request_id = %request_id,
        "Processing index request"
    );

    let duration = start_time.elapsed();
    info!(
        endpoint = "/",
        request_id = %request_id,
        duration_us = duration.as_micros() as u64,
        "Index request successful"
    );

    Html(ROUTE_DIRECTORY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_index_handler_serves_every_data_route() {
        let Html(body) = index_handler().await;
        for route in [
            "/api/v1.0/precipitation",
            "/api/v1.0/stations",
            "/api/v1.0/tobs",
            "/api/v1.0/{start}",
            "/api/v1.0/{start}/{end}",
        ] {
            assert!(body.contains(route), "missing route: {}", route);
        }
    }
}
