//! Temperature-observations endpoint handler.
//!
//! Returns the last 12 months of temperature readings for the station with
//! the most measurements, as a date-keyed JSON object.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use super::{error_response, into_date_map};
use crate::error::Result;
use crate::logging::generate_request_id;
use crate::state::AppState;

/// Handle GET /api/v1.0/tobs requests
pub async fn tobs_handler(State(state): State<Arc<AppState>>) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();

    debug!(
        endpoint = "/api/v1.0/tobs",
        request_id = %request_id,
        "Processing temperature observations request"
    );

    match tobs_series(&state).await {
        Ok((station, series)) => {
            let duration = start_time.elapsed();
            info!(
                endpoint = "/api/v1.0/tobs",
                request_id = %request_id,
                duration_us = duration.as_micros() as u64,
                station = %station,
                days = series.len(),
                "Temperature observations request successful"
            );
            Json(series).into_response()
        }
        Err(error) => error_response(error, "/api/v1.0/tobs", &request_id, None),
    }
}

/// Rank the busiest station, then query its readings over the observation
/// window anchored at the global latest date. The station id is returned for
/// logging only; the response body is just the date mapping.
async fn tobs_series(state: &AppState) -> Result<(String, BTreeMap<String, Option<f64>>)> {
    let station = state.store.most_active_station().await?;
    let window_start = state.store.observation_window_start().await?;
    let readings = state
        .store
        .tobs_for_station_since(&station, &window_start)
        .await?;
    Ok((station, into_date_map(readings)))
}
