//! Precipitation endpoint handler.
//!
//! Returns the last 12 months of precipitation readings as a date-keyed JSON
//! object, with the window anchored at the most recent date in the dataset.

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

/// Handle GET /api/v1.0/precipitation requests
pub async fn precipitation_handler(State(state): State<Arc<AppState>>) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();

    debug!(
        endpoint = "/api/v1.0/precipitation",
        request_id = %request_id,
        "Processing precipitation request"
    );

    match precipitation_series(&state).await {
        Ok(series) => {
            let duration = start_time.elapsed();
            info!(
                endpoint = "/api/v1.0/precipitation",
                request_id = %request_id,
                duration_us = duration.as_micros() as u64,
                days = series.len(),
                "Precipitation request successful"
            );
            Json(series).into_response()
        }
        Err(error) => error_response(error, "/api/v1.0/precipitation", &request_id, None),
    }
}

/// Anchor the observation window, query the readings in it, and fold them
/// into the response mapping.
async fn precipitation_series(state: &AppState) -> Result<BTreeMap<String, Option<f64>>> {
    let window_start = state.store.observation_window_start().await?;
    let readings = state.store.precipitation_since(&window_start).await?;
    Ok(into_date_map(readings))
}
