//! Stations endpoint handler.
//!
//! Returns every station identifier as a JSON array, in storage order.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use super::error_response;
use crate::logging::generate_request_id;
use crate::state::AppState;

/// Handle GET /api/v1.0/stations requests
pub async fn stations_handler(State(state): State<Arc<AppState>>) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();

    debug!(
        endpoint = "/api/v1.0/stations",
        request_id = %request_id,
        "Processing stations request"
    );

    match state.store.station_ids().await {
        Ok(ids) => {
            let duration = start_time.elapsed();
            info!(
                endpoint = "/api/v1.0/stations",
                request_id = %request_id,
                duration_us = duration.as_micros() as u64,
                stations = ids.len(),
                "Stations request successful"
            );
            Json(ids).into_response()
        }
        Err(error) => error_response(error, "/api/v1.0/stations", &request_id, None),
    }
}
