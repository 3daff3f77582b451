//! Temperature aggregate endpoint handlers.
//!
//! Serve MIN/AVG/MAX temperature statistics from a start date, optionally
//! bounded by an end date. The path parameters are raw strings compared
//! against stored dates lexicographically and never validated; a bound that
//! matches nothing yields an all-null result, not an error.

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use super::error_response;
use crate::logging::generate_request_id;
use crate::state::AppState;

/// Handle GET /api/v1.0/{start} requests
pub async fn temperature_start_handler(
    State(state): State<Arc<AppState>>,
    Path(start): Path<String>,
) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();

    debug!(
        endpoint = "/api/v1.0/{start}",
        request_id = %request_id,
        start = %start,
        "Processing temperature aggregate request"
    );

    match state.store.temperature_stats(&start, None).await {
        Ok(stats) => {
            let duration = start_time.elapsed();
            info!(
                endpoint = "/api/v1.0/{start}",
                request_id = %request_id,
                duration_us = duration.as_micros() as u64,
                "Temperature aggregate request successful"
            );
            Json(stats).into_response()
        }
        Err(error) => error_response(
            error,
            "/api/v1.0/{start}",
            &request_id,
            Some(&format!("start={}", start)),
        ),
    }
}

/// Handle GET /api/v1.0/{start}/{end} requests
pub async fn temperature_range_handler(
    State(state): State<Arc<AppState>>,
    Path((start, end)): Path<(String, String)>,
) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();

    debug!(
        endpoint = "/api/v1.0/{start}/{end}",
        request_id = %request_id,
        start = %start,
        end = %end,
        "Processing temperature aggregate request"
    );

    match state.store.temperature_stats(&start, Some(&end)).await {
        Ok(stats) => {
            let duration = start_time.elapsed();
            info!(
                endpoint = "/api/v1.0/{start}/{end}",
                request_id = %request_id,
                duration_us = duration.as_micros() as u64,
                "Temperature aggregate request successful"
            );
            Json(stats).into_response()
        }
        Err(error) => error_response(
            error,
            "/api/v1.0/{start}/{end}",
            &request_id,
            Some(&format!("start={}, end={}", start, end)),
        ),
    }
}
