//! # kona
//!
//! A lightweight, read-only SQLite-to-API server for daily climate observations.
//!
//! This library provides the core functionality for serving a climate
//! dataset (station metadata and daily measurements) through a small,
//! fixed HTTP/JSON API.
//!
//! ## Key Features
//!
//! - **Zero-configuration serving**: Point it at a SQLite file and the five data routes are live
//! - **Read-only by construction**: One shared read-only pool, no writes anywhere
//! - **Fixed query surface**: Precipitation history, station list, busiest-station
//!   temperatures, and min/avg/max aggregates over date ranges
//!
//! ## Architecture
//!
//! - **Data Layer**: A pooled, schema-verified SQLite store with one method per query
//! - **API Layer**: Stateless axum handlers reshaping rows into the JSON contract
//! - **Lifecycle**: Layered configuration, structured logging, graceful shutdown

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod models;
pub mod state;

pub use config::Config;
pub use db::ClimateStore;
pub use error::{KonaError, Result};
pub use logging::{
    create_http_trace_layer, generate_request_id, init_tracing, log_dataset_stats,
    log_request_error,
};
pub use state::AppState;
