//! HTTP read API for the signal materialized view.
//!
//! Three endpoints over the projection store — newest-first listing with an
//! optional priority filter, point lookup, and a store liveness probe — plus
//! a Prometheus metrics endpoint. Writes never originate here; mutations
//! enter the view only through the event log.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use metrics_exporter_prometheus::PrometheusHandle;
use nexus_projection::SignalStore;
use tower_http::trace::TraceLayer;

use routes::signals::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: SignalStore + 'static>(store: S, metrics_handle: PrometheusHandle) -> Router {
    let state = Arc::new(AppState { store });

    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/signals", get(routes::signals::list::<S>))
        .route("/signals/{id}", get(routes::signals::get::<S>))
        .route("/health", get(routes::health::check::<S>))
        .with_state(state)
        .merge(metrics_router)
        .layer(TraceLayer::new_for_http())
}
