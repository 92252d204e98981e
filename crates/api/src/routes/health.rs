//! Health check endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use nexus_projection::SignalStore;
use serde::Serialize;

use crate::error::ApiError;
use crate::routes::signals::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// GET /health — liveness probe against the projection store.
pub async fn check<S: SignalStore>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<HealthResponse>, ApiError> {
    state.store.health().await.map_err(|err| {
        tracing::error!(error = %err, "store health probe failed");
        ApiError::Unavailable("store unhealthy")
    })?;

    Ok(Json(HealthResponse { status: "ok" }))
}
