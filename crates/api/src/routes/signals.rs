//! Signal read endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use nexus_domain::Signal;
use nexus_projection::SignalStore;
use serde::Deserialize;

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState<S: SignalStore> {
    pub store: S,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub priority: Option<String>,
}

/// GET /signals — the 50 newest signals, or an exact-priority filter when
/// `?priority=X` is present.
#[tracing::instrument(skip(state))]
pub async fn list<S: SignalStore>(
    State(state): State<Arc<AppState<S>>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Signal>>, ApiError> {
    let result = match params.priority.as_deref() {
        Some(priority) if !priority.is_empty() => state.store.list_by_priority(priority).await,
        _ => state.store.list_by_created_at(0, 49).await,
    };

    let signals = result.map_err(|err| {
        tracing::error!(error = %err, "listing signals failed");
        ApiError::Internal("failed to list signals")
    })?;

    Ok(Json(signals))
}

/// GET /signals/{id} — point lookup against the primary record.
#[tracing::instrument(skip(state))]
pub async fn get<S: SignalStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<Signal>, ApiError> {
    let signal = state.store.find_by_id(&id).await.map_err(|err| {
        if err.is_not_found() {
            ApiError::NotFound("signal not found")
        } else {
            tracing::error!(error = %err, "signal lookup failed");
            ApiError::Internal("failed to get signal")
        }
    })?;

    Ok(Json(signal))
}
