use axum::{Json, extract::State, response::Response};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{
    AppState,
    error::{AppError, no_store},
};
use crate::data::{
    locations::resolve_locations, static_state::load_static_state, zips::resolve_zips,
};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub time: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ZipsResponse {
    pub zips: Vec<String>,
}

/// GET /api/health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        time: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

/// GET /api/zips
pub async fn zips(State(state): State<AppState>) -> Response {
    let zips = resolve_zips(&state.settings.zip_sources).await;
    no_store(Json(ZipsResponse { zips }))
}

/// GET /api/state
///
/// Live state through the cache when locations are configured, otherwise a
/// pre-rendered document if one exists.
pub async fn weather_state(State(state): State<AppState>) -> Result<Response, AppError> {
    let locations = resolve_locations(&state.settings.location_sources).await;
    if !locations.is_empty() {
        let weather = state.cache.get_state(&locations).await.inspect_err(|err| {
            warn!(error = %err, "serving state failed");
        })?;
        return Ok(no_store(Json(weather)));
    }

    let document = load_static_state(&state.settings.state_sources)
        .await
        .ok_or(AppError::NoStateSource)?;
    Ok(no_store(Json(document)))
}
