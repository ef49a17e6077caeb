use axum::{Router, routing::get};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use super::{AppState, handlers};

pub fn create_router(state: AppState) -> Router {
    let media = ServeDir::new(&state.settings.media_dir);

    let api = Router::new()
        .route("/health", get(handlers::health))
        .route("/zips", get(handlers::zips))
        .route("/state", get(handlers::weather_state));

    Router::new()
        .nest("/api", api)
        .nest_service("/media", media)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
