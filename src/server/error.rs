use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::CacheBuildError;

/// JSON body for every failed request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Debug)]
pub enum AppError {
    /// No locations and no pre-rendered state document.
    NoStateSource,
    /// Every upstream fetch failed, or the build task died.
    Upstream(CacheBuildError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::NoStateSource => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError {
                    error: "No state source configured".to_string(),
                    detail: None,
                },
            ),
            Self::Upstream(err) => (
                StatusCode::BAD_GATEWAY,
                ApiError {
                    error: "Failed to fetch weather data".to_string(),
                    detail: Some(err.to_string()),
                },
            ),
        };
        no_store((status, Json(body)))
    }
}

impl From<CacheBuildError> for AppError {
    fn from(err: CacheBuildError) -> Self {
        Self::Upstream(err)
    }
}

/// Marks a response as uncacheable by intermediaries; caching happens
/// server-side only.
pub fn no_store(response: impl IntoResponse) -> Response {
    let mut response = response.into_response();
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}
