use std::path::PathBuf;

use thiserror::Error;

/// A configuration tier could not be turned into usable data.
///
/// Never surfaced to HTTP callers on its own: resolvers log it and move on to
/// the next tier.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("base64 payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a JSON array of locations")]
    NotAnArray,
}

/// One upstream forecast request failed.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Open-Meteo {status}")]
    Status { status: u16 },
    #[error("forecast request failed: {0}")]
    Request(#[source] reqwest::Error),
    #[error("failed to parse forecast payload: {0}")]
    Decode(#[source] reqwest::Error),
    #[error("failed to construct HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl UpstreamError {
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status } => Some(*status),
            Self::Request(err) | Self::Decode(err) => err.status().map(|s| s.as_u16()),
            Self::Client(_) => None,
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum BuildError {
    #[error("No forecast data ({} location(s) failed)", failures.len())]
    NoForecastData { failures: Vec<String> },
}

/// A build observed through the state cache failed.
///
/// Cloneable so a single failed build can be handed to every caller that
/// joined it.
#[derive(Debug, Clone, Error)]
pub enum CacheBuildError {
    #[error(transparent)]
    Build(#[from] BuildError),
    #[error("state build task aborted: {0}")]
    Aborted(String),
}
