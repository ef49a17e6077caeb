use std::path::PathBuf;

use serde_json::Value;
use tracing::debug;

use crate::data::{locations::resolve_locations, source::JsonSource};

/// One tier of the ZIP list chain behind `GET /api/zips`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZipSource {
    /// An explicit override list.
    List(Vec<String>),
    /// ZIPs of whatever the location tiers resolve to.
    Locations(Vec<JsonSource>),
    /// `locations[].zip` of a pre-rendered state document.
    State(JsonSource),
    /// Legacy plain-text list, one or more ZIPs per line.
    File(PathBuf),
}

impl ZipSource {
    async fn load(&self) -> Vec<String> {
        match self {
            Self::List(zips) => zips.clone(),
            Self::Locations(sources) => resolve_locations(sources)
                .await
                .into_iter()
                .map(|location| location.zip)
                .filter(|zip| !zip.is_empty())
                .collect(),
            Self::State(source) => source
                .load()
                .await
                .map(|state| state_zips(&state))
                .unwrap_or_default(),
            Self::File(path) => tokio::fs::read_to_string(path)
                .await
                .map(|raw| parse_zip_list(&raw))
                .unwrap_or_default(),
        }
    }
}

pub async fn resolve_zips(sources: &[ZipSource]) -> Vec<String> {
    for source in sources {
        let zips = source.load().await;
        if !zips.is_empty() {
            debug!(count = zips.len(), "resolved ZIP list");
            return zips;
        }
    }
    Vec::new()
}

/// Splits a comma/whitespace separated list, dropping blanks.
#[must_use]
pub fn parse_zip_list(raw: &str) -> Vec<String> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|zip| !zip.is_empty())
        .map(str::to_string)
        .collect()
}

fn state_zips(state: &Value) -> Vec<String> {
    state
        .get("locations")
        .and_then(Value::as_array)
        .map(|locations| {
            locations
                .iter()
                .filter_map(|location| location.get("zip").and_then(Value::as_str))
                .filter(|zip| !zip.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
