use serde_json::Value;
use tracing::{debug, warn};

use crate::{data::source::JsonSource, error::ConfigError};

/// Loads a pre-rendered state document from the first tier that parses.
///
/// Used only when no locations are configured; the document is served as-is.
pub async fn load_static_state(sources: &[JsonSource]) -> Option<Value> {
    for source in sources {
        match source.load().await {
            Ok(state) => {
                debug!(source = %source.describe(), "serving pre-rendered state");
                return Some(state);
            }
            Err(ConfigError::Io { .. }) => {
                debug!(source = %source.describe(), "state file unavailable");
            }
            Err(err) => warn!(source = %source.describe(), error = %err, "ignoring state tier"),
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn invalid_inline_state_falls_back_to_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("state.json");
        std::fs::write(&path, r#"{"generatedAt": "from-file"}"#).unwrap();

        let state = load_static_state(&[
            JsonSource::Inline("{broken".to_string()),
            JsonSource::File(path),
        ])
        .await
        .expect("state");
        assert_eq!(state["generatedAt"], "from-file");
    }

    #[tokio::test]
    async fn no_tiers_means_no_state() {
        assert!(load_static_state(&[]).await.is_none());
    }
}
