use std::path::PathBuf;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde_json::Value;

use crate::error::ConfigError;

/// One tier of a layered JSON configuration chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsonSource {
    /// JSON text supplied directly (flag or environment variable).
    Inline(String),
    /// Base64-encoded JSON text, for environments that mangle quotes.
    Base64(String),
    /// A JSON file on disk.
    File(PathBuf),
}

impl JsonSource {
    /// Reads and parses this tier.
    pub async fn load(&self) -> Result<Value, ConfigError> {
        let raw = self.read_text().await?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Inline(_) => "inline JSON".to_string(),
            Self::Base64(_) => "base64 JSON".to_string(),
            Self::File(path) => path.display().to_string(),
        }
    }

    async fn read_text(&self) -> Result<String, ConfigError> {
        match self {
            Self::Inline(raw) => Ok(raw.clone()),
            Self::Base64(encoded) => {
                let bytes = STANDARD.decode(encoded.trim())?;
                Ok(String::from_utf8(bytes)?)
            }
            Self::File(path) => {
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| ConfigError::Io {
                        path: path.clone(),
                        source,
                    })
            }
        }
    }
}

/// Builds the inline → base64 tiers from optional raw values, skipping blanks.
#[must_use]
pub fn env_tiers(inline: Option<&str>, base64: Option<&str>) -> Vec<JsonSource> {
    let inline = non_blank(inline).map(|raw| JsonSource::Inline(raw.to_string()));
    let base64 = non_blank(base64).map(|raw| JsonSource::Base64(raw.to_string()));
    inline.into_iter().chain(base64).collect()
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
