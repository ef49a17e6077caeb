use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    data::source::JsonSource,
    domain::weather::{DEFAULT_LOCATION_NAME, DEFAULT_ZIP, Location},
    error::ConfigError,
};

/// Resolves the configured locations from the first tier that yields any.
///
/// Tiers that are missing, malformed or empty after normalization are skipped;
/// an empty result means no tier produced a usable location.
pub async fn resolve_locations(sources: &[JsonSource]) -> Vec<Location> {
    for source in sources {
        match load_tier(source).await {
            Ok(locations) if !locations.is_empty() => {
                debug!(
                    source = %source.describe(),
                    count = locations.len(),
                    "resolved locations"
                );
                return locations;
            }
            Ok(_) => debug!(source = %source.describe(), "location tier is empty"),
            Err(ConfigError::Io { .. }) => {
                debug!(source = %source.describe(), "location file unavailable");
            }
            Err(err) => warn!(source = %source.describe(), error = %err, "ignoring location tier"),
        }
    }
    Vec::new()
}

async fn load_tier(source: &JsonSource) -> Result<Vec<Location>, ConfigError> {
    parse_locations(&source.load().await?)
}

/// Normalizes a decoded JSON array into locations.
pub fn parse_locations(value: &Value) -> Result<Vec<Location>, ConfigError> {
    let entries = value.as_array().ok_or(ConfigError::NotAnArray)?;
    Ok(normalize_locations(entries))
}

#[must_use]
pub fn normalize_locations(entries: &[Value]) -> Vec<Location> {
    entries.iter().filter_map(normalize_entry).collect()
}

fn normalize_entry(entry: &Value) -> Option<Location> {
    let lat = coordinate(entry, "lat", "latitude")?;
    let lon = coordinate(entry, "lon", "longitude")?;

    let name = text_field(entry, "name");
    let label = text_field(entry, "label");

    Some(Location {
        name: name
            .clone()
            .or_else(|| label.clone())
            .unwrap_or_else(|| DEFAULT_LOCATION_NAME.to_string()),
        label: label
            .or(name)
            .unwrap_or_else(|| DEFAULT_LOCATION_NAME.to_string()),
        zip: text_field(entry, "zip").unwrap_or_else(|| DEFAULT_ZIP.to_string()),
        lat,
        lon,
        include_in_forecast: flag(entry, "includeInForecast"),
        include_on_map: flag(entry, "includeOnMap"),
    })
}

/// Reads `primary`, falling back to `alias` when `primary` is absent or null.
fn coordinate(entry: &Value, primary: &str, alias: &str) -> Option<f64> {
    let value = entry
        .get(primary)
        .filter(|v| !v.is_null())
        .or_else(|| entry.get(alias))?;
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

/// Non-empty string, or a non-zero number rendered as text.
fn text_field(entry: &Value, key: &str) -> Option<String> {
    match entry.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64().is_some_and(|v| v != 0.0) => Some(n.to_string()),
        _ => None,
    }
}

/// Only an explicit `false` turns a flag off.
fn flag(entry: &Value, key: &str) -> bool {
    !matches!(entry.get(key), Some(Value::Bool(false)))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn entries_without_finite_coordinates_are_dropped() {
        let entries = json!([
            {"name": "Buffalo", "lat": 42.89, "lon": -78.88},
            {"name": "No lat", "lon": -78.88},
            {"name": "Bad lat", "lat": "north", "lon": 1.0},
            {"name": "Null lat", "lat": null, "lon": 1.0}
        ]);
        let locations = parse_locations(&entries).unwrap();
        assert_eq!(locations.len(), 1);
        assert_eq!(locations[0].name, "Buffalo");
    }

    #[test]
    fn defaults_fill_missing_fields() {
        let locations = parse_locations(&json!([{"lat": 1.0, "lon": 2.0}])).unwrap();
        let location = &locations[0];
        assert_eq!(location.name, DEFAULT_LOCATION_NAME);
        assert_eq!(location.label, DEFAULT_LOCATION_NAME);
        assert_eq!(location.zip, DEFAULT_ZIP);
        assert!(location.include_in_forecast);
        assert!(location.include_on_map);
    }

    #[test]
    fn name_and_label_mirror_each_other() {
        let locations = parse_locations(&json!([
            {"name": "Erie", "lat": 1.0, "lon": 2.0},
            {"label": "Rochester", "lat": 1.0, "lon": 2.0}
        ]))
        .unwrap();
        assert_eq!(locations[0].label, "Erie");
        assert_eq!(locations[1].name, "Rochester");
    }

    #[test]
    fn explicit_false_excludes_from_lists() {
        let locations = parse_locations(&json!([
            {"lat": 1.0, "lon": 2.0, "includeInForecast": false, "includeOnMap": true},
            {"lat": 1.0, "lon": 2.0, "includeOnMap": false, "includeInForecast": 0}
        ]))
        .unwrap();
        assert!(!locations[0].include_in_forecast);
        assert!(locations[0].include_on_map);
        assert!(locations[1].include_in_forecast);
        assert!(!locations[1].include_on_map);
    }

    #[test]
    fn aliases_and_numeric_strings_are_coerced() {
        let locations = parse_locations(&json!([
            {"name": "Alias", "zip": 14201, "latitude": "42.9", "longitude": -78.8}
        ]))
        .unwrap();
        assert_eq!(locations[0].zip, "14201");
        assert!((locations[0].lat - 42.9).abs() < f64::EPSILON);
    }

    #[test]
    fn non_array_json_is_rejected() {
        let err = parse_locations(&json!({"lat": 1.0})).unwrap_err();
        assert!(matches!(err, ConfigError::NotAnArray));
    }

    #[tokio::test]
    async fn malformed_tier_falls_through_to_next() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("locations.json");
        std::fs::write(&path, r#"[{"name": "From file", "lat": 3, "lon": 4}]"#).unwrap();

        let locations = resolve_locations(&[
            JsonSource::Inline("{not json".to_string()),
            JsonSource::Inline(r#"{"name": "object"}"#.to_string()),
            JsonSource::Inline("[]".to_string()),
            JsonSource::File(path),
        ])
        .await;

        assert_eq!(locations.len(), 1);
        assert_eq!(locations[0].name, "From file");
    }

    #[tokio::test]
    async fn first_non_empty_tier_wins() {
        let locations = resolve_locations(&[
            JsonSource::Inline(r#"[{"name": "Inline", "lat": 1, "lon": 2}]"#.to_string()),
            JsonSource::Inline(r#"[{"name": "Later", "lat": 1, "lon": 2}]"#.to_string()),
        ])
        .await;
        assert_eq!(locations[0].name, "Inline");
    }

    #[tokio::test]
    async fn no_usable_tier_yields_empty() {
        let dir = tempfile::tempdir().expect("temp dir");
        let locations = resolve_locations(&[JsonSource::File(dir.path().join("missing.json"))]).await;
        assert!(locations.is_empty());
    }
}
