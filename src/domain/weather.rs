mod conditions;
mod conversions;

use serde::{Deserialize, Serialize};

pub use conditions::{
    DEFAULT_SUMMARY, WeatherCategory, summarize_optional, weather_code_to_category,
    weather_summary,
};
pub use conversions::{
    MISSING_DAY, MISSING_TIME, format_clock_at_offset, format_day_label, format_local_time,
    parse_date, round_temp,
};

/// Sentinel ZIP used when a configured location carries none.
pub const DEFAULT_ZIP: &str = "00000";

/// Name/label used when a configured location carries neither.
pub const DEFAULT_LOCATION_NAME: &str = "Location";

/// A configured place to forecast. Coordinates are always finite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub name: String,
    pub label: String,
    pub zip: String,
    pub lat: f64,
    pub lon: f64,
    pub include_in_forecast: bool,
    pub include_on_map: bool,
}

impl Location {
    pub fn from_coords(name: impl Into<String>, lat: f64, lon: f64) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
            zip: DEFAULT_ZIP.to_string(),
            lat,
            lon,
            include_in_forecast: true,
            include_on_map: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPeriod {
    pub period: String,
    pub summary: String,
    #[serde(rename = "tempF", skip_serializing_if = "Option::is_none")]
    pub temp_f: Option<f64>,
    #[serde(rename = "highF", skip_serializing_if = "Option::is_none")]
    pub high_f: Option<f64>,
    #[serde(rename = "lowF", skip_serializing_if = "Option::is_none")]
    pub low_f: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precip_chance: Option<f64>,
}

/// A location enriched with its upstream forecast. Lives for one build only.
#[derive(Debug, Clone)]
pub struct LocationForecast {
    pub location: Location,
    pub forecast: Vec<ForecastPeriod>,
    pub current_code: Option<u8>,
    pub current_temp_f: Option<f64>,
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
    pub sunrise_tomorrow: Option<String>,
    pub sunset_tomorrow: Option<String>,
    pub utc_offset_seconds: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoonPhaseDate {
    pub name: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlmanacInfo {
    pub sunrise: String,
    pub sunset: String,
    pub sunrise_tomorrow: String,
    pub sunset_tomorrow: String,
    pub moon_phase: String,
    pub moon_illumination: u8,
    pub moon_phases: Vec<MoonPhaseDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionalOverlay {
    pub label: String,
    #[serde(rename = "tempF", skip_serializing_if = "Option::is_none")]
    pub temp_f: Option<i64>,
    pub condition: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Regional {
    pub title: String,
    pub map_image: String,
    pub overlays: Vec<RegionalOverlay>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimaryLocation {
    pub name: String,
    pub zip: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastLocation {
    pub name: String,
    pub zip: String,
    pub forecast: Vec<ForecastPeriod>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub title: String,
}

/// The document served by `GET /api/state`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherState {
    pub generated_at: String,
    pub location: PrimaryLocation,
    pub forecast: Vec<ForecastPeriod>,
    pub locations: Vec<ForecastLocation>,
    pub almanac: AlmanacInfo,
    pub regional: Regional,
    pub ticker: Vec<String>,
    pub alerts: Vec<Alert>,
}
