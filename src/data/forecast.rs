use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::error::UpstreamError;

pub const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

const DAILY_FIELDS: &str =
    "temperature_2m_max,temperature_2m_min,precipitation_probability_max,weathercode,sunrise,sunset";
const FORECAST_DAYS: &str = "5";

#[derive(Debug, Clone)]
pub struct ForecastClient {
    client: Client,
    base_url: String,
}

impl ForecastClient {
    pub fn with_base_url(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, UpstreamError> {
        Ok(Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .map_err(UpstreamError::Client)?,
            base_url: base_url.into(),
        })
    }

    /// Five-day daily forecast plus current conditions, in °F, with the time
    /// zone detected by the provider.
    pub async fn fetch(&self, lat: f64, lon: f64) -> Result<ForecastResponse, UpstreamError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("latitude", lat.to_string()),
                ("longitude", lon.to_string()),
                ("daily", DAILY_FIELDS.to_string()),
                ("current_weather", "true".to_string()),
                ("temperature_unit", "fahrenheit".to_string()),
                ("windspeed_unit", "mph".to_string()),
                ("timezone", "auto".to_string()),
                ("forecast_days", FORECAST_DAYS.to_string()),
            ])
            .send()
            .await
            .map_err(UpstreamError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
            });
        }

        response.json().await.map_err(UpstreamError::Decode)
    }
}

/// Raw provider payload. Daily arrays are index-aligned; any of them may be
/// short or contain nulls.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub utc_offset_seconds: i32,
    #[serde(default)]
    pub daily: DailyBlock,
    #[serde(default)]
    pub current_weather: Option<CurrentWeatherBlock>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DailyBlock {
    pub time: Vec<String>,
    pub temperature_2m_max: Vec<Option<f64>>,
    pub temperature_2m_min: Vec<Option<f64>>,
    pub precipitation_probability_max: Vec<Option<f64>>,
    pub weathercode: Vec<Option<u8>>,
    pub sunrise: Vec<Option<String>>,
    pub sunset: Vec<Option<String>>,
}

impl DailyBlock {
    #[must_use]
    pub fn max_temp(&self, idx: usize) -> Option<f64> {
        self.temperature_2m_max.get(idx).copied().flatten()
    }

    #[must_use]
    pub fn min_temp(&self, idx: usize) -> Option<f64> {
        self.temperature_2m_min.get(idx).copied().flatten()
    }

    #[must_use]
    pub fn precip_chance(&self, idx: usize) -> Option<f64> {
        self.precipitation_probability_max
            .get(idx)
            .copied()
            .flatten()
            .filter(|v| v.is_finite())
    }

    #[must_use]
    pub fn code(&self, idx: usize) -> Option<u8> {
        self.weathercode.get(idx).copied().flatten()
    }

    #[must_use]
    pub fn sunrise(&self, idx: usize) -> Option<&str> {
        self.sunrise.get(idx).and_then(Option::as_deref)
    }

    #[must_use]
    pub fn sunset(&self, idx: usize) -> Option<&str> {
        self.sunset.get(idx).and_then(Option::as_deref)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CurrentWeatherBlock {
    pub weathercode: Option<u8>,
    pub temperature: Option<f64>,
}
