use chrono::{DateTime, SecondsFormat, Utc};
use futures::future::join_all;
use tracing::{info, warn};

use crate::{
    data::forecast::{ForecastClient, ForecastResponse},
    domain::{
        astronomy::{MoonData, moon_data},
        weather::{
            AlmanacInfo, Alert, ForecastLocation, ForecastPeriod, Location, LocationForecast,
            MoonPhaseDate, PrimaryLocation, Regional, RegionalOverlay, WeatherState,
            format_clock_at_offset, format_day_label, format_local_time, round_temp,
            summarize_optional,
        },
    },
    error::BuildError,
};

pub const DEFAULT_REGION_TITLE: &str = "United States";
pub const REGION_MAP_IMAGE: &str = "/media/maps/region-placeholder.svg";

const FORECAST_DAYS: usize = 5;

/// Fans out one upstream request per location and merges the survivors into
/// a [`WeatherState`].
#[derive(Debug, Clone)]
pub struct StateBuilder {
    client: ForecastClient,
    region_title: String,
}

impl StateBuilder {
    pub fn new(client: ForecastClient, region_title: impl Into<String>) -> Self {
        Self {
            client,
            region_title: region_title.into(),
        }
    }

    /// Fetches every location concurrently and waits for all of them to
    /// settle. Failed locations are dropped; only a build where every
    /// location failed is an error.
    pub async fn build(&self, locations: &[Location]) -> Result<WeatherState, BuildError> {
        info!(locations = locations.len(), "building weather state");

        let outcomes = join_all(
            locations
                .iter()
                .map(|location| self.client.fetch(location.lat, location.lon)),
        )
        .await;

        let mut available = Vec::with_capacity(locations.len());
        let mut failures = Vec::new();
        for (location, outcome) in locations.iter().zip(outcomes) {
            match outcome {
                Ok(payload) => available.push(enrich_location(location, &payload)),
                Err(err) => {
                    warn!(
                        location = %location.name,
                        status = ?err.status(),
                        error = %err,
                        "dropping location from this build"
                    );
                    failures.push(format!("{}: {err}", location.name));
                }
            }
        }

        if available.is_empty() {
            return Err(BuildError::NoForecastData { failures });
        }

        info!(
            succeeded = available.len(),
            failed = failures.len(),
            "weather state built"
        );
        Ok(assemble_state(&available, Utc::now(), &self.region_title))
    }
}

/// Zips the provider's daily arrays into periods and picks out current
/// conditions, falling back to day 0 where the live block is missing.
#[must_use]
pub fn enrich_location(location: &Location, payload: &ForecastResponse) -> LocationForecast {
    let daily = &payload.daily;
    let forecast = daily
        .time
        .iter()
        .take(FORECAST_DAYS)
        .enumerate()
        .map(|(idx, day)| ForecastPeriod {
            period: format_day_label(Some(day)),
            summary: summarize_optional(daily.code(idx)).to_string(),
            temp_f: daily.max_temp(idx),
            high_f: daily.max_temp(idx),
            low_f: daily.min_temp(idx),
            precip_chance: daily.precip_chance(idx),
        })
        .collect();

    let current = payload.current_weather.as_ref();

    LocationForecast {
        location: location.clone(),
        forecast,
        current_code: current
            .and_then(|c| c.weathercode)
            .or_else(|| daily.code(0)),
        current_temp_f: current
            .and_then(|c| c.temperature)
            .or_else(|| daily.max_temp(0)),
        sunrise: daily.sunrise(0).map(str::to_string),
        sunset: daily.sunset(0).map(str::to_string),
        sunrise_tomorrow: daily.sunrise(1).map(str::to_string),
        sunset_tomorrow: daily.sunset(1).map(str::to_string),
        utc_offset_seconds: payload.utc_offset_seconds,
    }
}

/// Merges enriched locations into the public document. The first entry is
/// the primary location; an empty slice yields blank primary fields.
#[must_use]
pub fn assemble_state(
    available: &[LocationForecast],
    now: DateTime<Utc>,
    region_title: &str,
) -> WeatherState {
    let primary = available.first();
    let moon = moon_data(now);

    let sunrise = format_local_time(primary.and_then(|p| p.sunrise.as_deref()));
    let sunset = format_local_time(primary.and_then(|p| p.sunset.as_deref()));
    let updated = format_clock_at_offset(now, primary.map_or(0, |p| p.utc_offset_seconds));

    WeatherState {
        generated_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        location: PrimaryLocation {
            name: primary.map(|p| p.location.name.clone()).unwrap_or_default(),
            zip: primary.map(|p| p.location.zip.clone()).unwrap_or_default(),
        },
        forecast: primary.map(|p| p.forecast.clone()).unwrap_or_default(),
        locations: available
            .iter()
            .filter(|entry| entry.location.include_in_forecast)
            .map(|entry| ForecastLocation {
                name: entry.location.name.clone(),
                zip: entry.location.zip.clone(),
                forecast: entry.forecast.clone(),
            })
            .collect(),
        almanac: almanac(primary, &moon, sunrise.clone(), sunset.clone()),
        regional: Regional {
            title: region_title.to_string(),
            map_image: REGION_MAP_IMAGE.to_string(),
            overlays: available
                .iter()
                .filter(|entry| entry.location.include_on_map)
                .map(overlay)
                .collect(),
        },
        ticker: vec![
            "Live weather update".to_string(),
            format!("Updated {updated}"),
            format!("Sunrise {sunrise} | Sunset {sunset}"),
            format!("Moon phase: {}", moon.phase_name.label()),
        ],
        alerts: vec![Alert {
            title: "Weather update".to_string(),
        }],
    }
}

fn almanac(
    primary: Option<&LocationForecast>,
    moon: &MoonData,
    sunrise: String,
    sunset: String,
) -> AlmanacInfo {
    AlmanacInfo {
        sunrise,
        sunset,
        sunrise_tomorrow: format_local_time(primary.and_then(|p| p.sunrise_tomorrow.as_deref())),
        sunset_tomorrow: format_local_time(primary.and_then(|p| p.sunset_tomorrow.as_deref())),
        moon_phase: moon.phase_name.label().to_string(),
        moon_illumination: moon.illumination,
        moon_phases: moon
            .next_phases
            .iter()
            .map(|phase| MoonPhaseDate {
                name: phase.name.to_string(),
                date: phase.date_label(),
            })
            .collect(),
    }
}

fn overlay(entry: &LocationForecast) -> RegionalOverlay {
    RegionalOverlay {
        label: entry.location.label.clone(),
        temp_f: entry.current_temp_f.map(round_temp),
        condition: summarize_optional(entry.current_code).to_string(),
        lat: entry.location.lat,
        lon: entry.location.lon,
    }
}
