use crate::{
    data::forecast::{CurrentWeatherBlock, DailyBlock, ForecastResponse},
    domain::weather::Location,
};

pub(crate) fn fixture_location(name: &str, lat: f64, lon: f64) -> Location {
    Location {
        zip: "14201".to_string(),
        ..Location::from_coords(name, lat, lon)
    }
}

/// Five days starting Monday 2024-01-01 in US Eastern (UTC-5), snow on day 0.
pub(crate) fn fixture_payload(high_f: f64) -> ForecastResponse {
    let days = 0..5_i32;
    ForecastResponse {
        utc_offset_seconds: -5 * 3600,
        daily: DailyBlock {
            time: days
                .clone()
                .map(|idx| format!("2024-01-{:02}", idx + 1))
                .collect(),
            temperature_2m_max: days.clone().map(|idx| Some(high_f + f64::from(idx))).collect(),
            temperature_2m_min: days
                .clone()
                .map(|idx| Some(high_f - 10.0 + f64::from(idx)))
                .collect(),
            precipitation_probability_max: days
                .map(|idx| Some(40.0 - f64::from(idx) * 5.0))
                .collect(),
            weathercode: vec![Some(73), Some(71), Some(3), Some(0), Some(61)],
            sunrise: vec![
                Some("2024-01-01T07:45".to_string()),
                Some("2024-01-02T07:45".to_string()),
            ],
            sunset: vec![
                Some("2024-01-01T16:55".to_string()),
                Some("2024-01-02T16:56".to_string()),
            ],
        },
        current_weather: Some(CurrentWeatherBlock {
            weathercode: Some(71),
            temperature: Some(high_f - 2.0),
        }),
    }
}
