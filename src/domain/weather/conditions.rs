/// Summary used for codes outside the WMO table, and for missing codes.
pub const DEFAULT_SUMMARY: &str = "Clear";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherCategory {
    Clear,
    Cloudy,
    Fog,
    Drizzle,
    Rain,
    Snow,
    RainShowers,
    SnowShowers,
    Thunder,
    Unknown,
}

#[must_use]
pub fn weather_code_to_category(code: u8) -> WeatherCategory {
    match code {
        0..=2 => WeatherCategory::Clear,
        3 => WeatherCategory::Cloudy,
        45 | 48 => WeatherCategory::Fog,
        51 | 53 | 55 | 56 | 57 => WeatherCategory::Drizzle,
        61 | 63 | 65 | 66 | 67 => WeatherCategory::Rain,
        71 | 73 | 75 | 77 => WeatherCategory::Snow,
        80..=82 => WeatherCategory::RainShowers,
        85 | 86 => WeatherCategory::SnowShowers,
        95 | 96 | 99 => WeatherCategory::Thunder,
        _ => WeatherCategory::Unknown,
    }
}

/// Dashboard label for a WMO weather code. Total: unknown codes map to
/// [`DEFAULT_SUMMARY`].
#[must_use]
pub fn weather_summary(code: u8) -> &'static str {
    match weather_code_to_category(code) {
        WeatherCategory::Clear => clear_summary(code),
        WeatherCategory::Cloudy | WeatherCategory::Fog => "Cloudy",
        WeatherCategory::Drizzle => "Light rain",
        WeatherCategory::Rain => "Rain",
        WeatherCategory::Snow => "Snow",
        WeatherCategory::SnowShowers => "Snow showers",
        WeatherCategory::RainShowers | WeatherCategory::Thunder => "Rain showers",
        WeatherCategory::Unknown => DEFAULT_SUMMARY,
    }
}

#[must_use]
pub fn summarize_optional(code: Option<u8>) -> &'static str {
    code.map_or(DEFAULT_SUMMARY, weather_summary)
}

fn clear_summary(code: u8) -> &'static str {
    match code {
        0 => "Sunny",
        1 => "Mostly sunny",
        _ => "Partly sunny",
    }
}
