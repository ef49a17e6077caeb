#![allow(dead_code)]

use std::time::Duration;

use retro_weather::{
    app::builder::{DEFAULT_REGION_TITLE, StateBuilder},
    data::forecast::ForecastClient,
    domain::weather::Location,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

pub const FORECAST_PATH: &str = "/v1/forecast";

pub fn forecast_url(server: &MockServer) -> String {
    format!("{}{FORECAST_PATH}", server.uri())
}

pub fn builder_for(server: &MockServer) -> StateBuilder {
    let client = ForecastClient::with_base_url(forecast_url(server), Duration::from_secs(5))
        .expect("forecast client");
    StateBuilder::new(client, DEFAULT_REGION_TITLE)
}

pub fn location(name: &str, lat: f64, lon: f64) -> Location {
    Location::from_coords(name, lat, lon)
}

pub fn forecast_payload(high_f: f64) -> serde_json::Value {
    serde_json::json!({
        "latitude": 42.9,
        "longitude": -78.9,
        "utc_offset_seconds": -18000,
        "timezone": "America/New_York",
        "current_weather": {
            "temperature": high_f - 2.0,
            "windspeed": 9.4,
            "winddirection": 250,
            "weathercode": 3,
            "time": "2024-01-01T14:00"
        },
        "daily": {
            "time": ["2024-01-01", "2024-01-02", "2024-01-03", "2024-01-04", "2024-01-05"],
            "temperature_2m_max": [high_f, high_f + 1.0, high_f + 2.0, high_f + 3.0, high_f + 4.0],
            "temperature_2m_min": [high_f - 10.0, high_f - 9.0, high_f - 8.0, high_f - 7.0, high_f - 6.0],
            "precipitation_probability_max": [40, 35, null, 20, 10],
            "weathercode": [73, 71, 3, 0, 61],
            "sunrise": ["2024-01-01T07:45", "2024-01-02T07:45", "2024-01-03T07:45", "2024-01-04T07:45", "2024-01-05T07:45"],
            "sunset": ["2024-01-01T16:55", "2024-01-02T16:56", "2024-01-03T16:57", "2024-01-04T16:58", "2024-01-05T16:59"]
        }
    })
}

/// Answers requests for `latitude` with `template`.
pub async fn mount_for_latitude(server: &MockServer, latitude: f64, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .and(query_param("latitude", latitude.to_string()))
        .respond_with(template)
        .mount(server)
        .await;
}

pub async fn mount_any(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .respond_with(template)
        .mount(server)
        .await;
}

pub fn ok(high_f: f64) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(forecast_payload(high_f))
}

pub async fn request_count(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .map(|requests| requests.len())
        .unwrap_or_default()
}
