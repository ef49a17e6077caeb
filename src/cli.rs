use std::path::PathBuf;

use clap::Parser;

use crate::{
    app::{builder::DEFAULT_REGION_TITLE, settings::DEFAULT_UPSTREAM_TIMEOUT_SECS},
    data::forecast::FORECAST_URL,
};

#[derive(Debug, Parser, Clone)]
#[command(
    name = "retro-weather",
    version,
    about = "Retro weather dashboard backend"
)]
pub struct Cli {
    /// Bind host
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Bind port
    #[arg(long, env = "PORT", default_value_t = 5174)]
    pub port: u16,

    /// Directory holding locations.json, zips.txt and state.json
    #[arg(long, env = "WEATHER_DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// Directory served under /media
    #[arg(long, env = "WEATHER_MEDIA_DIR", default_value = "media")]
    pub media_dir: PathBuf,

    /// Locations as an inline JSON array
    #[arg(long, env = "WEATHER_LOCATIONS_JSON")]
    pub locations_json: Option<String>,

    /// Locations as a base64-encoded JSON array
    #[arg(long, env = "WEATHER_LOCATIONS_BASE64")]
    pub locations_base64: Option<String>,

    /// Locations file (default: <data-dir>/locations.json)
    #[arg(long, env = "WEATHER_LOCATIONS_FILE")]
    pub locations_file: Option<PathBuf>,

    /// Pre-rendered state document as inline JSON
    #[arg(long, env = "WEATHER_STATE_JSON")]
    pub state_json: Option<String>,

    /// Pre-rendered state document as base64 JSON
    #[arg(long, env = "WEATHER_STATE_BASE64")]
    pub state_base64: Option<String>,

    /// ZIP override list, comma or newline separated
    #[arg(long, env = "WEATHER_ZIPS")]
    pub zips: Option<String>,

    /// Legacy ZIP list file (default: <data-dir>/zips.txt)
    #[arg(long, env = "WEATHER_ZIPS_FILE")]
    pub zips_file: Option<PathBuf>,

    /// Title of the regional map page
    #[arg(long, env = "WEATHER_REGION_TITLE", default_value = DEFAULT_REGION_TITLE)]
    pub region_title: String,

    /// State cache lifetime in milliseconds (minimum 10000)
    #[arg(long, env = "WEATHER_REFRESH_MS")]
    pub refresh_ms: Option<u64>,

    /// Forecast provider endpoint
    #[arg(long, env = "WEATHER_FORECAST_URL", default_value = FORECAST_URL)]
    pub forecast_url: String,

    /// Per-request timeout for forecast provider calls, in seconds
    #[arg(
        long,
        env = "WEATHER_UPSTREAM_TIMEOUT_SECS",
        default_value_t = DEFAULT_UPSTREAM_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub upstream_timeout_secs: u64,

    /// Build the state once, print it to stdout and exit
    #[arg(long)]
    pub print_state: bool,
}
