use std::{path::PathBuf, time::Duration};

use tracing::warn;

use crate::{
    cli::Cli,
    data::{
        source::{JsonSource, env_tiers},
        zips::{ZipSource, parse_zip_list},
    },
};

pub const DEFAULT_REFRESH_MS: u64 = 60_000;
/// Shorter cache lifetimes are rejected to avoid hammering the provider.
pub const MIN_REFRESH_MS: u64 = 10_000;
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;

const LOCATIONS_FILE: &str = "locations.json";
const ZIPS_FILE: &str = "zips.txt";
const STATE_FILE: &str = "state.json";

/// Everything the server needs, resolved once at startup.
#[derive(Debug, Clone)]
pub struct RuntimeSettings {
    /// Bind host: an IP literal or a name resolved at bind time.
    pub host: String,
    pub port: u16,
    pub media_dir: PathBuf,
    /// Location tiers in precedence order.
    pub location_sources: Vec<JsonSource>,
    /// Pre-rendered state tiers in precedence order.
    pub state_sources: Vec<JsonSource>,
    /// ZIP list tiers in precedence order.
    pub zip_sources: Vec<ZipSource>,
    pub region_title: String,
    pub refresh_interval: Duration,
    pub forecast_url: String,
    pub upstream_timeout: Duration,
}

impl RuntimeSettings {
    pub fn from_cli(cli: &Cli) -> Self {
        let location_sources = location_sources(cli);
        let env_states = env_tiers(cli.state_json.as_deref(), cli.state_base64.as_deref());
        let state_file = JsonSource::File(cli.data_dir.join(STATE_FILE));

        let mut state_sources = env_states.clone();
        state_sources.push(state_file.clone());

        let mut zip_sources = vec![
            ZipSource::List(cli.zips.as_deref().map(parse_zip_list).unwrap_or_default()),
            ZipSource::Locations(location_sources.clone()),
        ];
        zip_sources.extend(env_states.into_iter().map(ZipSource::State));
        zip_sources.push(ZipSource::File(
            cli.zips_file
                .clone()
                .unwrap_or_else(|| cli.data_dir.join(ZIPS_FILE)),
        ));
        zip_sources.push(ZipSource::State(state_file));

        Self {
            host: cli.host.clone(),
            port: cli.port,
            media_dir: cli.media_dir.clone(),
            location_sources,
            state_sources,
            zip_sources,
            region_title: cli.region_title.clone(),
            refresh_interval: Duration::from_millis(effective_refresh_ms(cli.refresh_ms)),
            forecast_url: cli.forecast_url.clone(),
            upstream_timeout: Duration::from_secs(cli.upstream_timeout_secs),
        }
    }
}

/// Applies the refresh floor: missing or too-small values use the default.
#[must_use]
pub fn effective_refresh_ms(requested: Option<u64>) -> u64 {
    match requested {
        Some(ms) if ms >= MIN_REFRESH_MS => ms,
        Some(ms) => {
            warn!(
                requested_ms = ms,
                minimum_ms = MIN_REFRESH_MS,
                "refresh interval below minimum, using default"
            );
            DEFAULT_REFRESH_MS
        }
        None => DEFAULT_REFRESH_MS,
    }
}

fn location_sources(cli: &Cli) -> Vec<JsonSource> {
    let mut sources = env_tiers(cli.locations_json.as_deref(), cli.locations_base64.as_deref());
    sources.push(JsonSource::File(
        cli.locations_file
            .clone()
            .unwrap_or_else(|| cli.data_dir.join(LOCATIONS_FILE)),
    ));
    sources
}
